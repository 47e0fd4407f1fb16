mod command;
mod concern;
mod cursor;
mod distinct;
mod error;
mod executor;
mod max_time;
mod namespace;

pub use concern::{ReadConcern, ReadConcernLevel};
pub use cursor::SingleBatchCursor;
pub use distinct::DistinctOperation;
pub use error::OperationError;
pub use max_time::MaxTime;
pub use namespace::Namespace;
