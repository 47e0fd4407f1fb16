#![allow(async_fn_in_trait)]

mod binding;
mod cancel;
mod error;
mod pool;
mod preference;
mod settings;
mod version;

pub use binding::{
    AsyncChannel, AsyncChannelSource, AsyncReadBinding, Channel, ChannelBinding, ChannelSource,
    ReadBinding,
};
pub use cancel::Cancellation;
pub use error::{BindingError, ChannelError};
pub use pool::{ChannelPool, PoolSource, PooledChannel};
pub use preference::ReadPreference;
pub use settings::EncoderSettings;
pub use version::ServerVersion;
