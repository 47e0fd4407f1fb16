use std::fmt;

use vellum_binding::{BindingError, ChannelError, ServerVersion};

/// The one error type an operation surfaces to its caller.
///
/// Collaborator failures pass through in their own variant;
/// cancellation reported by a collaborator normalizes to `Cancelled`.
#[derive(Debug)]
pub enum OperationError {
    /// A required field was empty at construction time. Never raised
    /// during execution.
    InvalidArgument(String),
    /// A configured option needs a newer server than the one the
    /// channel negotiated.
    UnsupportedFeature {
        feature: &'static str,
        required: ServerVersion,
        actual: ServerVersion,
    },
    Acquisition(BindingError),
    Execution(ChannelError),
    Cancelled,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::UnsupportedFeature {
                feature,
                required,
                actual,
            } => write!(
                f,
                "{feature} requires server version {required} or newer, got {actual}"
            ),
            Self::Acquisition(e) => write!(f, "acquisition error: {e}"),
            Self::Execution(e) => write!(f, "execution error: {e}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Acquisition(e) => Some(e),
            Self::Execution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BindingError> for OperationError {
    fn from(e: BindingError) -> Self {
        match e {
            BindingError::Cancelled => Self::Cancelled,
            other => Self::Acquisition(other),
        }
    }
}

impl From<ChannelError> for OperationError {
    fn from(e: ChannelError) -> Self {
        match e {
            ChannelError::Cancelled => Self::Cancelled,
            other => Self::Execution(other),
        }
    }
}
