use std::fmt;

// ── BindingError ──────────────────────────────────────────────

/// Failure while acquiring a channel source or channel from a binding.
#[derive(Debug)]
pub enum BindingError {
    Io(std::io::Error),
    Selection(String),
    Pool(String),
    Cancelled,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Selection(msg) => write!(f, "server selection failed: {msg}"),
            Self::Pool(msg) => write!(f, "pool error: {msg}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BindingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ── ChannelError ──────────────────────────────────────────────

/// Failure reported while running a command on an acquired channel:
/// a transport fault, an error reply from the server, or a reply that
/// does not decode.
#[derive(Debug)]
pub enum ChannelError {
    Io(std::io::Error),
    Server(String),
    Decode(String),
    Cancelled,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Server(msg) => write!(f, "server error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChannelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bson::error::Error> for ChannelError {
    fn from(e: bson::error::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
