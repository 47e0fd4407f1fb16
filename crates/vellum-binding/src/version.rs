use std::fmt;

use serde::{Deserialize, Serialize};

/// Server version negotiated when a channel was established.
///
/// Ordered so capability checks can compare against a minimum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::ServerVersion;

    #[test]
    fn orders_numerically() {
        assert!(ServerVersion::new(3, 2, 0) > ServerVersion::new(3, 1, 9));
        assert!(ServerVersion::new(4, 0, 0) > ServerVersion::new(3, 9, 9));
        assert!(ServerVersion::new(3, 2, 0) >= ServerVersion::new(3, 2, 0));
    }

    #[test]
    fn displays_as_dotted_triple() {
        assert_eq!(ServerVersion::new(3, 4, 1).to_string(), "3.4.1");
    }
}
