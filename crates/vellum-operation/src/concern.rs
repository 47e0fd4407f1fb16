use bson::{Document, doc};
use serde::{Deserialize, Serialize};
use vellum_binding::ServerVersion;

use crate::error::OperationError;

pub(crate) const MIN_READ_CONCERN_VERSION: ServerVersion = ServerVersion::new(3, 2, 0);
pub(crate) const MIN_COLLATION_VERSION: ServerVersion = ServerVersion::new(3, 4, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadConcernLevel {
    Local,
    Majority,
    Linearizable,
    Available,
    Snapshot,
}

impl ReadConcernLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Majority => "majority",
            Self::Linearizable => "linearizable",
            Self::Available => "available",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Read isolation requested for a command.
///
/// The default carries no level and is never serialized into the
/// command; the server applies its own default in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadConcern {
    level: Option<ReadConcernLevel>,
}

impl ReadConcern {
    /// The implicit server default.
    pub fn server_default() -> Self {
        Self::default()
    }

    pub fn level(level: ReadConcernLevel) -> Self {
        Self { level: Some(level) }
    }

    pub fn majority() -> Self {
        Self::level(ReadConcernLevel::Majority)
    }

    pub fn local() -> Self {
        Self::level(ReadConcernLevel::Local)
    }

    pub fn is_server_default(&self) -> bool {
        self.level.is_none()
    }

    /// Canonical sub-document, or `None` for the server default.
    pub fn to_document(&self) -> Option<Document> {
        self.level.map(|level| doc! { "level": level.as_str() })
    }
}

/// Rejects a non-default read concern the server is too old to honor.
pub(crate) fn validate_read_concern(
    concern: &ReadConcern,
    actual: ServerVersion,
) -> Result<(), OperationError> {
    if !concern.is_server_default() && actual < MIN_READ_CONCERN_VERSION {
        return Err(OperationError::UnsupportedFeature {
            feature: "read concern",
            required: MIN_READ_CONCERN_VERSION,
            actual,
        });
    }
    Ok(())
}

/// Rejects a collation the server is too old to honor.
pub(crate) fn validate_collation(
    collation: Option<&Document>,
    actual: ServerVersion,
) -> Result<(), OperationError> {
    if collation.is_some() && actual < MIN_COLLATION_VERSION {
        return Err(OperationError::UnsupportedFeature {
            feature: "collation",
            required: MIN_COLLATION_VERSION,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use vellum_binding::ServerVersion;

    use super::{ReadConcern, validate_collation, validate_read_concern};
    use crate::error::OperationError;

    #[test]
    fn server_default_has_no_document() {
        assert!(ReadConcern::server_default().is_server_default());
        assert_eq!(ReadConcern::server_default().to_document(), None);
    }

    #[test]
    fn levels_serialize_canonically() {
        assert_eq!(
            ReadConcern::majority().to_document(),
            Some(doc! { "level": "majority" })
        );
        assert_eq!(
            ReadConcern::local().to_document(),
            Some(doc! { "level": "local" })
        );
    }

    #[test]
    fn default_concern_passes_any_version() {
        validate_read_concern(&ReadConcern::server_default(), ServerVersion::new(2, 6, 0))
            .unwrap();
    }

    #[test]
    fn non_default_concern_needs_minimum_version() {
        validate_read_concern(&ReadConcern::majority(), ServerVersion::new(3, 2, 0)).unwrap();

        let err = validate_read_concern(&ReadConcern::majority(), ServerVersion::new(3, 0, 0))
            .unwrap_err();
        match err {
            OperationError::UnsupportedFeature {
                feature,
                required,
                actual,
            } => {
                assert_eq!(feature, "read concern");
                assert_eq!(required, ServerVersion::new(3, 2, 0));
                assert_eq!(actual, ServerVersion::new(3, 0, 0));
            }
            other => panic!("expected unsupported feature, got {other:?}"),
        }
    }

    #[test]
    fn collation_needs_minimum_version() {
        let collation = doc! { "locale": "fr" };
        validate_collation(Some(&collation), ServerVersion::new(3, 4, 0)).unwrap();
        assert!(matches!(
            validate_collation(Some(&collation), ServerVersion::new(3, 2, 0)),
            Err(OperationError::UnsupportedFeature { .. })
        ));
        validate_collation(None, ServerVersion::new(2, 6, 0)).unwrap();
    }
}
