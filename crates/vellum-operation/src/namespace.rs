use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OperationError;

/// A fully qualified collection name: `database.collection`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    database: String,
    collection: String,
}

impl Namespace {
    /// Both parts must be non-empty.
    pub fn new(
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Result<Self, OperationError> {
        let database = database.into();
        let collection = collection.into();
        if database.is_empty() {
            return Err(OperationError::InvalidArgument(
                "database name must not be empty".into(),
            ));
        }
        if collection.is_empty() {
            return Err(OperationError::InvalidArgument(
                "collection name must not be empty".into(),
            ));
        }
        Ok(Self {
            database,
            collection,
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}
