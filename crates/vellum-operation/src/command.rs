use bson::Document;
use vellum_binding::ServerVersion;

use crate::concern::{validate_collation, validate_read_concern};
use crate::distinct::DistinctOperation;
use crate::error::OperationError;
use crate::max_time::MaxTime;

/// Builds the `distinct` command document for one execution.
///
/// Pure and deterministic: same operation state and server version
/// produce an identical document, with a fixed field order. Capability
/// checks run before any field is written, so a rejected option never
/// leaves a partially built command behind.
pub(crate) fn build_command<T>(
    op: &DistinctOperation<T>,
    server_version: ServerVersion,
) -> Result<Document, OperationError> {
    validate_read_concern(op.read_concern_ref(), server_version)?;
    validate_collation(op.collation_ref(), server_version)?;

    let mut command = Document::new();
    command.insert("distinct", op.namespace().collection());
    command.insert("key", op.field_name());
    if let Some(filter) = op.filter_ref() {
        command.insert("query", filter.clone());
    }
    if let Some(millis) = op.max_time_ref().and_then(MaxTime::as_millis) {
        command.insert("maxTimeMS", millis);
    }
    if let Some(collation) = op.collation_ref() {
        command.insert("collation", collation.clone());
    }
    if let Some(comment) = op.comment_ref() {
        command.insert("comment", comment.clone());
    }
    if let Some(concern) = op.read_concern_ref().to_document() {
        command.insert("readConcern", concern);
    }
    Ok(command)
}
