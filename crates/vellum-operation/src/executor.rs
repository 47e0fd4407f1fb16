use bson::{Bson, Document};
use serde::de::DeserializeOwned;
use vellum_binding::{
    AsyncChannel, Cancellation, Channel, ChannelBinding, ChannelError, EncoderSettings,
};

use crate::error::OperationError;

/// Sends the command over the bound channel and decodes the reply's
/// `values` array, blocking until the round trip completes.
pub(crate) fn run<T, C, S>(
    binding: &mut ChannelBinding<C, S>,
    database: &str,
    command: &Document,
    settings: &EncoderSettings,
    cancel: &Cancellation,
) -> Result<Vec<T>, OperationError>
where
    T: DeserializeOwned,
    C: Channel,
{
    if cancel.is_cancelled() {
        return Err(OperationError::Cancelled);
    }
    tracing::debug!(
        database,
        preference = ?binding.read_preference(),
        "sending distinct command"
    );
    let reply = binding
        .channel_mut()
        .run_command(database, command, settings, cancel)?;
    decode_values(reply)
}

/// Suspendable mirror of [`run`]; same command, same decoding, same
/// error classification.
pub(crate) async fn run_async<T, C, S>(
    binding: &mut ChannelBinding<C, S>,
    database: &str,
    command: &Document,
    settings: &EncoderSettings,
    cancel: &Cancellation,
) -> Result<Vec<T>, OperationError>
where
    T: DeserializeOwned,
    C: AsyncChannel,
{
    if cancel.is_cancelled() {
        return Err(OperationError::Cancelled);
    }
    tracing::debug!(
        database,
        preference = ?binding.read_preference(),
        "sending distinct command"
    );
    let reply = binding
        .channel_mut()
        .run_command(database, command, settings, cancel)
        .await?;
    decode_values(reply)
}

fn decode_values<T: DeserializeOwned>(mut reply: Document) -> Result<Vec<T>, OperationError> {
    let values = match reply.remove("values") {
        Some(Bson::Array(values)) => values,
        Some(other) => {
            return Err(decode_err(format!(
                "expected values array, got {:?}",
                other.element_type()
            )));
        }
        None => return Err(decode_err("reply has no values field")),
    };
    tracing::debug!(count = values.len(), "decoded distinct values");
    values
        .into_iter()
        .map(|value| {
            bson::deserialize_from_bson::<T>(value)
                .map_err(|e| decode_err(e.to_string()))
        })
        .collect()
}

fn decode_err(msg: impl Into<String>) -> OperationError {
    OperationError::Execution(ChannelError::Decode(msg.into()))
}

#[cfg(test)]
mod tests {
    use bson::{Bson, doc};

    use super::decode_values;
    use crate::error::OperationError;
    use vellum_binding::ChannelError;

    #[test]
    fn decodes_typed_values() {
        let reply = doc! { "values": ["a", "b"], "ok": 1 };
        let values: Vec<String> = decode_values(reply).unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn decodes_raw_bson_values() {
        let reply = doc! { "values": [1, "two", true], "ok": 1 };
        let values: Vec<Bson> = decode_values(reply).unwrap();
        assert_eq!(
            values,
            vec![Bson::Int32(1), Bson::String("two".into()), Bson::Boolean(true)]
        );
    }

    #[test]
    fn missing_values_field_is_a_decode_error() {
        let err = decode_values::<Bson>(doc! { "ok": 1 }).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Execution(ChannelError::Decode(_))
        ));
    }

    #[test]
    fn non_array_values_field_is_a_decode_error() {
        let err = decode_values::<Bson>(doc! { "values": "oops" }).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Execution(ChannelError::Decode(_))
        ));
    }

    #[test]
    fn element_type_mismatch_is_a_decode_error() {
        let err = decode_values::<String>(doc! { "values": [1, 2] }).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Execution(ChannelError::Decode(_))
        ));
    }
}
