use serde::{Deserialize, Serialize};

/// Limits the channel's message encoder applies when putting a command
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSettings {
    pub max_document_size: u32,
    pub max_message_size: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            max_document_size: 16 * 1024 * 1024,
            max_message_size: 48_000_000,
        }
    }
}
