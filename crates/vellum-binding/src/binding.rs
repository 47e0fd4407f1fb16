use bson::Document;

use crate::cancel::Cancellation;
use crate::error::{BindingError, ChannelError};
use crate::preference::ReadPreference;
use crate::settings::EncoderSettings;
use crate::version::ServerVersion;

// ── Blocking trait family ─────────────────────────────────────

/// A live connection to one server, able to run one command at a time.
pub trait Channel {
    /// Version negotiated with the server when this channel was
    /// established.
    fn server_version(&self) -> ServerVersion;

    /// Sends `command` against `database` and returns the raw reply
    /// document.
    fn run_command(
        &mut self,
        database: &str,
        command: &Document,
        settings: &EncoderSettings,
        cancel: &Cancellation,
    ) -> Result<Document, ChannelError>;
}

/// Yields channels bound to one selected server.
pub trait ChannelSource {
    type Channel: Channel;

    fn channel(&mut self, cancel: &Cancellation) -> Result<Self::Channel, BindingError>;
}

/// Routes read operations to servers matching a read preference.
///
/// A binding is externally owned and may back many concurrent
/// operations; everything acquired through it belongs to a single
/// invocation.
pub trait ReadBinding {
    type Source: ChannelSource;

    fn read_preference(&self) -> ReadPreference;

    fn channel_source(&self, cancel: &Cancellation) -> Result<Self::Source, BindingError>;
}

// ── Suspendable trait family ──────────────────────────────────

/// [`Channel`] for callers on a cooperative scheduler.
pub trait AsyncChannel {
    fn server_version(&self) -> ServerVersion;

    async fn run_command(
        &mut self,
        database: &str,
        command: &Document,
        settings: &EncoderSettings,
        cancel: &Cancellation,
    ) -> Result<Document, ChannelError>;
}

/// [`ChannelSource`] for callers on a cooperative scheduler.
pub trait AsyncChannelSource {
    type Channel: AsyncChannel;

    async fn channel(&mut self, cancel: &Cancellation) -> Result<Self::Channel, BindingError>;
}

/// [`ReadBinding`] for callers on a cooperative scheduler.
pub trait AsyncReadBinding {
    type Source: AsyncChannelSource;

    fn read_preference(&self) -> ReadPreference;

    async fn channel_source(&self, cancel: &Cancellation) -> Result<Self::Source, BindingError>;
}

// ── ChannelBinding ────────────────────────────────────────────

/// A read binding narrowed to one acquired server channel.
///
/// Owns the channel and the source it came from for the duration of a
/// single operation. Field order is an invariant: `channel` is
/// declared before `source`, so drops run channel-first — the exact
/// reverse of acquisition — on every exit path.
pub struct ChannelBinding<C, S> {
    channel: C,
    source: S,
    read_preference: ReadPreference,
}

impl<C, S> ChannelBinding<C, S> {
    pub fn new(channel: C, source: S, read_preference: ReadPreference) -> Self {
        Self {
            channel,
            source,
            read_preference,
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn read_preference(&self) -> ReadPreference {
        self.read_preference
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::ChannelBinding;
    use crate::preference::ReadPreference;

    struct Tracked {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.lock().unwrap().push(self.name);
        }
    }

    #[test]
    fn drops_channel_before_source() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let channel = Tracked {
            name: "channel",
            log: log.clone(),
        };
        let source = Tracked {
            name: "source",
            log: log.clone(),
        };
        let binding = ChannelBinding::new(channel, source, ReadPreference::Primary);
        drop(binding);
        assert_eq!(*log.lock().unwrap(), vec!["channel", "source"]);
    }
}
