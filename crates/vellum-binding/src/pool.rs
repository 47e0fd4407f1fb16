use std::ops::{Deref, DerefMut};
use std::time::Duration;

use bson::Document;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};

use crate::binding::{Channel, ChannelSource, ReadBinding};
use crate::cancel::Cancellation;
use crate::error::{BindingError, ChannelError};
use crate::preference::ReadPreference;
use crate::settings::EncoderSettings;
use crate::version::ServerVersion;

/// A fixed-size pool of pre-established channels acting as a read
/// binding.
///
/// Channels check out through [`PoolSource`] and return to the pool
/// when the checked-out [`PooledChannel`] drops, so an operation that
/// exits early (error or cancellation) still gives its channel back.
/// Source acquisition never blocks; channel checkout is the only
/// point that waits, and it re-checks the cancellation signal while
/// the pool is exhausted.
pub struct ChannelPool<C> {
    sender: Sender<C>,
    receiver: Receiver<C>,
    read_preference: ReadPreference,
}

impl<C: Channel> ChannelPool<C> {
    pub fn new<F>(
        read_preference: ReadPreference,
        size: usize,
        mut connect: F,
    ) -> Result<Self, BindingError>
    where
        F: FnMut() -> Result<C, BindingError>,
    {
        let (sender, receiver) = crossbeam::channel::bounded(size);
        for _ in 0..size {
            let channel = connect()?;
            sender
                .send(channel)
                .map_err(|e| BindingError::Pool(e.to_string()))?;
        }
        Ok(Self {
            sender,
            receiver,
            read_preference,
        })
    }
}

impl<C: Channel> ReadBinding for ChannelPool<C> {
    type Source = PoolSource<C>;

    fn read_preference(&self) -> ReadPreference {
        self.read_preference
    }

    fn channel_source(&self, cancel: &Cancellation) -> Result<Self::Source, BindingError> {
        if cancel.is_cancelled() {
            return Err(BindingError::Cancelled);
        }
        Ok(PoolSource {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        })
    }
}

const CHECKOUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Channel source backed by a [`ChannelPool`] checkout.
pub struct PoolSource<C> {
    sender: Sender<C>,
    receiver: Receiver<C>,
}

impl<C: Channel> ChannelSource for PoolSource<C> {
    type Channel = PooledChannel<C>;

    fn channel(&mut self, cancel: &Cancellation) -> Result<Self::Channel, BindingError> {
        // Poll-based checkout: short receive timeouts so a cancel
        // fired while the pool is exhausted still unblocks the caller.
        let channel = loop {
            if cancel.is_cancelled() {
                return Err(BindingError::Cancelled);
            }
            match self.receiver.recv_timeout(CHECKOUT_POLL_INTERVAL) {
                Ok(channel) => break channel,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(e @ RecvTimeoutError::Disconnected) => {
                    return Err(BindingError::Pool(e.to_string()));
                }
            }
        };
        Ok(PooledChannel {
            channel: Some(channel),
            pool: self.sender.clone(),
        })
    }
}

/// A channel checked out of a [`ChannelPool`]; returns itself to the
/// pool on drop.
pub struct PooledChannel<C> {
    channel: Option<C>,
    pool: Sender<C>,
}

impl<C> Deref for PooledChannel<C> {
    type Target = C;

    fn deref(&self) -> &C {
        // BUG: channel is always Some until Drop runs, and Deref cannot be called after Drop
        self.channel.as_ref().expect("BUG: channel already consumed")
    }
}

impl<C> DerefMut for PooledChannel<C> {
    fn deref_mut(&mut self) -> &mut C {
        // BUG: channel is always Some until Drop runs, and DerefMut cannot be called after Drop
        self.channel.as_mut().expect("BUG: channel already consumed")
    }
}

impl<C: Channel> Channel for PooledChannel<C> {
    fn server_version(&self) -> ServerVersion {
        (**self).server_version()
    }

    fn run_command(
        &mut self,
        database: &str,
        command: &Document,
        settings: &EncoderSettings,
        cancel: &Cancellation,
    ) -> Result<Document, ChannelError> {
        (**self).run_command(database, command, settings, cancel)
    }
}

impl<C> Drop for PooledChannel<C> {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.take() {
            let _ = self.pool.send(channel);
        }
    }
}
