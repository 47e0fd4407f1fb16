use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Cooperative cancellation signal shared between a caller and an
/// in-flight operation.
///
/// Cloning is cheap; all clones observe the same flag. The flag is
/// one-shot: once [`cancel`](Cancellation::cancel) fires it never
/// resets. Operations check [`is_cancelled`](Cancellation::is_cancelled)
/// before each suspension point and hand the token to the binding,
/// which may park on [`cancelled`](Cancellation::cancelled) while
/// blocked on the network.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called, however long ago.
    pub async fn cancelled(&self) {
        loop {
            // Register the waiter before re-checking the flag, so a
            // cancel between the check and the await cannot be missed.
            let mut notified = pin!(self.inner.notify.notified());
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cancellation;

    #[test]
    fn starts_live() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let cancel = Cancellation::new();
        let clone = cancel.clone();
        cancel.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_after_cancel() {
        let cancel = Cancellation::new();
        let waiter = cancel.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_resolves_when_already_cancelled() {
        let cancel = Cancellation::new();
        cancel.cancel();
        cancel.cancelled().await;
    }
}
