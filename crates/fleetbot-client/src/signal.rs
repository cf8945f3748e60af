//! One-shot completion signal
//!
//! Notifies an external waiter that the outermost transaction of a
//! [`SessionLock`](crate::SessionLock) handle has fully released. The signal
//! is intentionally idempotent: both the normal release path and the cache
//! fast path may observe the handle as idle and signal completion, so
//! `complete` must be safe to call more than once.

use tokio::sync::watch;
use tracing::trace;

/// Idempotent one-shot completion flag
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Mark the signal as completed; a no-op if already completed
    pub fn complete(&self) {
        let was_pending = !self.tx.send_replace(true);
        if was_pending {
            trace!("completion signal fired");
        }
    }

    pub fn is_complete(&self) -> bool {
        *self.tx.borrow()
    }

    /// Obtain a waiter for this signal; resolves immediately if already fired
    pub fn subscribe(&self) -> CompletionWaiter {
        CompletionWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiter side of a [`CompletionSignal`]
///
/// `wait` also returns if the owning handle is dropped before completing, so
/// a waiter can never dangle.
#[derive(Debug)]
pub struct CompletionWaiter {
    rx: watch::Receiver<bool>,
}

impl CompletionWaiter {
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|done| *done).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_is_idempotent() {
        let signal = CompletionSignal::new();
        assert!(!signal.is_complete());

        signal.complete();
        signal.complete();
        assert!(signal.is_complete());

        // a waiter subscribed after the fact resolves immediately
        signal.subscribe().wait().await;
    }

    #[tokio::test]
    async fn test_waiter_unblocks_on_complete() {
        let signal = CompletionSignal::new();
        let waiter = signal.subscribe();

        let task = tokio::spawn(waiter.wait());
        signal.complete();
        task.await.expect("waiter task panicked");
    }

    #[tokio::test]
    async fn test_waiter_unblocks_on_drop() {
        let signal = CompletionSignal::new();
        let waiter = signal.subscribe();
        drop(signal);
        waiter.wait().await;
    }
}
