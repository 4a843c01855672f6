//! One-shot cooperative cancellation for the acquisition thread
//!
//! The token/gate pair wraps a flag and a wake-up channel: requesting
//! cancellation flips the flag and sends a wake-up, so a worker blocked in
//! [`CancelGate::wait`] returns immediately instead of sleeping out its
//! interval. Cancellation is monotonic (never unset) and idempotent, and it
//! is safe to request before the worker has started running.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Requester side of the cancellation pair
#[derive(Debug, Clone)]
pub struct CancelToken {
    fired: Arc<AtomicBool>,
    wake_tx: Sender<()>,
}

/// Worker side of the cancellation pair
#[derive(Debug)]
pub struct CancelGate {
    fired: Arc<AtomicBool>,
    wake_rx: Receiver<()>,
}

/// Create a connected token/gate pair
pub fn cancel_pair() -> (CancelToken, CancelGate) {
    let fired = Arc::new(AtomicBool::new(false));
    let (wake_tx, wake_rx) = bounded(1);
    (
        CancelToken {
            fired: fired.clone(),
            wake_tx,
        },
        CancelGate { fired, wake_rx },
    )
}

impl CancelToken {
    /// Request cancellation, waking any blocked wait
    ///
    /// Requesting more than once is a no-op.
    pub fn cancel(&self) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            let _ = self.wake_tx.try_send(());
        }
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl CancelGate {
    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Block for up to `timeout`, returning `true` if cancelled
    ///
    /// Returns as soon as cancellation is requested, even mid-wait. If every
    /// token has been dropped the owner is gone, which counts as cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        match self.wake_rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => self.is_cancelled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_cancel_is_observed() {
        let (token, gate) = cancel_pair();
        assert!(!gate.is_cancelled());
        token.cancel();
        assert!(gate.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (token, gate) = cancel_pair();
        token.cancel();
        token.cancel();
        token.cancel();
        assert!(gate.is_cancelled());
        // The wake-up must still be consumable after redundant cancels.
        assert!(gate.wait(Duration::from_millis(1)));
    }

    #[test]
    fn test_cancel_before_wait_returns_immediately() {
        let (token, gate) = cancel_pair();
        token.cancel();
        let start = Instant::now();
        assert!(gate.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_cancel_interrupts_blocked_wait() {
        let (token, gate) = cancel_pair();
        let waiter = std::thread::spawn(move || {
            let start = Instant::now();
            let cancelled = gate.wait(Duration::from_secs(10));
            (cancelled, start.elapsed())
        });
        std::thread::sleep(Duration::from_millis(20));
        token.cancel();
        let (cancelled, elapsed) = waiter.join().unwrap();
        assert!(cancelled);
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_wait_times_out_without_cancel() {
        let (_token, gate) = cancel_pair();
        assert!(!gate.wait(Duration::from_millis(10)));
    }

    #[test]
    fn test_dropped_token_counts_as_cancelled() {
        let (token, gate) = cancel_pair();
        drop(token);
        assert!(gate.wait(Duration::from_millis(10)));
    }
}
