//! Shutdown signal shared between the process and the HTTP server.

use tokio::sync::watch;

/// One-way latch that tells a running server to stop.
///
/// The flag lives in a `watch` channel, so a trigger that happens before
/// anyone waits is still observed by later waiters.
#[derive(Debug)]
pub struct ShutdownController {
    shutdown_signal: watch::Sender<bool>,
}

impl ShutdownController {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { shutdown_signal: tx }
    }

    /// Returns a receiver that flips to `true` once shutdown is triggered.
    #[must_use]
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_signal.subscribe()
    }

    /// Resolves once `trigger_shutdown()` has been called, including calls
    /// made before this future was created.
    pub async fn shutdown_requested(&self) {
        let mut rx = self.shutdown_receiver();
        // Err only if the sender is dropped, which `&self` rules out.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Latches the shutdown flag and wakes every waiter. Idempotent.
    pub fn trigger_shutdown(&self) {
        // Stores the value even when no receiver exists yet.
        self.shutdown_signal.send_replace(true);
    }

    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
