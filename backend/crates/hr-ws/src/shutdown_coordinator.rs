use crate::ShutdownGuard;

use std::sync::Arc;

use tokio::sync::watch;

/// Fans a single shutdown signal out to both listeners and every live session.
///
/// The signal is a latched flag: a guard taken after shutdown was triggered
/// resolves immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stopped_tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stopped_tx, _) = watch::channel(false);
        Self {
            stopped_tx: Arc::new(stopped_tx),
        }
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        log::info!(
            "Shutdown signal received, notifying {} listeners and sessions",
            self.stopped_tx.receiver_count()
        );
        self.stopped_tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped_tx.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.stopped_tx.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
