use tokio::sync::watch;

/// Per-task handle on the shutdown flag
pub struct ShutdownGuard {
    stopped_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(stopped_rx: watch::Receiver<bool>) -> Self {
        Self { stopped_rx }
    }

    /// Resolves once shutdown has been triggered, including before this call.
    pub async fn wait(&mut self) {
        // Err means the coordinator is gone; nothing will trigger shutdown
        // any more, so treat it as triggered.
        let _ = self.stopped_rx.wait_for(|stopped| *stopped).await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped_rx.borrow()
    }
}
