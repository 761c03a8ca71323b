use crate::{ConnectionId, ConnectionInfo};

use hr_core::TenantId;

use std::fmt;
use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::{Notify, mpsc};

/// Why a frame could not be handed to a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// Outbound queue is at capacity; the subscriber is not keeping up
    QueueFull,
    /// The session's writer has gone away
    Closed,
}

impl DeliveryFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueueFull => "queue_full",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The registry's view of one live subscriber: where to enqueue frames and
/// how to ask the session to terminate.
#[derive(Clone)]
pub struct ConnectionHandle {
    info: ConnectionInfo,
    sender: mpsc::Sender<Message>,
    close: Arc<Notify>,
}

impl ConnectionHandle {
    pub fn new(info: ConnectionInfo, sender: mpsc::Sender<Message>, close: Arc<Notify>) -> Self {
        Self {
            info,
            sender,
            close,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.info.connection_id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.info.tenant_id
    }

    pub fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    /// Enqueue without waiting.
    pub fn try_send(&self, message: Message) -> Result<(), DeliveryFailure> {
        self.sender.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryFailure::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DeliveryFailure::Closed,
        })
    }

    /// Ask the owning session to shut down. The signal is retained if the
    /// session is not currently waiting for it.
    pub fn close(&self) {
        self.close.notify_one();
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("info", &self.info)
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}
