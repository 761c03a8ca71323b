use crate::{
    ConnectionConfig, ConnectionHandle, ConnectionInfo, ConnectionRegistry, Metrics,
    Result as WsErrorResult, ShutdownGuard, WsError,
};

use hr_auth::ConnectionRateLimiter;

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::{Notify, mpsc};
use tokio::time::{Instant, interval_at};

/// Upper bound on flushing queued frames once a session is over
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Manages a single subscriber connection
pub struct WebSocketConnection {
    info: ConnectionInfo,
    config: ConnectionConfig,
    metrics: Metrics,
    rate_limiter: ConnectionRateLimiter,
    registry: ConnectionRegistry,
}

impl WebSocketConnection {
    pub fn new(
        info: ConnectionInfo,
        config: ConnectionConfig,
        metrics: Metrics,
        rate_limiter: ConnectionRateLimiter,
        registry: ConnectionRegistry,
    ) -> Self {
        Self {
            info,
            config,
            metrics,
            rate_limiter,
            registry,
        }
    }

    /// Handle the connection lifecycle, from registration to cleanup
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let connection_id = self.info.connection_id;
        let tenant = self.info.tenant_id.clone();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded so a slow subscriber is detected instead of buffered
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);
        let close = Arc::new(Notify::new());
        let handle = ConnectionHandle::new(self.info.clone(), tx.clone(), Arc::clone(&close));

        if let Err(e) = self.registry.register(handle).await {
            self.metrics.connection_rejected("limit");
            let _ = ws_sender
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::AGAIN,
                    reason: "connection limit reached".into(),
                })))
                .await;
            return Err(e);
        }

        log::info!(
            "Subscriber {connection_id} connected for tenant {tenant} from {}",
            self.info
                .remote_addr
                .map_or_else(|| "unknown".to_string(), |addr| addr.to_string())
        );

        let writer_close = Arc::clone(&close);
        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    writer_close.notify_one();
                    return;
                }
            }
            let _ = ws_sender.send(Message::Close(None)).await;
            let _ = ws_sender.close().await;
        });

        let heartbeat_interval = self.config.heartbeat_interval();
        let heartbeat_timeout = self.config.heartbeat_timeout();
        let mut heartbeat = interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Subscriber {connection_id} closed by client");
                            break Ok(());
                        }
                        Some(Ok(msg)) => {
                            last_seen = Instant::now();
                            if let Err(e) = self.handle_client_message(msg, &tx) {
                                log::warn!("Closing subscriber {connection_id}: {e}");
                                break Err(e);
                            }
                        }
                        Some(Err(e)) => {
                            log::warn!("Read error on subscriber {connection_id}: {e}");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("read error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() >= heartbeat_timeout {
                        log::warn!(
                            "Subscriber {connection_id} silent for {}s, closing",
                            heartbeat_timeout.as_secs()
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: heartbeat_timeout.as_secs(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    // A full queue already means eviction is on its way
                    let _ = tx.try_send(Message::Ping(Bytes::new()));
                }

                _ = close.notified() => {
                    log::info!("Subscriber {connection_id} evicted");
                    break Err(WsError::Evicted {
                        reason: "outbound delivery failed".into(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down subscriber {connection_id} gracefully");
                    break Ok(());
                }
            }
        };

        // Cleanup
        self.registry.unregister(&tenant, connection_id).await;
        drop(tx);
        if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut send_task)
            .await
            .is_err()
        {
            log::warn!("Writer for subscriber {connection_id} did not drain, aborting");
            send_task.abort();
        }

        self.metrics.connection_closed(match &result {
            Ok(()) => "normal",
            Err(e) => e.error_code(),
        });

        log::info!("Subscriber {connection_id} disconnected from tenant {tenant}");

        result
    }

    /// Handle a frame from the subscriber
    pub(crate) fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        if let Message::Pong(_) = msg {
            return Ok(());
        }

        self.rate_limiter
            .check()
            .map_err(|source| WsError::RateLimited {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        match msg {
            Message::Text(text) => {
                log::debug!(
                    "Subscriber {} sent text frame: {}",
                    self.info.connection_id,
                    text.as_str()
                );
                self.metrics.message_received("text");
                if self.config.echo_client_frames {
                    self.echo(tx, Message::Text(text));
                }
            }
            Message::Binary(data) => {
                log::debug!(
                    "Subscriber {} sent binary frame ({} bytes)",
                    self.info.connection_id,
                    data.len()
                );
                self.metrics.message_received("binary");
                if self.config.echo_client_frames {
                    self.echo(tx, Message::Binary(data));
                }
            }
            Message::Ping(data) => {
                if tx.try_send(Message::Pong(data)).is_err() {
                    log::debug!(
                        "Pong to subscriber {} dropped, outbound queue unavailable",
                        self.info.connection_id
                    );
                }
            }
            Message::Pong(_) | Message::Close(_) => {}
        }

        Ok(())
    }

    /// Echoes never block and never end the session; a frame that does not
    /// fit in the outbound queue is dropped.
    fn echo(&self, tx: &mpsc::Sender<Message>, frame: Message) {
        if let Err(e) = tx.try_send(frame) {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "queue closed",
            };
            log::debug!(
                "Echo to subscriber {} dropped: {reason}",
                self.info.connection_id
            );
        }
    }
}
