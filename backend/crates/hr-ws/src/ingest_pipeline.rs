use crate::{ConnectionRegistry, IngestError, Metrics};

use hr_auth::TenantResolver;
use hr_core::{BroadcastPayload, HeaderSet, NewWebhookEvent, TenantId};
use hr_db::EventStore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use serde::Serialize;

/// One inbound request, as seen by the capture endpoint
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Host header, possibly with a port
    pub host: String,
    pub method: String,
    /// Path plus query string
    pub url: String,
    pub headers: HeaderSet,
    pub body: Vec<u8>,
}

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestAck {
    pub event_id: i64,
    pub tenant: TenantId,
    /// Subscribers the event was enqueued for. Informational only.
    pub delivered: usize,
}

/// Capture, persist, then fan out.
///
/// An event is broadcast only after the store has accepted it, so a
/// subscriber never sees an event that cannot be queried afterwards.
#[derive(Clone)]
pub struct IngestPipeline {
    resolver: TenantResolver,
    store: Arc<dyn EventStore>,
    registry: ConnectionRegistry,
    metrics: Metrics,
    storage_timeout: Duration,
}

impl IngestPipeline {
    pub fn new(
        resolver: TenantResolver,
        store: Arc<dyn EventStore>,
        registry: ConnectionRegistry,
        metrics: Metrics,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            store,
            registry,
            metrics,
            storage_timeout,
        }
    }

    pub async fn ingest(&self, request: CapturedRequest) -> Result<IngestAck, IngestError> {
        let result = self.run(request).await;
        if let Err(ref e) = result {
            self.metrics.ingest_failed(e.error_code());
        }
        result
    }

    async fn run(&self, request: CapturedRequest) -> Result<IngestAck, IngestError> {
        let tenant = self.resolver.resolve_from_address(&request.host).map_err(|e| {
            warn!("Rejected capture for host '{}': {e}", request.host);
            IngestError::from(e)
        })?;

        let event = NewWebhookEvent::new(
            tenant.clone(),
            request.method,
            request.url,
            request.headers.to_json()?,
            request.body,
        );

        let started = Instant::now();
        let stored = match tokio::time::timeout(self.storage_timeout, self.store.create(&event))
            .await
        {
            Ok(Ok(stored)) => stored,
            Ok(Err(e)) => {
                error!("Failed to store event for tenant {tenant}: {e}");
                return Err(IngestError::storage(e.to_string()));
            }
            Err(_) => {
                error!(
                    "Storing event for tenant {tenant} timed out after {}ms",
                    self.storage_timeout.as_millis()
                );
                return Err(IngestError::storage(format!(
                    "write timed out after {}ms",
                    self.storage_timeout.as_millis()
                )));
            }
        };
        self.metrics.event_ingested(started.elapsed());

        let payload = BroadcastPayload::from_event(&event);
        let delivered = match self.registry.broadcast(&tenant, &payload).await {
            Ok(delivered) => delivered,
            Err(e) => {
                error!("Event {} stored but not broadcast: {e}", stored.id);
                0
            }
        };

        info!(
            "Captured {} {} for tenant {tenant} as event {} ({delivered} live subscribers)",
            stored.method, stored.url, stored.id
        );

        Ok(IngestAck {
            event_id: stored.id,
            tenant,
            delivered,
        })
    }
}
