use metrics::{counter, gauge, histogram};

/// Metrics collector for relay operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "hr_ws" }
    }

    /// Record new subscriber registered
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record subscriber removed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record a subscriber turned away before registration
    pub fn connection_rejected(&self, reason: &str) {
        counter!(format!("{}.connections.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record frame received from a subscriber
    pub fn message_received(&self, kind: &str) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
        counter!(format!("{}.messages.received.{}", self.prefix, kind)).increment(1);
    }

    /// Record one broadcast and how many subscribers it reached
    pub fn broadcast_published(&self, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.deliveries", self.prefix)).increment(delivered as u64);
    }

    /// Record a subscriber evicted during broadcast
    pub fn delivery_failed(&self, reason: &str) {
        counter!(format!("{}.broadcast.failures", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.failures.{}", self.prefix, reason)).increment(1);
    }

    /// Record an event persisted
    pub fn event_ingested(&self, duration: std::time::Duration) {
        counter!(format!("{}.events.ingested", self.prefix)).increment(1);
        histogram!(format!("{}.events.persist_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    /// Record an ingestion rejected or failed
    pub fn ingest_failed(&self, error_code: &str) {
        counter!(format!("{}.events.failed", self.prefix)).increment(1);
        counter!(format!("{}.events.failed.{}", self.prefix, error_code)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
