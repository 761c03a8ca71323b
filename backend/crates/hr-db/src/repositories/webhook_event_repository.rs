use crate::{DbError, EventStore, Result as DbErrorResult};

use hr_core::{ErrorLocation, NewWebhookEvent, TenantId, WebhookEvent};

use std::panic::Location;

use async_trait::async_trait;
use chrono::DateTime;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TABLE: &str = "webhook_events";

/// SQLite-backed [`EventStore`].
#[derive(Clone)]
pub struct WebhookEventRepository {
    pool: SqlitePool,
}

impl WebhookEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count_by_tenant(&self, tenant: &TenantId) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM webhook_events WHERE tenant_id = ?")
            .bind(tenant.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn row_to_event(row: &SqliteRow) -> DbErrorResult<WebhookEvent> {
        let id: i64 = row.try_get("id")?;
        let tenant: String = row.try_get("tenant_id")?;
        let captured_at: i64 = row.try_get("captured_at")?;

        let tenant_id = TenantId::new(tenant).map_err(|e| corrupt(id, e.to_string()))?;
        let captured_at = DateTime::from_timestamp_millis(captured_at)
            .ok_or_else(|| corrupt(id, format!("timestamp {captured_at} out of range")))?;

        Ok(WebhookEvent {
            id,
            tenant_id,
            method: row.try_get("method")?,
            url: row.try_get("url")?,
            headers: row.try_get("headers")?,
            body: row.try_get("body")?,
            captured_at,
        })
    }
}

#[track_caller]
fn corrupt(id: i64, message: String) -> DbError {
    DbError::CorruptRow {
        table: TABLE,
        id,
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[async_trait]
impl EventStore for WebhookEventRepository {
    async fn create(&self, event: &NewWebhookEvent) -> DbErrorResult<WebhookEvent> {
        let result = sqlx::query(
            r#"
              INSERT INTO webhook_events (
                  tenant_id, method, url, headers, body, captured_at
              ) VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(event.tenant_id.as_str())
        .bind(&event.method)
        .bind(&event.url)
        .bind(&event.headers)
        .bind(&event.body)
        .bind(event.captured_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Stored event {id} for tenant {}", event.tenant_id);

        Ok(event.clone().into_stored(id))
    }

    async fn find_by_tenant(&self, tenant: &TenantId) -> DbErrorResult<Vec<WebhookEvent>> {
        let rows = sqlx::query(
            r#"
              SELECT id, tenant_id, method, url, headers, body, captured_at
              FROM webhook_events
              WHERE tenant_id = ?
              ORDER BY id ASC
              "#,
        )
        .bind(tenant.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_event).collect()
    }

    async fn delete_by_tenant(&self, tenant: &TenantId) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM webhook_events WHERE tenant_id = ?")
            .bind(tenant.as_str())
            .execute(&self.pool)
            .await?;

        debug!(
            "Deleted {} events for tenant {tenant}",
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }
}
