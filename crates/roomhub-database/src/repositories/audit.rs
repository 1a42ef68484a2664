//! Audit log repository implementation.
//!
//! Persists [`AuditEvent`]s into the append-only `audit_log` table. Rows
//! are never updated or deleted.

use async_trait::async_trait;
use sqlx::PgPool;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::traits::{AuditEvent, AuditSink};

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for AuditLogRepository {
    async fn record_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audit_log \
                 (actor_id, actor_name, actor_role, action, target_id, details, old_value, new_value) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(event.actor_id)
        .bind(&event.actor_name)
        .bind(&event.actor_role)
        .bind(event.action.as_str())
        .bind(event.target_id)
        .bind(&event.details)
        .bind(&event.old_value)
        .bind(&event.new_value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record audit event", e)
        })?;

        Ok(())
    }
}
