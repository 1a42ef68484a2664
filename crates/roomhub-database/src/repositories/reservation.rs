//! Postgres-backed reservation store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, ReservationStatus,
};

use crate::store::ReservationStore;

/// Repository for reservation persistence and overlap queries.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (room_id, requester_id, title, start_time, end_time, status) \
             VALUES ($1, $2, $3, $4, $5, 'APPROVED') RETURNING *",
        )
        .bind(data.room_id)
        .bind(data.requester_id)
        .bind(&data.title)
        .bind(data.start_time)
        .bind(data.end_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create reservation", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    async fn find_filtered(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.requester_id.is_some() {
            conditions.push(format!("requester_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.room_id.is_some() {
            conditions.push(format!("room_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.starts_from.is_some() {
            conditions.push(format!("start_time >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.starts_until.is_some() {
            conditions.push(format!("start_time <= ${param_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql =
            format!("SELECT * FROM reservations {where_clause} ORDER BY start_time ASC");

        let mut query = sqlx::query_as::<_, Reservation>(&sql);
        if let Some(requester_id) = filter.requester_id {
            query = query.bind(requester_id);
        }
        if let Some(room_id) = filter.room_id {
            query = query.bind(room_id);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(from) = filter.starts_from {
            query = query.bind(from);
        }
        if let Some(until) = filter.starts_until {
            query = query.bind(until);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reservations", e)
        })
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update reservation status", e)
        })
    }

    async fn find_conflicting(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        buffer: Duration,
    ) -> AppResult<Option<Reservation>> {
        // Both strict inequalities: a reservation abutting the buffer-expanded
        // bound is legal, not a conflict.
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE room_id = $1 AND status <> 'CANCELLED' \
               AND start_time < $2 AND end_time > $3 \
             ORDER BY end_time DESC LIMIT 1",
        )
        .bind(room_id)
        .bind(end + buffer)
        .bind(start - buffer)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check for conflicts", e)
        })
    }

    async fn find_busy_room_ids(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT room_id FROM reservations \
             WHERE status <> 'CANCELLED' AND start_time < $2 AND end_time > $1",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find busy rooms", e))
    }

    async fn has_future_commitments(
        &self,
        room_id: Uuid,
        after: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                 SELECT 1 FROM reservations \
                 WHERE room_id = $1 AND status <> 'CANCELLED' AND start_time > $2)",
        )
        .bind(room_id)
        .bind(after)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check future commitments", e)
        })
    }

    async fn complete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'COMPLETED', updated_at = NOW() \
             WHERE status = 'APPROVED' AND end_time < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete expired reservations", e)
        })?;

        Ok(result.rows_affected())
    }
}
