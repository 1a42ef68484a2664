//! Postgres-backed room store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_entity::room::{CreateRoom, Room, UpdateRoom};

use crate::store::RoomStore;

/// Repository for room CRUD and lookup operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (name, capacity, facilities, buffer_time_minutes) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.facilities)
        .bind(data.buffer_time_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create room", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE LOWER(name) = LOWER($1) AND is_active = TRUE LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find room by name", e)
        })
    }

    async fn list_active(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE is_active = TRUE ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list active rooms", e)
            })
    }

    async fn update(&self, id: Uuid, changes: &UpdateRoom) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET \
                 name = COALESCE($2, name), \
                 capacity = COALESCE($3, capacity), \
                 facilities = COALESCE($4, facilities), \
                 buffer_time_minutes = COALESCE($5, buffer_time_minutes), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.capacity)
        .bind(&changes.facilities)
        .bind(changes.buffer_time_minutes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update room", e))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to change room active flag", e)
        })
    }
}
