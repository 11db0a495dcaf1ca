//! `PostgreSQL` conference room repository.

use crate::query_failed;
use coworking_core::providers::ConferenceRoomRepository;
use coworking_core::{ConferenceRoom, ConferenceRoomId, CoworkingError, NewResource, Result};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct ConferenceRoomRow {
    id: i64,
    name: String,
    available: bool,
}

impl From<ConferenceRoomRow> for ConferenceRoom {
    fn from(row: ConferenceRoomRow) -> Self {
        Self {
            id: ConferenceRoomId::new(row.id),
            name: row.name,
            available: row.available,
        }
    }
}

/// `PostgreSQL` conference room repository.
#[derive(Clone, Debug)]
pub struct PostgresConferenceRoomRepository {
    pool: PgPool,
}

impl PostgresConferenceRoomRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ConferenceRoomRepository for PostgresConferenceRoomRepository {
    async fn save(&self, room: &NewResource) -> Result<ConferenceRoom> {
        let row: ConferenceRoomRow = sqlx::query_as(
            r"
            INSERT INTO coworking_service.conference_rooms (name, available)
            VALUES ($1, $2)
            RETURNING id, name, available
            ",
        )
        .bind(&room.name)
        .bind(room.available)
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed("store conference room"))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: ConferenceRoomId) -> Result<Option<ConferenceRoom>> {
        let row: Option<ConferenceRoomRow> = sqlx::query_as(
            "SELECT id, name, available FROM coworking_service.conference_rooms WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("get conference room"))?;

        Ok(row.map(ConferenceRoom::from))
    }

    async fn find_all(&self) -> Result<Vec<ConferenceRoom>> {
        let rows: Vec<ConferenceRoomRow> = sqlx::query_as(
            "SELECT id, name, available FROM coworking_service.conference_rooms ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("list conference rooms"))?;

        Ok(rows.into_iter().map(ConferenceRoom::from).collect())
    }

    async fn update(&self, room: &ConferenceRoom) -> Result<ConferenceRoom> {
        let result = sqlx::query(
            "UPDATE coworking_service.conference_rooms SET name = $2, available = $3 WHERE id = $1",
        )
        .bind(room.id.get())
        .bind(&room.name)
        .bind(room.available)
        .execute(&self.pool)
        .await
        .map_err(query_failed("update conference room"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("ConferenceRoom not found"));
        }
        Ok(room.clone())
    }

    async fn delete(&self, id: ConferenceRoomId) -> Result<()> {
        let result = sqlx::query("DELETE FROM coworking_service.conference_rooms WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete conference room"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("ConferenceRoom not found"));
        }
        Ok(())
    }
}
