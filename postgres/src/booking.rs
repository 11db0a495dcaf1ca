//! `PostgreSQL` booking repository.
//!
//! The overlap test in [`PostgresBookingRepository::is_conflict`] is the same
//! half-open predicate as `TimeSlot::overlaps`. The `bookings_no_overlap`
//! exclusion constraint enforces it again at insert time, which also covers
//! writers in other processes.

use crate::{CHECK_VIOLATION, EXCLUSION_VIOLATION, FOREIGN_KEY_VIOLATION, query_failed, sqlstate};
use chrono::NaiveDateTime;
use coworking_core::providers::BookingRepository;
use coworking_core::{
    Booking, BookingId, CoworkingError, NewBooking, ResourceKind, ResourceRef, Result, TimeSlot,
    UserId,
};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    user_id: i64,
    resource_kind: String,
    resource_id: i64,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CoworkingError;

    fn try_from(row: BookingRow) -> Result<Self> {
        let corrupt = |what: &str| {
            CoworkingError::DatabaseError(format!("Booking {} has an invalid {what}", row.id))
        };

        let kind = ResourceKind::parse(&row.resource_kind).map_err(|_| corrupt("resource kind"))?;
        let slot = TimeSlot::new(row.start_time, row.end_time).map_err(|_| corrupt("time range"))?;

        Ok(Self {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            resource: ResourceRef::from_parts(kind, row.resource_id),
            slot,
        })
    }
}

/// Translate constraint violations on `bookings` into domain errors.
fn write_failed(action: &'static str) -> impl FnOnce(sqlx::Error) -> CoworkingError {
    move |err| match sqlstate(&err).as_deref() {
        Some(EXCLUSION_VIOLATION) => CoworkingError::booking_conflict(),
        Some(CHECK_VIOLATION) => {
            CoworkingError::invalid_argument("Start time must be before end time")
        }
        Some(FOREIGN_KEY_VIOLATION) => CoworkingError::invalid_argument("User not found"),
        _ => query_failed(action)(err),
    }
}

const SELECT_BOOKINGS: &str = r"
    SELECT id, user_id, resource_kind, resource_id, start_time, end_time
    FROM coworking_service.bookings
";

/// `PostgreSQL` booking repository.
#[derive(Clone, Debug)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &NewBooking) -> Result<Booking> {
        let row: BookingRow = sqlx::query_as(
            r"
            INSERT INTO coworking_service.bookings
                (user_id, resource_kind, resource_id, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, resource_kind, resource_id, start_time, end_time
            ",
        )
        .bind(booking.user_id.get())
        .bind(booking.resource.kind().as_str())
        .bind(booking.resource.raw_id())
        .bind(booking.slot.start())
        .bind(booking.slot.end())
        .fetch_one(&self.pool)
        .await
        .map_err(write_failed("store booking"))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!("{SELECT_BOOKINGS} WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("get booking"))?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!("{SELECT_BOOKINGS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("list bookings"))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update(&self, booking: &Booking) -> Result<Booking> {
        let result = sqlx::query(
            r"
            UPDATE coworking_service.bookings
            SET user_id = $2, resource_kind = $3, resource_id = $4, start_time = $5, end_time = $6
            WHERE id = $1
            ",
        )
        .bind(booking.id.get())
        .bind(booking.user_id.get())
        .bind(booking.resource.kind().as_str())
        .bind(booking.resource.raw_id())
        .bind(booking.slot.start())
        .bind(booking.slot.end())
        .execute(&self.pool)
        .await
        .map_err(write_failed("update booking"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("Booking not found."));
        }
        Ok(booking.clone())
    }

    async fn delete(&self, id: BookingId) -> Result<()> {
        let result = sqlx::query("DELETE FROM coworking_service.bookings WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete booking"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("Booking not found."));
        }
        Ok(())
    }

    async fn is_conflict(&self, candidate: &NewBooking) -> Result<bool> {
        let conflict: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM coworking_service.bookings
                WHERE resource_kind = $1
                  AND resource_id = $2
                  AND end_time > $3
                  AND start_time < $4
            )
            ",
        )
        .bind(candidate.resource.kind().as_str())
        .bind(candidate.resource.raw_id())
        .bind(candidate.slot.start())
        .bind(candidate.slot.end())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed("check booking conflict"))?;

        tracing::debug!(
            resource = %candidate.resource,
            slot = %candidate.slot,
            conflict,
            "Checked booking conflict"
        );

        Ok(conflict)
    }
}
