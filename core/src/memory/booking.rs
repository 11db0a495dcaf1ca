//! In-memory booking repository.

use super::Table;
use crate::error::{CoworkingError, Result};
use crate::providers::BookingRepository;
use crate::types::{Booking, BookingId, NewBooking};
use std::future::Future;

const BOOKING_NOT_FOUND: &str = "Booking not found.";

/// In-memory booking repository.
///
/// `save` and `update` re-check for overlap under the table lock, mirroring
/// the exclusion constraint of the SQL schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Table<Booking>,
}

impl InMemoryBookingRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn save(&self, booking: &NewBooking) -> impl Future<Output = Result<Booking>> + Send {
        let bookings = self.bookings.clone();
        let booking = booking.clone();

        async move {
            let mut rows = bookings.lock()?;

            if rows.values().any(|existing| existing.conflicts_with(&booking)) {
                return Err(CoworkingError::booking_conflict());
            }

            Ok(rows.insert(|id| booking.with_id(BookingId::new(id))))
        }
    }

    fn find_by_id(&self, id: BookingId) -> impl Future<Output = Result<Option<Booking>>> + Send {
        let bookings = self.bookings.clone();

        async move { Ok(bookings.lock()?.get(id.get())) }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Booking>>> + Send {
        let bookings = self.bookings.clone();

        async move { Ok(bookings.lock()?.all()) }
    }

    fn update(&self, booking: &Booking) -> impl Future<Output = Result<Booking>> + Send {
        let bookings = self.bookings.clone();
        let booking = booking.clone();

        async move {
            let mut rows = bookings.lock()?;

            let exists = rows.get(booking.id.get()).is_some();
            if exists
                && rows.values().any(|existing| {
                    existing.id != booking.id
                        && existing.resource == booking.resource
                        && existing.slot.overlaps(&booking.slot)
                })
            {
                return Err(CoworkingError::booking_conflict());
            }

            rows.replace(booking.id.get(), booking, BOOKING_NOT_FOUND)
        }
    }

    fn delete(&self, id: BookingId) -> impl Future<Output = Result<()>> + Send {
        let bookings = self.bookings.clone();

        async move { bookings.lock()?.remove(id.get(), BOOKING_NOT_FOUND) }
    }

    fn is_conflict(&self, candidate: &NewBooking) -> impl Future<Output = Result<bool>> + Send {
        let bookings = self.bookings.clone();
        let candidate = candidate.clone();

        async move {
            let conflict = bookings
                .lock()?
                .values()
                .any(|existing| existing.conflicts_with(&candidate));

            tracing::debug!(
                resource = %candidate.resource,
                slot = %candidate.slot,
                conflict,
                "Checked booking conflict"
            );

            Ok(conflict)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{ConferenceRoomId, ResourceRef, TimeSlot, UserId, WorkspaceId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn request(resource: ResourceRef, from: (u32, u32), to: (u32, u32)) -> NewBooking {
        NewBooking {
            user_id: UserId::new(1),
            resource,
            slot: TimeSlot::new(at(from.0, from.1), at(to.0, to.1)).unwrap(),
        }
    }

    #[tokio::test]
    async fn conflict_is_scoped_to_one_resource() {
        let repo = InMemoryBookingRepository::new();
        let desk = ResourceRef::Workspace(WorkspaceId::new(1));
        let room = ResourceRef::ConferenceRoom(ConferenceRoomId::new(1));
        repo.save(&request(desk, (10, 0), (11, 0))).await.unwrap();

        assert!(repo.is_conflict(&request(desk, (10, 30), (11, 30))).await.unwrap());
        assert!(!repo.is_conflict(&request(desk, (11, 0), (12, 0))).await.unwrap());
        assert!(!repo.is_conflict(&request(desk, (9, 0), (10, 0))).await.unwrap());
        assert!(!repo.is_conflict(&request(room, (10, 30), (11, 30))).await.unwrap());
    }

    #[tokio::test]
    async fn save_refuses_overlap() {
        let repo = InMemoryBookingRepository::new();
        let desk = ResourceRef::Workspace(WorkspaceId::new(1));
        repo.save(&request(desk, (10, 0), (11, 0))).await.unwrap();

        assert_eq!(
            repo.save(&request(desk, (10, 59), (12, 0))).await,
            Err(CoworkingError::booking_conflict())
        );
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_refuses_moving_onto_a_neighbour() {
        let repo = InMemoryBookingRepository::new();
        let desk = ResourceRef::Workspace(WorkspaceId::new(1));
        let first = repo.save(&request(desk, (9, 0), (10, 0))).await.unwrap();
        let second = repo.save(&request(desk, (10, 0), (11, 0))).await.unwrap();

        let onto_first = Booking {
            slot: first.slot,
            ..second.clone()
        };
        assert_eq!(
            repo.update(&onto_first).await,
            Err(CoworkingError::booking_conflict())
        );
        assert_eq!(repo.find_by_id(second.id).await.unwrap(), Some(second.clone()));

        // Overlapping its own old slot is fine.
        let stretched = Booking {
            slot: TimeSlot::new(at(10, 0), at(11, 30)).unwrap(),
            ..second
        };
        assert_eq!(repo.update(&stretched).await.unwrap(), stretched);
    }

    #[tokio::test]
    async fn deleted_booking_frees_the_slot() {
        let repo = InMemoryBookingRepository::new();
        let desk = ResourceRef::Workspace(WorkspaceId::new(1));
        let booking = repo.save(&request(desk, (10, 0), (11, 0))).await.unwrap();

        repo.delete(booking.id).await.unwrap();

        assert!(repo.find_by_id(booking.id).await.unwrap().is_none());
        assert!(!repo.is_conflict(&request(desk, (10, 0), (11, 0))).await.unwrap());
        assert_eq!(
            repo.delete(booking.id).await,
            Err(CoworkingError::not_found("Booking not found."))
        );
    }
}
