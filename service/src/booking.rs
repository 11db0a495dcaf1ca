//! Booking service: availability, reservation, listing and cancellation.
//!
//! # Conflict handling
//!
//! ```text
//! book_resource(user, resource, start, end)
//!   ├─ TimeSlot::new(start, end)        → "Start time must be before end time"
//!   └─ lock(write_lock)
//!        ├─ resource exists?             → "Resource not found"
//!        ├─ bookings.is_conflict(..)     → "Booking conflict detected"
//!        └─ bookings.save(..)
//! ```
//!
//! The existence check, conflict check and insert happen under one async
//! mutex shared by every clone of the service, so two callers in this process
//! can never both pass the conflict check for overlapping slots.

use crate::metrics;
use chrono::{NaiveDate, NaiveDateTime};
use coworking_core::providers::{BookingRepository, ConferenceRoomRepository, WorkspaceRepository};
use coworking_core::{
    Booking, BookingFilter, BookingId, ConferenceRoom, ConferenceRoomId, CoworkingError,
    NewBooking, ResourceRef, Result, TimeSlot, User, UserId, Workspace, WorkspaceId, is_admin,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Booking service.
#[derive(Debug, Clone)]
pub struct BookingService<B, W, C> {
    bookings: B,
    workspaces: W,
    rooms: C,
    write_lock: Arc<Mutex<()>>,
}

impl<B, W, C> BookingService<B, W, C>
where
    B: BookingRepository,
    W: WorkspaceRepository,
    C: ConferenceRoomRepository,
{
    /// Create a service over the booking and inventory repositories.
    #[must_use]
    pub fn new(bookings: B, workspaces: W, rooms: C) -> Self {
        Self {
            bookings,
            workspaces,
            rooms,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Workspaces with no booking starting on `date`.
    ///
    /// Only the start date of a booking counts: a booking that starts the
    /// evening before and runs past midnight does not make a workspace
    /// unavailable on `date`.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn get_available_workspaces(&self, date: NaiveDate) -> Result<Vec<Workspace>> {
        let booked: HashSet<WorkspaceId> = self
            .bookings_starting_on(date)
            .await?
            .filter_map(|resource| match resource {
                ResourceRef::Workspace(id) => Some(id),
                ResourceRef::ConferenceRoom(_) => None,
            })
            .collect();

        let mut workspaces = self.workspaces.find_all().await?;
        workspaces.retain(|workspace| !booked.contains(&workspace.id));

        tracing::debug!(%date, available = workspaces.len(), "Listed available workspaces");
        Ok(workspaces)
    }

    /// Conference rooms with no booking starting on `date`.
    ///
    /// Same start-date rule as [`Self::get_available_workspaces`].
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn get_available_conference_rooms(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ConferenceRoom>> {
        let booked: HashSet<ConferenceRoomId> = self
            .bookings_starting_on(date)
            .await?
            .filter_map(|resource| match resource {
                ResourceRef::ConferenceRoom(id) => Some(id),
                ResourceRef::Workspace(_) => None,
            })
            .collect();

        let mut rooms = self.rooms.find_all().await?;
        rooms.retain(|room| !booked.contains(&room.id));

        tracing::debug!(%date, available = rooms.len(), "Listed available conference rooms");
        Ok(rooms)
    }

    async fn bookings_starting_on(
        &self,
        date: NaiveDate,
    ) -> Result<impl Iterator<Item = ResourceRef>> {
        Ok(self
            .bookings
            .find_all()
            .await?
            .into_iter()
            .filter(move |booking| booking.starts_on(date))
            .map(|booking| booking.resource))
    }

    /// Book `resource` for `[start, end)` on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument("Start time must be before end time")` if `start >= end`
    /// - `InvalidArgument("Resource not found")` if the resource does not exist
    /// - `InvalidArgument("Booking conflict detected")` if a stored booking
    ///   of the same resource overlaps
    /// - `DatabaseError` on storage failure
    pub async fn book_resource(
        &self,
        user_id: UserId,
        resource: ResourceRef,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Booking> {
        let slot = TimeSlot::new(start, end).inspect_err(|_| {
            metrics::record_booking_rejected("invalid_slot");
        })?;

        let _guard = self.write_lock.lock().await;

        if !self.resource_exists(resource).await? {
            metrics::record_booking_rejected("unknown_resource");
            tracing::warn!(%user_id, %resource, "Booking refused: resource not found");
            return Err(CoworkingError::invalid_argument("Resource not found"));
        }

        let candidate = NewBooking {
            user_id,
            resource,
            slot,
        };

        if self.bookings.is_conflict(&candidate).await? {
            metrics::record_booking_rejected("conflict");
            tracing::warn!(%user_id, %resource, %slot, "Booking refused: conflict");
            return Err(CoworkingError::booking_conflict());
        }

        let booking = self.bookings.save(&candidate).await?;

        metrics::record_booking_created();
        tracing::info!(
            booking_id = %booking.id,
            %user_id,
            %resource,
            %slot,
            "Booking created"
        );

        Ok(booking)
    }

    async fn resource_exists(&self, resource: ResourceRef) -> Result<bool> {
        Ok(match resource {
            ResourceRef::Workspace(id) => self.workspaces.find_by_id(id).await?.is_some(),
            ResourceRef::ConferenceRoom(id) => self.rooms.find_by_id(id).await?.is_some(),
        })
    }

    /// Every booking, for admins only.
    ///
    /// # Errors
    ///
    /// `PermissionDenied("Only admin can view all bookings")` unless `user`
    /// is an admin; `DatabaseError` on storage failure.
    pub async fn get_all_bookings(&self, user: Option<&User>) -> Result<Vec<Booking>> {
        if !is_admin(user) {
            tracing::warn!(user_id = ?user.map(|user| user.id), "Listing all bookings refused");
            return Err(CoworkingError::permission_denied(
                "Only admin can view all bookings",
            ));
        }

        self.bookings.find_all().await
    }

    /// Bookings matching every criterion present in `filter`.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn get_filtered_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut bookings = self.bookings.find_all().await?;
        bookings.retain(|booking| filter.matches(booking));
        Ok(bookings)
    }

    /// Bookings owned by `user`.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn get_user_bookings(&self, user: &User) -> Result<Vec<Booking>> {
        self.get_filtered_bookings(&BookingFilter::any().by_user(user.id))
            .await
    }

    /// Cancel a booking. Owners may cancel their own bookings, admins any.
    ///
    /// # Errors
    ///
    /// - `NotFound("Booking not found.")` for an unknown id
    /// - `PermissionDenied("You can cancel only your own bookings.")` if
    ///   `user` is neither admin nor owner
    /// - `DatabaseError` on storage failure
    pub async fn cancel_booking(&self, user: Option<&User>, booking_id: BookingId) -> Result<()> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| CoworkingError::not_found("Booking not found."))?;

        let is_owner = user.is_some_and(|user| user.id == booking.user_id);
        if !is_owner && !is_admin(user) {
            tracing::warn!(
                %booking_id,
                user_id = ?user.map(|user| user.id),
                "Cancellation refused: not the owner"
            );
            return Err(CoworkingError::permission_denied(
                "You can cancel only your own bookings.",
            ));
        }

        self.bookings.delete(booking_id).await?;

        metrics::record_booking_cancelled();
        tracing::info!(%booking_id, owner = %booking.user_id, "Booking cancelled");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use coworking_core::memory::{
        InMemoryBookingRepository, InMemoryConferenceRoomRepository, InMemoryWorkspaceRepository,
    };
    use coworking_core::{HashedPassword, NewResource, Role};
    use coworking_testing::{at, date};

    type MemoryBookingService = BookingService<
        InMemoryBookingRepository,
        InMemoryWorkspaceRepository,
        InMemoryConferenceRoomRepository,
    >;

    struct Fixture {
        service: MemoryBookingService,
        desk: ResourceRef,
        second_desk: ResourceRef,
        room: ResourceRef,
    }

    /// Two workspaces (ids 1, 2) and one conference room (id 1).
    async fn fixture() -> Fixture {
        let workspaces = InMemoryWorkspaceRepository::new();
        let rooms = InMemoryConferenceRoomRepository::new();
        let desk = workspaces.save(&NewResource::named("Workspace 1")).await.unwrap();
        let second_desk = workspaces.save(&NewResource::named("Workspace 2")).await.unwrap();
        let room = rooms.save(&NewResource::named("Conference Room 1")).await.unwrap();

        Fixture {
            service: BookingService::new(InMemoryBookingRepository::new(), workspaces, rooms),
            desk: desk.id.into(),
            second_desk: second_desk.id.into(),
            room: room.id.into(),
        }
    }

    fn user(id: i64, role: Role) -> User {
        User {
            id: UserId::new(id),
            username: format!("user{id}"),
            password_hash: HashedPassword::from_phc(String::new()),
            role,
        }
    }

    #[tokio::test]
    async fn overlapping_request_is_rejected_and_adjacent_accepted() {
        let Fixture { service, desk, .. } = fixture().await;
        let owner = UserId::new(1);

        service
            .book_resource(owner, desk, at(2025, 3, 10, 10, 0), at(2025, 3, 10, 11, 0))
            .await
            .unwrap();

        assert_eq!(
            service
                .book_resource(owner, desk, at(2025, 3, 10, 10, 30), at(2025, 3, 10, 11, 30))
                .await,
            Err(CoworkingError::invalid_argument("Booking conflict detected"))
        );
        assert!(service
            .book_resource(owner, desk, at(2025, 3, 10, 11, 0), at(2025, 3, 10, 12, 0))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn inverted_or_empty_slots_are_rejected_before_anything_else() {
        let Fixture { service, .. } = fixture().await;
        // Unknown resource too: the slot check comes first.
        let nowhere = ResourceRef::Workspace(WorkspaceId::new(99));
        let expected = Err(CoworkingError::invalid_argument(
            "Start time must be before end time",
        ));

        assert_eq!(
            service
                .book_resource(UserId::new(1), nowhere, at(2025, 3, 10, 11, 0), at(2025, 3, 10, 10, 0))
                .await,
            expected
        );
        assert_eq!(
            service
                .book_resource(UserId::new(1), nowhere, at(2025, 3, 10, 10, 0), at(2025, 3, 10, 10, 0))
                .await,
            expected
        );
    }

    #[tokio::test]
    async fn unknown_resource_is_rejected() {
        let Fixture { service, .. } = fixture().await;

        for resource in [
            ResourceRef::Workspace(WorkspaceId::new(3)),
            ResourceRef::ConferenceRoom(ConferenceRoomId::new(2)),
        ] {
            assert_eq!(
                service
                    .book_resource(UserId::new(1), resource, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
                    .await,
                Err(CoworkingError::invalid_argument("Resource not found"))
            );
        }
        assert!(service.get_filtered_bookings(&BookingFilter::any()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn availability_excludes_only_resources_booked_that_day() {
        let Fixture {
            service,
            desk,
            second_desk,
            room,
        } = fixture().await;
        let owner = UserId::new(1);

        // Two bookings of desk 1 on the 10th, the room booked on the 11th.
        service
            .book_resource(owner, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();
        service
            .book_resource(owner, desk, at(2025, 3, 10, 14, 0), at(2025, 3, 10, 15, 0))
            .await
            .unwrap();
        service
            .book_resource(owner, room, at(2025, 3, 11, 9, 0), at(2025, 3, 11, 10, 0))
            .await
            .unwrap();

        let free_desks: Vec<ResourceRef> = service
            .get_available_workspaces(date(2025, 3, 10))
            .await
            .unwrap()
            .into_iter()
            .map(|workspace| workspace.id.into())
            .collect();
        assert_eq!(free_desks, vec![second_desk]);

        // Workspace 1 and conference room 1 share a raw id without shadowing.
        assert_eq!(
            service.get_available_conference_rooms(date(2025, 3, 10)).await.unwrap().len(),
            1
        );
        assert!(service
            .get_available_conference_rooms(date(2025, 3, 11))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            service.get_available_workspaces(date(2025, 3, 11)).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn booking_spanning_midnight_counts_only_for_its_start_date() {
        let Fixture { service, desk, .. } = fixture().await;

        service
            .book_resource(UserId::new(1), desk, at(2025, 3, 10, 22, 0), at(2025, 3, 11, 2, 0))
            .await
            .unwrap();

        assert_eq!(
            service.get_available_workspaces(date(2025, 3, 10)).await.unwrap().len(),
            1
        );
        assert_eq!(
            service.get_available_workspaces(date(2025, 3, 11)).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn only_admins_view_all_bookings() {
        let Fixture { service, desk, .. } = fixture().await;
        let admin = user(1, Role::Admin);
        let regular = user(2, Role::User);
        service
            .book_resource(regular.id, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();

        assert_eq!(service.get_all_bookings(Some(&admin)).await.unwrap().len(), 1);
        let denied = Err(CoworkingError::permission_denied("Only admin can view all bookings"));
        assert_eq!(service.get_all_bookings(Some(&regular)).await, denied);
        assert_eq!(service.get_all_bookings(None).await, denied);
    }

    #[tokio::test]
    async fn filters_and_user_listing() {
        let Fixture {
            service, desk, room, ..
        } = fixture().await;
        let alice = user(1, Role::User);
        let bob = user(2, Role::User);
        let a1 = service
            .book_resource(alice.id, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();
        let b1 = service
            .book_resource(bob.id, room, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();
        let a2 = service
            .book_resource(alice.id, room, at(2025, 3, 11, 9, 0), at(2025, 3, 11, 10, 0))
            .await
            .unwrap();

        assert_eq!(service.get_user_bookings(&alice).await.unwrap(), vec![a1.clone(), a2.clone()]);
        assert_eq!(
            service
                .get_filtered_bookings(&BookingFilter::any().on(date(2025, 3, 10)))
                .await
                .unwrap(),
            vec![a1.clone(), b1.clone()]
        );
        assert_eq!(
            service
                .get_filtered_bookings(&BookingFilter::any().for_resource(room).by_user(alice.id))
                .await
                .unwrap(),
            vec![a2.clone()]
        );
        assert_eq!(
            service.get_filtered_bookings(&BookingFilter::any()).await.unwrap(),
            vec![a1, b1, a2]
        );
    }

    #[tokio::test]
    async fn cancellation_rules() {
        let Fixture { service, desk, .. } = fixture().await;
        let owner = user(1, Role::User);
        let stranger = user(2, Role::User);
        let admin = user(3, Role::Admin);

        let first = service
            .book_resource(owner.id, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();
        let second = service
            .book_resource(owner.id, desk, at(2025, 3, 10, 10, 0), at(2025, 3, 10, 11, 0))
            .await
            .unwrap();

        let denied = Err(CoworkingError::permission_denied(
            "You can cancel only your own bookings.",
        ));
        assert_eq!(service.cancel_booking(Some(&stranger), first.id).await, denied);
        assert_eq!(service.cancel_booking(None, first.id).await, denied);

        service.cancel_booking(Some(&owner), first.id).await.unwrap();
        service.cancel_booking(Some(&admin), second.id).await.unwrap();

        assert!(service.get_user_bookings(&owner).await.unwrap().is_empty());
        assert_eq!(
            service.cancel_booking(Some(&owner), first.id).await,
            Err(CoworkingError::not_found("Booking not found."))
        );
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_booked_again() {
        let Fixture { service, desk, .. } = fixture().await;
        let owner = user(1, Role::User);
        let booking = service
            .book_resource(owner.id, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .unwrap();

        service.cancel_booking(Some(&owner), booking.id).await.unwrap();

        assert!(service
            .book_resource(owner.id, desk, at(2025, 3, 10, 9, 0), at(2025, 3, 10, 10, 0))
            .await
            .is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_for_one_slot_admit_exactly_one() {
        let Fixture { service, desk, .. } = fixture().await;

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .book_resource(
                            UserId::new(n),
                            desk,
                            at(2025, 3, 10, 9, 0),
                            at(2025, 3, 10, 10, 0),
                        )
                        .await
                })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(err) => assert_eq!(err, CoworkingError::booking_conflict()),
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(service.get_all_bookings(Some(&user(99, Role::Admin))).await.unwrap().len(), 1);
    }
}
