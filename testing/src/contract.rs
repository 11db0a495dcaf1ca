//! Repository contract checks.
//!
//! Every repository implementation must pass these. They start from empty
//! storage and panic on the first violation, so call them from a test.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::helpers::{at, slot, unhashed_user};
use coworking_core::providers::{
    BookingRepository, ConferenceRoomRepository, UserRepository, WorkspaceRepository,
};
use coworking_core::{
    Booking, BookingId, ConferenceRoom, ConferenceRoomId, CoworkingError, NewBooking, NewResource,
    ResourceRef, Role, UserId, Workspace, WorkspaceId,
};

/// Users: id assignment, unique usernames, lookups, update, delete.
pub async fn user_repository_contract<R: UserRepository>(repo: &R) {
    let alice = repo.save(&unhashed_user("alice", Role::User)).await.unwrap();
    let bob = repo.save(&unhashed_user("bob", Role::Admin)).await.unwrap();
    assert_ne!(alice.id, bob.id);
    assert_eq!(alice.username, "alice");
    assert_eq!(bob.role, Role::Admin);

    assert_eq!(
        repo.save(&unhashed_user("alice", Role::Admin)).await,
        Err(CoworkingError::AlreadyExists("User already exists".to_string()))
    );

    assert_eq!(repo.find_by_id(alice.id).await.unwrap(), Some(alice.clone()));
    assert_eq!(repo.find_by_username("bob").await.unwrap(), Some(bob.clone()));
    assert_eq!(repo.find_by_username("carol").await.unwrap(), None);
    assert_eq!(repo.find_all().await.unwrap(), vec![alice.clone(), bob.clone()]);

    let promoted = coworking_core::User {
        role: Role::Admin,
        ..alice.clone()
    };
    repo.update(&promoted).await.unwrap();
    assert_eq!(repo.find_by_id(alice.id).await.unwrap(), Some(promoted));

    repo.delete(bob.id).await.unwrap();
    assert_eq!(repo.find_by_id(bob.id).await.unwrap(), None);
    assert!(matches!(repo.delete(bob.id).await, Err(CoworkingError::NotFound(_))));
    assert!(matches!(repo.update(&bob).await, Err(CoworkingError::NotFound(_))));
}

/// Workspaces: id assignment, ordering, update, delete.
pub async fn workspace_repository_contract<R: WorkspaceRepository>(repo: &R) {
    let first = repo.save(&NewResource::named("Workspace 1")).await.unwrap();
    let second = repo
        .save(&NewResource {
            name: "Workspace 2".to_string(),
            available: false,
        })
        .await
        .unwrap();
    assert!(first.available);
    assert!(!second.available);
    assert!(first.id < second.id);

    assert_eq!(repo.find_all().await.unwrap(), vec![first.clone(), second.clone()]);

    let renamed = Workspace {
        name: "Window Desk".to_string(),
        ..first.clone()
    };
    assert_eq!(repo.update(&renamed).await.unwrap(), renamed);
    assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(renamed));

    repo.delete(second.id).await.unwrap();
    assert_eq!(repo.find_by_id(second.id).await.unwrap(), None);

    let ghost = NewResource::named("Ghost").into_workspace(WorkspaceId::new(9_999));
    assert!(matches!(repo.update(&ghost).await, Err(CoworkingError::NotFound(_))));
    assert!(matches!(repo.delete(ghost.id).await, Err(CoworkingError::NotFound(_))));
}

/// Conference rooms: same contract as workspaces.
pub async fn conference_room_repository_contract<R: ConferenceRoomRepository>(repo: &R) {
    let first = repo.save(&NewResource::named("Conference Room 1")).await.unwrap();
    let second = repo.save(&NewResource::named("Conference Room 2")).await.unwrap();
    assert!(first.id < second.id);
    assert_eq!(repo.find_all().await.unwrap(), vec![first.clone(), second.clone()]);

    let closed = ConferenceRoom {
        available: false,
        ..second.clone()
    };
    repo.update(&closed).await.unwrap();
    assert_eq!(repo.find_by_id(second.id).await.unwrap(), Some(closed));

    repo.delete(first.id).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 1);

    let ghost = NewResource::named("Ghost").into_conference_room(ConferenceRoomId::new(9_999));
    assert!(matches!(repo.update(&ghost).await, Err(CoworkingError::NotFound(_))));
    assert!(matches!(repo.delete(ghost.id).await, Err(CoworkingError::NotFound(_))));
}

/// Bookings: conflict detection, storage-level overlap guard, update, delete.
///
/// `owner` must be a user the repository accepts as booking owner.
pub async fn booking_repository_contract<R: BookingRepository>(repo: &R, owner: UserId) {
    let desk = ResourceRef::Workspace(WorkspaceId::new(1));
    let room = ResourceRef::ConferenceRoom(ConferenceRoomId::new(1));
    let request = |resource: ResourceRef, from: (u32, u32), to: (u32, u32)| NewBooking {
        user_id: owner,
        resource,
        slot: slot(at(2025, 3, 10, from.0, from.1), at(2025, 3, 10, to.0, to.1)),
    };

    let morning = repo.save(&request(desk, (10, 0), (11, 0))).await.unwrap();
    assert_eq!(morning.user_id, owner);
    assert_eq!(morning.resource, desk);

    // Overlap on the same resource only, half-open.
    assert!(repo.is_conflict(&request(desk, (10, 30), (11, 30))).await.unwrap());
    assert!(repo.is_conflict(&request(desk, (9, 0), (12, 0))).await.unwrap());
    assert!(!repo.is_conflict(&request(desk, (11, 0), (12, 0))).await.unwrap());
    assert!(!repo.is_conflict(&request(desk, (9, 0), (10, 0))).await.unwrap());
    assert!(!repo.is_conflict(&request(room, (10, 0), (11, 0))).await.unwrap());

    assert_eq!(
        repo.save(&request(desk, (10, 30), (11, 30))).await,
        Err(CoworkingError::booking_conflict())
    );

    let same_time_room = repo.save(&request(room, (10, 0), (11, 0))).await.unwrap();
    let noon = repo.save(&request(desk, (11, 0), (12, 0))).await.unwrap();
    assert_eq!(
        repo.find_all().await.unwrap(),
        vec![morning.clone(), same_time_room.clone(), noon.clone()]
    );

    assert_eq!(
        repo.update(&Booking {
            slot: morning.slot,
            ..noon.clone()
        })
        .await,
        Err(CoworkingError::booking_conflict())
    );
    assert_eq!(repo.find_by_id(noon.id).await.unwrap(), Some(noon.clone()));

    let moved = Booking {
        slot: slot(at(2025, 3, 11, 9, 0), at(2025, 3, 11, 10, 0)),
        ..morning.clone()
    };
    repo.update(&moved).await.unwrap();
    assert_eq!(repo.find_by_id(morning.id).await.unwrap(), Some(moved));
    assert!(!repo.is_conflict(&request(desk, (10, 0), (11, 0))).await.unwrap());

    repo.delete(noon.id).await.unwrap();
    assert_eq!(repo.find_by_id(noon.id).await.unwrap(), None);
    assert_eq!(
        repo.delete(noon.id).await,
        Err(CoworkingError::not_found("Booking not found."))
    );
    assert_eq!(repo.find_by_id(BookingId::new(9_999)).await.unwrap(), None);
}
