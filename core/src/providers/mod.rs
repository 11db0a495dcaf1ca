//! Repository traits.
//!
//! Services depend on these traits only. Two families of implementations
//! exist: the in-memory tables in [`crate::memory`] and the PostgreSQL
//! repositories in `coworking-postgres`. Both satisfy the same contract:
//!
//! - `save` assigns a fresh id and returns the stored entity
//! - `find_by_id` returns `None` for an unknown id
//! - `find_all` returns every entity ordered by id
//! - `update` and `delete` fail with [`crate::CoworkingError::NotFound`] for an unknown id

pub mod booking;
pub mod conference_room;
pub mod user;
pub mod workspace;

pub use booking::BookingRepository;
pub use conference_room::ConferenceRoomRepository;
pub use user::UserRepository;
pub use workspace::WorkspaceRepository;
