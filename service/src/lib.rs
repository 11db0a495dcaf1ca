//! # Coworking Service
//!
//! Application services for coworking reservations.
//!
//! Each service is generic over the repository traits of `coworking-core`,
//! so the same code runs against the in-memory tables and `PostgreSQL`:
//!
//! - [`UserService`]: registration and login
//! - [`WorkspaceService`], [`ConferenceRoomService`]: inventory, gated by a
//!   [`ManagementPolicy`](coworking_core::ManagementPolicy)
//! - [`BookingService`]: availability, conflict-checked booking, listings,
//!   cancellation
//!
//! Errors are [`CoworkingError`](coworking_core::CoworkingError) values whose
//! messages are meant to be shown to the user as they are.

pub mod booking;
pub mod metrics;
pub mod resource;
pub mod seed;
pub mod user;

pub use booking::BookingService;
pub use resource::{ConferenceRoomService, WorkspaceService};
pub use seed::{SeedReport, ensure_admin, seed_demo_data};
pub use user::UserService;
