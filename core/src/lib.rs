//! # Coworking Core
//!
//! Domain model and storage contracts for a coworking-space reservation system.
//!
//! Users register and log in, browse workspaces and conference rooms, and
//! book them for time slots; admins manage the inventory.
//!
//! ## Core Concepts
//!
//! - **Resource**: a [`Workspace`] or [`ConferenceRoom`], referenced through a
//!   kind-tagged [`ResourceRef`]
//! - **Booking**: a user's claim on a resource for a half-open [`TimeSlot`]
//! - **Conflict**: two bookings on the same resource whose slots overlap
//! - **Repository**: storage contract ([`providers`]) with an in-memory
//!   implementation in [`memory`]
//!
//! ## Example
//!
//! ```
//! use coworking_core::{ResourceRef, TimeSlot, WorkspaceId};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let morning = TimeSlot::new(
//!     day.and_hms_opt(9, 0, 0).unwrap(),
//!     day.and_hms_opt(12, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let afternoon = TimeSlot::new(
//!     day.and_hms_opt(12, 0, 0).unwrap(),
//!     day.and_hms_opt(17, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! // Back-to-back slots do not overlap.
//! assert!(!morning.overlaps(&afternoon));
//! assert_eq!(ResourceRef::from(WorkspaceId::new(1)).to_string(), "workspace #1");
//! ```

pub mod authorization;
pub mod environment;
pub mod error;
pub mod memory;
pub mod password;
pub mod providers;
pub mod types;

pub use authorization::{ManagementPolicy, is_admin, is_user};
pub use environment::{Clock, SystemClock};
pub use error::{CoworkingError, Result};
pub use password::HashedPassword;
pub use types::{
    Booking, BookingFilter, BookingId, ConferenceRoom, ConferenceRoomId, NewBooking, NewResource,
    NewUser, ResourceKind, ResourceRef, Role, TimeSlot, User, UserId, Workspace, WorkspaceId,
};
