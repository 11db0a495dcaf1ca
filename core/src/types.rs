//! Domain types for coworking reservations.
//!
//! Users book resources (workspaces and conference rooms) for half-open time
//! slots. Resources are referenced through [`ResourceRef`], which carries the
//! resource kind alongside the id, so a workspace and a conference room that
//! happen to share a numeric id are never confused.

use crate::error::{CoworkingError, Result};
use crate::password::HashedPassword;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw storage id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw storage id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user
    UserId
);
entity_id!(
    /// Identifier of a workspace
    WorkspaceId
);
entity_id!(
    /// Identifier of a conference room
    ConferenceRoomId
);
entity_id!(
    /// Identifier of a booking
    BookingId
);

// ═══════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════

/// Role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular user: can book and cancel own bookings.
    User,
    /// Administrator: manages inventory and sees every booking.
    Admin,
}

impl Role {
    /// Storage representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns [`CoworkingError::InvalidArgument`] for an unknown role.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(CoworkingError::InvalidArgument(format!("Unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Unique identifier, assigned on registration
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Salted password hash
    pub password_hash: HashedPassword,
    /// Role of the user
    pub role: Role,
}

impl User {
    /// Returns `true` if the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name
    pub username: String,
    /// Salted password hash
    pub password_hash: HashedPassword,
    /// Role of the user
    pub role: Role,
}

impl NewUser {
    /// Attach the id assigned by the repository.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Resources
// ═══════════════════════════════════════════════════════════════════════

/// A bookable desk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier
    pub id: WorkspaceId,
    /// Display name
    pub name: String,
    /// Stored availability flag. Not authoritative: availability on a given
    /// day is derived from bookings.
    pub available: bool,
}

/// A bookable conference room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceRoom {
    /// Unique identifier
    pub id: ConferenceRoomId,
    /// Display name
    pub name: String,
    /// Stored availability flag, see [`Workspace::available`]
    pub available: bool,
}

/// Fields of a resource that has not been stored yet.
///
/// Workspaces and conference rooms share the same shape; the repository it is
/// saved into decides which one it becomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    /// Display name
    pub name: String,
    /// Stored availability flag
    pub available: bool,
}

impl NewResource {
    /// A new resource, flagged available.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
        }
    }

    /// Attach a workspace id.
    #[must_use]
    pub fn into_workspace(self, id: WorkspaceId) -> Workspace {
        Workspace {
            id,
            name: self.name,
            available: self.available,
        }
    }

    /// Attach a conference room id.
    #[must_use]
    pub fn into_conference_room(self, id: ConferenceRoomId) -> ConferenceRoom {
        ConferenceRoom {
            id,
            name: self.name,
            available: self.available,
        }
    }
}

/// Kind of a bookable resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A desk
    Workspace,
    /// A meeting room
    ConferenceRoom,
}

impl ResourceKind {
    /// Storage representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::ConferenceRoom => "conference_room",
        }
    }

    /// Parse a kind from its storage representation.
    ///
    /// Accepts a few spellings (`conference-room`, `room`, `w`, `c`) so the
    /// console can reuse it.
    ///
    /// # Errors
    ///
    /// Returns [`CoworkingError::InvalidArgument`] for an unknown kind.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workspace" | "w" => Ok(Self::Workspace),
            "conference_room" | "conference-room" | "conference room" | "room" | "c" => {
                Ok(Self::ConferenceRoom)
            }
            other => Err(CoworkingError::InvalidArgument(format!(
                "Unknown resource type: {other}"
            ))),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace => f.write_str("workspace"),
            Self::ConferenceRoom => f.write_str("conference room"),
        }
    }
}

/// Typed reference to a bookable resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceRef {
    /// A workspace
    Workspace(WorkspaceId),
    /// A conference room
    ConferenceRoom(ConferenceRoomId),
}

impl ResourceRef {
    /// Build a reference from a kind and a raw id (as stored in a table row).
    #[must_use]
    pub const fn from_parts(kind: ResourceKind, id: i64) -> Self {
        match kind {
            ResourceKind::Workspace => Self::Workspace(WorkspaceId::new(id)),
            ResourceKind::ConferenceRoom => Self::ConferenceRoom(ConferenceRoomId::new(id)),
        }
    }

    /// Kind of the referenced resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Workspace(_) => ResourceKind::Workspace,
            Self::ConferenceRoom(_) => ResourceKind::ConferenceRoom,
        }
    }

    /// Raw id of the referenced resource, meaningful only together with [`Self::kind`].
    #[must_use]
    pub const fn raw_id(&self) -> i64 {
        match self {
            Self::Workspace(id) => id.get(),
            Self::ConferenceRoom(id) => id.get(),
        }
    }
}

impl From<WorkspaceId> for ResourceRef {
    fn from(id: WorkspaceId) -> Self {
        Self::Workspace(id)
    }
}

impl From<ConferenceRoomId> for ResourceRef {
    fn from(id: ConferenceRoomId) -> Self {
        Self::ConferenceRoom(id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind(), self.raw_id())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bookings
// ═══════════════════════════════════════════════════════════════════════

/// A half-open `[start, end)` interval with `start < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawTimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = CoworkingError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeSlot {
    /// Create a slot.
    ///
    /// # Errors
    ///
    /// Returns [`CoworkingError::InvalidArgument`] unless `start` is strictly before `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(CoworkingError::invalid_argument(
                "Start time must be before end time",
            ));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar date the slot starts on.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// The conflict predicate: `self.end > other.start && self.start < other.end`.
    ///
    /// Back-to-back slots (one ends exactly when the other starts) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.end > other.start && self.start < other.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%dT%H:%M"),
            self.end.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// A stored booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Owner of the booking
    pub user_id: UserId,
    /// Booked resource
    pub resource: ResourceRef,
    /// Booked interval
    pub slot: TimeSlot,
}

impl Booking {
    /// Start of the booking.
    #[must_use]
    pub const fn start_time(&self) -> NaiveDateTime {
        self.slot.start()
    }

    /// End of the booking.
    #[must_use]
    pub const fn end_time(&self) -> NaiveDateTime {
        self.slot.end()
    }

    /// Whether the booking starts on `date`.
    #[must_use]
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.slot.start_date() == date
    }

    /// Whether this booking would collide with `candidate`.
    #[must_use]
    pub fn conflicts_with(&self, candidate: &NewBooking) -> bool {
        self.resource == candidate.resource && self.slot.overlaps(&candidate.slot)
    }
}

/// A booking request that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    /// Owner of the booking
    pub user_id: UserId,
    /// Booked resource
    pub resource: ResourceRef,
    /// Booked interval
    pub slot: TimeSlot,
}

impl NewBooking {
    /// Attach the id assigned by the repository.
    #[must_use]
    pub const fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            resource: self.resource,
            slot: self.slot,
        }
    }
}

/// Optional criteria for listing bookings. Absent criteria match everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Match bookings starting on this date
    pub date: Option<NaiveDate>,
    /// Match bookings owned by this user
    pub user_id: Option<UserId>,
    /// Match bookings of this resource
    pub resource: Option<ResourceRef>,
}

impl BookingFilter {
    /// A filter that matches every booking.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            date: None,
            user_id: None,
            resource: None,
        }
    }

    /// Restrict to bookings starting on `date`.
    #[must_use]
    pub const fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Restrict to bookings owned by `user_id`.
    #[must_use]
    pub const fn by_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restrict to bookings of `resource`.
    #[must_use]
    pub const fn for_resource(mut self, resource: ResourceRef) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Whether `booking` satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        self.date.is_none_or(|date| booking.starts_on(date))
            && self.user_id.is_none_or(|id| booking.user_id == id)
            && self.resource.is_none_or(|resource| booking.resource == resource)
    }
}
