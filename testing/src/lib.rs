//! # Coworking Testing
//!
//! Testing utilities shared by the coworking test suites.
//!
//! This crate provides:
//! - A fixed [`Clock`] implementation
//! - Timestamp and fixture helpers
//! - `proptest` strategies for slots and resource references
//! - Repository contract checks shared by every storage backend
//!
//! ## Example
//!
//! ```
//! use coworking_core::Clock;
//! use coworking_testing::{at, test_clock};
//!
//! let clock = test_clock();
//! assert_eq!(clock.today(), at(2025, 1, 1, 0, 0).date());
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use coworking_core::environment::Clock;

pub mod contract;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, NaiveDate, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use coworking_testing::mocks::FixedClock;
    /// use coworking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }

        // UTC date, so results do not depend on the machine's zone.
        fn today(&self) -> NaiveDate {
            self.time.date_naive()
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 12:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Fixture builders.
pub mod helpers {
    use chrono::{NaiveDate, NaiveDateTime};
    use coworking_core::{HashedPassword, NewUser, Role, TimeSlot};

    /// A calendar date.
    ///
    /// # Panics
    ///
    /// Panics on an invalid date.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    /// A local timestamp with minute precision.
    ///
    /// # Panics
    ///
    /// Panics on an invalid date or time.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        date(year, month, day)
            .and_hms_opt(hour, minute, 0)
            .expect("valid test time")
    }

    /// A slot that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn slot(start: NaiveDateTime, end: NaiveDateTime) -> TimeSlot {
        TimeSlot::new(start, end).expect("start before end")
    }

    /// An unsaved user whose stored hash is a cheap placeholder.
    ///
    /// Use it for repository tests that never verify passwords; the hash
    /// is not a PHC string and verifies against nothing.
    #[must_use]
    pub fn unhashed_user(username: &str, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: HashedPassword::from_phc(format!("unhashed:{username}")),
            role,
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use chrono::{Duration, NaiveDateTime};
    use coworking_core::{ConferenceRoomId, ResourceRef, TimeSlot, WorkspaceId};
    use proptest::prelude::*;

    use super::helpers::at;

    /// Slots of 15 minutes to 4 hours starting on a quarter hour
    /// within 2025-03-10 and 2025-03-11.
    pub fn arb_time_slot() -> impl Strategy<Value = TimeSlot> {
        (0_i64..(2 * 24 * 4), 1_i64..=16).prop_filter_map("valid slot", |(start_q, len_q)| {
            let base: NaiveDateTime = at(2025, 3, 10, 0, 0);
            let start = base + Duration::minutes(start_q * 15);
            TimeSlot::new(start, start + Duration::minutes(len_q * 15)).ok()
        })
    }

    /// References to one of three workspaces or three conference rooms.
    ///
    /// Ids overlap across kinds on purpose so tests cover tag separation.
    pub fn arb_resource_ref() -> impl Strategy<Value = ResourceRef> {
        prop_oneof![
            (1_i64..=3).prop_map(|id| ResourceRef::Workspace(WorkspaceId::new(id))),
            (1_i64..=3).prop_map(|id| ResourceRef::ConferenceRoom(ConferenceRoomId::new(id))),
        ]
    }
}

pub use helpers::{at, date, slot, unhashed_user};
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(clock.today(), date(2025, 1, 1));
    }

    proptest! {
        #[test]
        fn generated_slots_are_bounded(generated in properties::arb_time_slot()) {
            prop_assert!(generated.start() < generated.end());
            prop_assert!(generated.end() - generated.start() <= chrono::Duration::hours(4));
        }
    }
}
