//! Booking repository trait.

use crate::error::Result;
use crate::types::{Booking, BookingId, NewBooking};

/// Booking repository.
///
/// # Implementation Notes
///
/// - `is_conflict` is the single home of the overlap test: a candidate
///   conflicts with a stored booking on the same resource when
///   `existing.end > candidate.start && existing.start < candidate.end`
/// - Callers that need check-then-insert atomicity serialise the two calls
///   themselves; the repository does not hold a lock across them
pub trait BookingRepository: Send + Sync {
    /// Store a new booking and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Storage-level overlap guard fires → `CoworkingError::InvalidArgument`
    fn save(
        &self,
        booking: &NewBooking,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Get booking by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_by_id(
        &self,
        id: BookingId,
    ) -> impl std::future::Future<Output = Result<Option<Booking>>> + Send;

    /// All bookings, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Booking>>> + Send;

    /// Replace the stored booking with the same id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Booking not found → `CoworkingError::NotFound`
    fn update(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Delete booking.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Booking not found → `CoworkingError::NotFound`
    fn delete(&self, id: BookingId) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Whether any stored booking on the candidate's resource overlaps its slot.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn is_conflict(
        &self,
        candidate: &NewBooking,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}
