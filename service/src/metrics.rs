//! Business metrics for coworking reservations.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `coworking_bookings_total{status}` - Bookings by status (created, rejected, cancelled)
//! - `coworking_users_registered_total` - Successful registrations
//! - `coworking_logins_total{outcome}` - Login attempts by outcome (succeeded, failed)
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! binary installs a recorder.

use metrics::describe_counter;

/// Register all metric descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_business_metrics() {
    describe_counter!(
        "coworking_bookings_total",
        "Total number of bookings by status (created, rejected, cancelled)"
    );
    describe_counter!(
        "coworking_users_registered_total",
        "Total number of registered users"
    );
    describe_counter!(
        "coworking_logins_total",
        "Total number of login attempts by outcome (succeeded, failed)"
    );

    tracing::debug!("Business metrics registered");
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record a stored booking.
pub fn record_booking_created() {
    metrics::counter!("coworking_bookings_total", "status" => "created").increment(1);
}

/// Record a booking request refused for `reason` (`invalid_slot`,
/// `unknown_resource`, `conflict`).
pub fn record_booking_rejected(reason: &'static str) {
    metrics::counter!("coworking_bookings_total", "status" => "rejected", "reason" => reason)
        .increment(1);
    tracing::debug!(reason, "Recorded booking_rejected metric");
}

/// Record a cancelled booking.
pub fn record_booking_cancelled() {
    metrics::counter!("coworking_bookings_total", "status" => "cancelled").increment(1);
}

/// Record a registration.
pub fn record_user_registered() {
    metrics::counter!("coworking_users_registered_total").increment(1);
}

/// Record a login attempt.
pub fn record_login(succeeded: bool) {
    let outcome = if succeeded { "succeeded" } else { "failed" };
    metrics::counter!("coworking_logins_total", "outcome" => outcome).increment(1);
}
