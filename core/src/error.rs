//! Error types for reservation, inventory and account operations.

use thiserror::Error;

/// Result type alias for coworking operations.
pub type Result<T> = std::result::Result<T, CoworkingError>;

/// Error taxonomy shared by repositories and services.
///
/// Every variant renders as a message fit for the console, which prints
/// `Error: <message>` and carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoworkingError {
    // ═══════════════════════════════════════════════════════════
    // Request Errors
    // ═══════════════════════════════════════════════════════════

    /// The request itself is malformed or cannot be satisfied
    /// (bad time range, unknown resource, booking conflict).
    #[error("{0}")]
    InvalidArgument(String),

    /// The caller's role or ownership does not allow the operation.
    #[error("{0}")]
    PermissionDenied(String),

    /// The addressed entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An entity with the same unique key already exists.
    #[error("{0}")]
    AlreadyExists(String),

    /// Login failed. Does not say whether the username or the password was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Internal failure (poisoned lock, hashing backend).
    #[error("Internal error")]
    InternalError,
}

impl CoworkingError {
    /// Shorthand for [`CoworkingError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Shorthand for [`CoworkingError::PermissionDenied`].
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    /// Shorthand for [`CoworkingError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// The rejection of a booking that overlaps an existing one on the same resource.
    #[must_use]
    pub fn booking_conflict() -> Self {
        Self::InvalidArgument("Booking conflict detected".to_string())
    }

    /// Returns `true` if this error is caused by the request rather than the system.
    ///
    /// # Examples
    ///
    /// ```
    /// # use coworking_core::CoworkingError;
    /// assert!(CoworkingError::InvalidCredentials.is_user_error());
    /// assert!(!CoworkingError::InternalError.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::AlreadyExists(_)
                | Self::InvalidCredentials
        )
    }
}
