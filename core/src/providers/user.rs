//! User repository trait.

use crate::error::Result;
use crate::types::{NewUser, User, UserId};

/// User repository.
pub trait UserRepository: Send + Sync {
    /// Store a new user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Username already taken → `CoworkingError::AlreadyExists`
    fn save(&self, user: &NewUser) -> impl std::future::Future<Output = Result<User>> + Send;

    /// Get user by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>>> + Send;

    /// Get user by username (exact match).
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>>> + Send;

    /// All users, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<User>>> + Send;

    /// Replace the stored user with the same id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - User not found → `CoworkingError::NotFound`
    fn update(&self, user: &User) -> impl std::future::Future<Output = Result<User>> + Send;

    /// Delete user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - User not found → `CoworkingError::NotFound`
    fn delete(&self, id: UserId) -> impl std::future::Future<Output = Result<()>> + Send;
}
