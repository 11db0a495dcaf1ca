//! Conference room repository trait.

use crate::error::Result;
use crate::types::{ConferenceRoom, ConferenceRoomId, NewResource};

/// Conference room repository. Same contract as
/// [`WorkspaceRepository`](super::WorkspaceRepository).
pub trait ConferenceRoomRepository: Send + Sync {
    /// Store a new conference room and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn save(
        &self,
        room: &NewResource,
    ) -> impl std::future::Future<Output = Result<ConferenceRoom>> + Send;

    /// Get conference room by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_by_id(
        &self,
        id: ConferenceRoomId,
    ) -> impl std::future::Future<Output = Result<Option<ConferenceRoom>>> + Send;

    /// All conference rooms, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<ConferenceRoom>>> + Send;

    /// Replace the stored conference room with the same id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Conference room not found → `CoworkingError::NotFound`
    fn update(
        &self,
        room: &ConferenceRoom,
    ) -> impl std::future::Future<Output = Result<ConferenceRoom>> + Send;

    /// Delete conference room.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Conference room not found → `CoworkingError::NotFound`
    fn delete(
        &self,
        id: ConferenceRoomId,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
