//! Workspace repository trait.

use crate::error::Result;
use crate::types::{NewResource, Workspace, WorkspaceId};

/// Workspace repository.
pub trait WorkspaceRepository: Send + Sync {
    /// Store a new workspace and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn save(
        &self,
        workspace: &NewResource,
    ) -> impl std::future::Future<Output = Result<Workspace>> + Send;

    /// Get workspace by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_by_id(
        &self,
        id: WorkspaceId,
    ) -> impl std::future::Future<Output = Result<Option<Workspace>>> + Send;

    /// All workspaces, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Workspace>>> + Send;

    /// Replace the stored workspace with the same id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Workspace not found → `CoworkingError::NotFound`
    fn update(
        &self,
        workspace: &Workspace,
    ) -> impl std::future::Future<Output = Result<Workspace>> + Send;

    /// Delete workspace.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Storage fails
    /// - Workspace not found → `CoworkingError::NotFound`
    fn delete(&self, id: WorkspaceId) -> impl std::future::Future<Output = Result<()>> + Send;
}
