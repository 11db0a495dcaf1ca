//! In-memory workspace repository.

use super::Table;
use crate::error::Result;
use crate::providers::WorkspaceRepository;
use crate::types::{NewResource, Workspace, WorkspaceId};
use std::future::Future;

const WORKSPACE_NOT_FOUND: &str = "Workspace not found";

/// In-memory workspace repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    workspaces: Table<Workspace>,
}

impl InMemoryWorkspaceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkspaceRepository for InMemoryWorkspaceRepository {
    fn save(&self, workspace: &NewResource) -> impl Future<Output = Result<Workspace>> + Send {
        let workspaces = self.workspaces.clone();
        let workspace = workspace.clone();

        async move {
            let mut rows = workspaces.lock()?;
            Ok(rows.insert(|id| workspace.into_workspace(WorkspaceId::new(id))))
        }
    }

    fn find_by_id(&self, id: WorkspaceId) -> impl Future<Output = Result<Option<Workspace>>> + Send {
        let workspaces = self.workspaces.clone();

        async move { Ok(workspaces.lock()?.get(id.get())) }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Workspace>>> + Send {
        let workspaces = self.workspaces.clone();

        async move { Ok(workspaces.lock()?.all()) }
    }

    fn update(&self, workspace: &Workspace) -> impl Future<Output = Result<Workspace>> + Send {
        let workspaces = self.workspaces.clone();
        let workspace = workspace.clone();

        async move {
            workspaces
                .lock()?
                .replace(workspace.id.get(), workspace, WORKSPACE_NOT_FOUND)
        }
    }

    fn delete(&self, id: WorkspaceId) -> impl Future<Output = Result<()>> + Send {
        let workspaces = self.workspaces.clone();

        async move { workspaces.lock()?.remove(id.get(), WORKSPACE_NOT_FOUND) }
    }
}
