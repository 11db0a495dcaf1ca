//! Inventory management for workspaces and conference rooms.
//!
//! Mutations are gated by the configured [`ManagementPolicy`]; listing and
//! lookup are open to everyone.

use coworking_core::providers::{ConferenceRoomRepository, WorkspaceRepository};
use coworking_core::{
    ConferenceRoom, ConferenceRoomId, CoworkingError, ManagementPolicy, NewResource, Result, User,
    Workspace, WorkspaceId,
};

fn authorize(policy: ManagementPolicy, user: Option<&User>, what: &str) -> Result<()> {
    if policy.permits(user) {
        return Ok(());
    }

    tracing::warn!(
        user_id = ?user.map(|user| user.id),
        %policy,
        "Inventory change refused"
    );
    Err(CoworkingError::permission_denied(format!(
        "Only {} can manage {what}",
        policy.subject()
    )))
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoworkingError::invalid_argument("Name must not be blank"));
    }
    Ok(())
}

/// Workspace inventory service.
#[derive(Debug, Clone)]
pub struct WorkspaceService<W> {
    workspaces: W,
    policy: ManagementPolicy,
}

impl<W: WorkspaceRepository> WorkspaceService<W> {
    /// Create a service enforcing `policy` on mutations.
    #[must_use]
    pub const fn new(workspaces: W, policy: ManagementPolicy) -> Self {
        Self { workspaces, policy }
    }

    /// Add a workspace.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if the policy refuses `user`, `InvalidArgument` for
    /// a blank name, `DatabaseError` on storage failure.
    pub async fn add(&self, user: Option<&User>, workspace: NewResource) -> Result<Workspace> {
        authorize(self.policy, user, "workspaces")?;
        require_name(&workspace.name)?;

        let workspace = self.workspaces.save(&workspace).await?;
        tracing::info!(workspace_id = %workspace.id, name = %workspace.name, "Workspace added");
        Ok(workspace)
    }

    /// Replace a workspace's name and availability flag.
    ///
    /// # Errors
    ///
    /// As [`Self::add`], plus `NotFound` for an unknown id.
    pub async fn update(&self, user: Option<&User>, workspace: Workspace) -> Result<Workspace> {
        authorize(self.policy, user, "workspaces")?;
        require_name(&workspace.name)?;

        let workspace = self.workspaces.update(&workspace).await?;
        tracing::info!(workspace_id = %workspace.id, "Workspace updated");
        Ok(workspace)
    }

    /// Delete a workspace. Existing bookings of it are kept.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if the policy refuses `user`, `NotFound` for an
    /// unknown id, `DatabaseError` on storage failure.
    pub async fn delete(&self, user: Option<&User>, id: WorkspaceId) -> Result<()> {
        authorize(self.policy, user, "workspaces")?;

        self.workspaces.delete(id).await?;
        tracing::info!(workspace_id = %id, "Workspace deleted");
        Ok(())
    }

    /// Every workspace, ordered by id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn list_all(&self) -> Result<Vec<Workspace>> {
        self.workspaces.find_all().await
    }

    /// Look a workspace up by id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn find(&self, id: WorkspaceId) -> Result<Option<Workspace>> {
        self.workspaces.find_by_id(id).await
    }
}

/// Conference room inventory service.
#[derive(Debug, Clone)]
pub struct ConferenceRoomService<C> {
    rooms: C,
    policy: ManagementPolicy,
}

impl<C: ConferenceRoomRepository> ConferenceRoomService<C> {
    /// Create a service enforcing `policy` on mutations.
    #[must_use]
    pub const fn new(rooms: C, policy: ManagementPolicy) -> Self {
        Self { rooms, policy }
    }

    /// Add a conference room.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if the policy refuses `user`, `InvalidArgument` for
    /// a blank name, `DatabaseError` on storage failure.
    pub async fn add(&self, user: Option<&User>, room: NewResource) -> Result<ConferenceRoom> {
        authorize(self.policy, user, "conference rooms")?;
        require_name(&room.name)?;

        let room = self.rooms.save(&room).await?;
        tracing::info!(room_id = %room.id, name = %room.name, "Conference room added");
        Ok(room)
    }

    /// Replace a conference room's name and availability flag.
    ///
    /// # Errors
    ///
    /// As [`Self::add`], plus `NotFound` for an unknown id.
    pub async fn update(&self, user: Option<&User>, room: ConferenceRoom) -> Result<ConferenceRoom> {
        authorize(self.policy, user, "conference rooms")?;
        require_name(&room.name)?;

        let room = self.rooms.update(&room).await?;
        tracing::info!(room_id = %room.id, "Conference room updated");
        Ok(room)
    }

    /// Delete a conference room. Existing bookings of it are kept.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if the policy refuses `user`, `NotFound` for an
    /// unknown id, `DatabaseError` on storage failure.
    pub async fn delete(&self, user: Option<&User>, id: ConferenceRoomId) -> Result<()> {
        authorize(self.policy, user, "conference rooms")?;

        self.rooms.delete(id).await?;
        tracing::info!(room_id = %id, "Conference room deleted");
        Ok(())
    }

    /// Every conference room, ordered by id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn list_all(&self) -> Result<Vec<ConferenceRoom>> {
        self.rooms.find_all().await
    }

    /// Look a conference room up by id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn find(&self, id: ConferenceRoomId) -> Result<Option<ConferenceRoom>> {
        self.rooms.find_by_id(id).await
    }
}
