//! Startup data: demo accounts and inventory, plus an optional bootstrap admin.
//!
//! Seeding is idempotent. Existing usernames are skipped and inventory is
//! only added to an empty catalogue, so restarting against a persistent
//! database does not duplicate anything.

use crate::{ConferenceRoomService, UserService, WorkspaceService};
use coworking_core::providers::{ConferenceRoomRepository, UserRepository, WorkspaceRepository};
use coworking_core::{CoworkingError, NewResource, Result, Role};

/// Demo admin account.
pub const DEMO_ADMIN: (&str, &str) = ("admin", "adminPass");
/// Demo regular account.
pub const DEMO_USER: (&str, &str) = ("user", "userPass");
/// Demo workspaces.
pub const DEMO_WORKSPACES: [&str; 2] = ["Workspace 1", "Workspace 2"];
/// Demo conference rooms.
pub const DEMO_CONFERENCE_ROOMS: [&str; 2] = ["Conference Room 1", "Conference Room 2"];

/// What a seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Accounts registered
    pub users: usize,
    /// Workspaces added
    pub workspaces: usize,
    /// Conference rooms added
    pub conference_rooms: usize,
}

/// Register an account unless the username is taken. Returns whether it was created.
async fn register_if_absent<U: UserRepository>(
    users: &UserService<U>,
    username: &str,
    password: &str,
    role: Role,
) -> Result<bool> {
    match users.register_user(username, password, role).await {
        Ok(_) => Ok(true),
        Err(CoworkingError::AlreadyExists(_)) => {
            tracing::debug!(username, "Seed account already present");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Populate the demo accounts and inventory.
///
/// Inventory is added through the resource services as the demo admin, so
/// the management policy applies as for any other caller.
///
/// # Errors
///
/// Propagates storage and hashing failures.
pub async fn seed_demo_data<U, W, C>(
    users: &UserService<U>,
    workspaces: &WorkspaceService<W>,
    rooms: &ConferenceRoomService<C>,
) -> Result<SeedReport>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: ConferenceRoomRepository,
{
    let mut report = SeedReport::default();

    for (username, password, role) in [
        (DEMO_ADMIN.0, DEMO_ADMIN.1, Role::Admin),
        (DEMO_USER.0, DEMO_USER.1, Role::User),
    ] {
        if register_if_absent(users, username, password, role).await? {
            report.users += 1;
        }
    }

    // Looked up, not logged in, so no login is recorded.
    let admin = users
        .find_by_username(DEMO_ADMIN.0)
        .await?
        .filter(|admin| admin.is_admin() && admin.password_hash.verify(DEMO_ADMIN.1));
    let Some(admin) = admin else {
        tracing::warn!("Demo admin account was changed; skipping demo inventory");
        return Ok(report);
    };

    if workspaces.list_all().await?.is_empty() {
        for name in DEMO_WORKSPACES {
            workspaces.add(Some(&admin), NewResource::named(name)).await?;
            report.workspaces += 1;
        }
    }

    if rooms.list_all().await?.is_empty() {
        for name in DEMO_CONFERENCE_ROOMS {
            rooms.add(Some(&admin), NewResource::named(name)).await?;
            report.conference_rooms += 1;
        }
    }

    tracing::info!(
        users = report.users,
        workspaces = report.workspaces,
        conference_rooms = report.conference_rooms,
        "Demo data seeded"
    );

    Ok(report)
}

/// Make sure an admin account with this username exists.
///
/// Returns whether it was created. An existing account keeps its password
/// and role.
///
/// # Errors
///
/// `InvalidArgument` for blank credentials; propagates storage and hashing
/// failures.
pub async fn ensure_admin<U: UserRepository>(
    users: &UserService<U>,
    username: &str,
    password: &str,
) -> Result<bool> {
    let created = register_if_absent(users, username, password, Role::Admin).await?;
    if created {
        tracing::info!(username, "Bootstrap admin created");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use coworking_core::ManagementPolicy;
    use coworking_core::memory::{
        InMemoryConferenceRoomRepository, InMemoryUserRepository, InMemoryWorkspaceRepository,
    };

    struct Services {
        users: UserService<InMemoryUserRepository>,
        workspaces: WorkspaceService<InMemoryWorkspaceRepository>,
        rooms: ConferenceRoomService<InMemoryConferenceRoomRepository>,
    }

    fn services() -> Services {
        Services {
            users: UserService::new(InMemoryUserRepository::new()),
            workspaces: WorkspaceService::new(
                InMemoryWorkspaceRepository::new(),
                ManagementPolicy::AdminOnly,
            ),
            rooms: ConferenceRoomService::new(
                InMemoryConferenceRoomRepository::new(),
                ManagementPolicy::AdminOnly,
            ),
        }
    }

    #[tokio::test]
    async fn seeds_demo_accounts_and_inventory() {
        let s = services();

        let report = seed_demo_data(&s.users, &s.workspaces, &s.rooms).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                users: 2,
                workspaces: 2,
                conference_rooms: 2
            }
        );
        assert_eq!(s.users.login_user("admin", "adminPass").await.unwrap().role, Role::Admin);
        assert_eq!(s.users.login_user("user", "userPass").await.unwrap().role, Role::User);
        let names: Vec<_> = s
            .rooms
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.name)
            .collect();
        assert_eq!(names, DEMO_CONFERENCE_ROOMS);
    }

    #[tokio::test]
    async fn seeding_twice_adds_nothing() {
        let s = services();
        seed_demo_data(&s.users, &s.workspaces, &s.rooms).await.unwrap();

        let second = seed_demo_data(&s.users, &s.workspaces, &s.rooms).await.unwrap();

        assert_eq!(second, SeedReport::default());
        assert_eq!(s.workspaces.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn altered_demo_admin_skips_inventory() {
        let s = services();
        s.users.register_user("admin", "adminPass", Role::User).await.unwrap();

        let report = seed_demo_data(&s.users, &s.workspaces, &s.rooms).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                users: 1,
                workspaces: 0,
                conference_rooms: 0
            }
        );
        assert!(s.workspaces.list_all().await.unwrap().is_empty());
        assert!(s.rooms.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn changed_demo_admin_password_skips_inventory() {
        let s = services();
        s.users.register_user("admin", "rotated", Role::Admin).await.unwrap();

        let report = seed_demo_data(&s.users, &s.workspaces, &s.rooms).await.unwrap();

        assert_eq!(report.workspaces, 0);
        assert!(s.rooms.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let s = services();

        assert!(ensure_admin(&s.users, "root", "toor").await.unwrap());
        assert!(!ensure_admin(&s.users, "root", "other").await.unwrap());
        assert!(s.users.login_user("root", "toor").await.unwrap().is_admin());
    }
}
