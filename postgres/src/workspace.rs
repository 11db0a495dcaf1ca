//! `PostgreSQL` workspace repository.

use crate::query_failed;
use coworking_core::providers::WorkspaceRepository;
use coworking_core::{CoworkingError, NewResource, Result, Workspace, WorkspaceId};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct WorkspaceRow {
    id: i64,
    name: String,
    available: bool,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        Self {
            id: WorkspaceId::new(row.id),
            name: row.name,
            available: row.available,
        }
    }
}

/// `PostgreSQL` workspace repository.
#[derive(Clone, Debug)]
pub struct PostgresWorkspaceRepository {
    pool: PgPool,
}

impl PostgresWorkspaceRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn save(&self, workspace: &NewResource) -> Result<Workspace> {
        let row: WorkspaceRow = sqlx::query_as(
            r"
            INSERT INTO coworking_service.workspaces (name, available)
            VALUES ($1, $2)
            RETURNING id, name, available
            ",
        )
        .bind(&workspace.name)
        .bind(workspace.available)
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed("store workspace"))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            "SELECT id, name, available FROM coworking_service.workspaces WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("get workspace"))?;

        Ok(row.map(Workspace::from))
    }

    async fn find_all(&self) -> Result<Vec<Workspace>> {
        let rows: Vec<WorkspaceRow> = sqlx::query_as(
            "SELECT id, name, available FROM coworking_service.workspaces ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("list workspaces"))?;

        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    async fn update(&self, workspace: &Workspace) -> Result<Workspace> {
        let result = sqlx::query(
            "UPDATE coworking_service.workspaces SET name = $2, available = $3 WHERE id = $1",
        )
        .bind(workspace.id.get())
        .bind(&workspace.name)
        .bind(workspace.available)
        .execute(&self.pool)
        .await
        .map_err(query_failed("update workspace"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("Workspace not found"));
        }
        Ok(workspace.clone())
    }

    async fn delete(&self, id: WorkspaceId) -> Result<()> {
        let result = sqlx::query("DELETE FROM coworking_service.workspaces WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete workspace"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("Workspace not found"));
        }
        Ok(())
    }
}
