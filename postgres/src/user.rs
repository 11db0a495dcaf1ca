//! `PostgreSQL` user repository.

use crate::query_failed;
use coworking_core::providers::UserRepository;
use coworking_core::{CoworkingError, HashedPassword, NewUser, Result, Role, User, UserId};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = CoworkingError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = Role::parse(&row.role).map_err(|_| {
            CoworkingError::DatabaseError(format!("Unknown role `{}` for user {}", row.role, row.id))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: HashedPassword::from_phc(row.password_hash),
            role,
        })
    }
}

fn user_exists_on_unique_violation(err: sqlx::Error) -> CoworkingError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return CoworkingError::AlreadyExists("User already exists".to_string());
        }
    }
    query_failed("store user")(err)
}

/// `PostgreSQL` user repository.
#[derive(Clone, Debug)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO coworking_service.users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role
            ",
        )
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(user_exists_on_unique_violation)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, role FROM coworking_service.users WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("get user"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, role FROM coworking_service.users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("get user by username"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, role FROM coworking_service.users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("list users"))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: &User) -> Result<User> {
        let result = sqlx::query(
            r"
            UPDATE coworking_service.users
            SET username = $2, password_hash = $3, role = $4
            WHERE id = $1
            ",
        )
        .bind(user.id.get())
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(user_exists_on_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("User not found"));
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM coworking_service.users WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete user"))?;

        if result.rows_affected() == 0 {
            return Err(CoworkingError::not_found("User not found"));
        }
        Ok(())
    }
}
