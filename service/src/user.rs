//! Registration and login.

use crate::metrics;
use coworking_core::providers::UserRepository;
use coworking_core::{CoworkingError, HashedPassword, NewUser, Result, Role, User};

/// Account service.
#[derive(Debug, Clone)]
pub struct UserService<U> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    /// Create a service over a user repository.
    #[must_use]
    pub const fn new(users: U) -> Self {
        Self { users }
    }

    /// Register a new account.
    ///
    /// The password is stored as a salted argon2 hash.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the username or password is blank
    /// - `AlreadyExists("User already exists")` if the username is taken
    /// - `DatabaseError`/`InternalError` on storage or hashing failure
    pub async fn register_user(&self, username: &str, password: &str, role: Role) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoworkingError::invalid_argument("Username must not be blank"));
        }
        if password.trim().is_empty() {
            return Err(CoworkingError::invalid_argument("Password must not be blank"));
        }

        if self.users.find_by_username(username).await?.is_some() {
            tracing::warn!(username, "Registration refused: username taken");
            return Err(CoworkingError::AlreadyExists("User already exists".to_string()));
        }

        let user = self
            .users
            .save(&NewUser {
                username: username.to_string(),
                password_hash: HashedPassword::hash(password)?,
                role,
            })
            .await?;

        metrics::record_user_registered();
        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");

        Ok(user)
    }

    /// Look up an account by username without recording a login attempt.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on storage failure.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.users.find_by_username(username.trim()).await
    }

    /// Authenticate by username and password.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` unless the pair matches a stored account; the
    ///   error does not say which half was wrong
    /// - `DatabaseError` on storage failure
    pub async fn login_user(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.users.find_by_username(username.trim()).await? {
            Some(user) => user.password_hash.verify(password).then_some(user),
            None => {
                // Same argon2 cost as a wrong password.
                let _ = HashedPassword::verify_missing(password);
                None
            }
        };

        metrics::record_login(user.is_some());

        match user {
            Some(user) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            None => {
                tracing::warn!(username, "Login failed");
                Err(CoworkingError::InvalidCredentials)
            }
        }
    }
}
