//! In-memory user repository.

use super::Table;
use crate::error::{CoworkingError, Result};
use crate::providers::UserRepository;
use crate::types::{NewUser, User, UserId};
use std::future::Future;

const USER_NOT_FOUND: &str = "User not found";

/// In-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Table<User>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: &NewUser) -> impl Future<Output = Result<User>> + Send {
        let users = self.users.clone();
        let user = user.clone();

        async move {
            let mut rows = users.lock()?;

            if rows.values().any(|existing| existing.username == user.username) {
                return Err(CoworkingError::AlreadyExists("User already exists".to_string()));
            }

            Ok(rows.insert(|id| user.with_id(UserId::new(id))))
        }
    }

    fn find_by_id(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = self.users.clone();

        async move { Ok(users.lock()?.get(id.get())) }
    }

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = self.users.clone();
        let username = username.to_string();

        async move {
            Ok(users
                .lock()?
                .values()
                .find(|user| user.username == username)
                .cloned())
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
        let users = self.users.clone();

        async move { Ok(users.lock()?.all()) }
    }

    fn update(&self, user: &User) -> impl Future<Output = Result<User>> + Send {
        let users = self.users.clone();
        let user = user.clone();

        async move {
            let mut rows = users.lock()?;

            if rows
                .values()
                .any(|other| other.id != user.id && other.username == user.username)
            {
                return Err(CoworkingError::AlreadyExists("User already exists".to_string()));
            }

            rows.replace(user.id.get(), user, USER_NOT_FOUND)
        }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<()>> + Send {
        let users = self.users.clone();

        async move { users.lock()?.remove(id.get(), USER_NOT_FOUND) }
    }
}
