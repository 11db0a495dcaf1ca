//! Salted password hashing.
//!
//! Passwords are hashed with argon2 and a random salt; only the PHC string is
//! ever stored or compared.

use crate::error::{CoworkingError, Result};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use std::fmt;
use std::sync::LazyLock;

/// Stand-in hash checked when no account matches, so unknown usernames cost
/// one argon2 verification like known ones.
static DUMMY_HASH: LazyLock<Option<HashedPassword>> =
    LazyLock::new(|| HashedPassword::hash("coworking-dummy-password").ok());

/// An argon2 PHC string (`$argon2id$v=19$...`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`CoworkingError::InternalError`] if the hasher rejects its input.
    pub fn hash(password: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| {
                tracing::error!("failed to hash password: {}", err);
                CoworkingError::InternalError
            })?;

        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string loaded from storage.
    #[must_use]
    pub const fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    /// The PHC string, for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a plaintext password against this hash.
    ///
    /// An unparseable stored hash never verifies.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let hash = match PasswordHash::new(&self.0) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("failed to parse password hash: {}", err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }
}

impl HashedPassword {
    /// Spend one verification's worth of work on a login with no account
    /// behind it. Always `false`.
    #[must_use]
    pub fn verify_missing(password: &str) -> bool {
        if let Some(dummy) = DUMMY_HASH.as_ref() {
            let _ = dummy.verify(password);
        }
        false
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}
