//! Role predicates and the inventory management policy.

use crate::types::{Role, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `true` iff a user is present and is an admin.
#[must_use]
pub fn is_admin(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.role == Role::Admin)
}

/// `true` iff a user is present and is a regular user.
#[must_use]
pub fn is_user(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.role == Role::User)
}

/// Who may add, update and delete workspaces and conference rooms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagementPolicy {
    /// Only admins.
    #[default]
    AdminOnly,
    /// Any logged-in user, whatever the role.
    AnyRegisteredUser,
}

impl ManagementPolicy {
    /// Apply the policy to an optional caller.
    #[must_use]
    pub fn permits(self, user: Option<&User>) -> bool {
        match self {
            Self::AdminOnly => is_admin(user),
            Self::AnyRegisteredUser => user.is_some(),
        }
    }

    /// Configuration spelling of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdminOnly => "admin-only",
            Self::AnyRegisteredUser => "any-registered-user",
        }
    }

    /// Who the policy admits, for denial messages ("Only admin can ...").
    #[must_use]
    pub const fn subject(&self) -> &'static str {
        match self {
            Self::AdminOnly => "admin",
            Self::AnyRegisteredUser => "registered users",
        }
    }
}

impl fmt::Display for ManagementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown management policy `{0}` (expected `admin-only` or `any-registered-user`)")]
pub struct UnknownPolicy(pub String);

impl FromStr for ManagementPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "admin-only" | "admin" => Ok(Self::AdminOnly),
            "any-registered-user" | "registered" | "any" => Ok(Self::AnyRegisteredUser),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::password::HashedPassword;
    use crate::types::UserId;

    fn user_with(role: Role) -> User {
        User {
            id: UserId::new(1),
            username: "someone".to_string(),
            password_hash: HashedPassword::from_phc(String::new()),
            role,
        }
    }

    #[test]
    fn role_predicates() {
        let admin = user_with(Role::Admin);
        let user = user_with(Role::User);

        assert!(is_admin(Some(&admin)));
        assert!(!is_admin(Some(&user)));
        assert!(!is_admin(None));

        assert!(is_user(Some(&user)));
        assert!(!is_user(Some(&admin)));
        assert!(!is_user(None));
    }

    #[test]
    fn policies_disagree_only_on_regular_users() {
        let admin = user_with(Role::Admin);
        let user = user_with(Role::User);

        for policy in [ManagementPolicy::AdminOnly, ManagementPolicy::AnyRegisteredUser] {
            assert!(policy.permits(Some(&admin)));
            assert!(!policy.permits(None));
        }
        assert!(!ManagementPolicy::AdminOnly.permits(Some(&user)));
        assert!(ManagementPolicy::AnyRegisteredUser.permits(Some(&user)));
    }

    #[test]
    fn policy_parses_config_spellings() {
        assert_eq!(
            "admin-only".parse::<ManagementPolicy>().unwrap(),
            ManagementPolicy::AdminOnly
        );
        assert_eq!(
            "ANY_REGISTERED_USER".parse::<ManagementPolicy>().unwrap(),
            ManagementPolicy::AnyRegisteredUser
        );
        assert!("everyone".parse::<ManagementPolicy>().is_err());
        assert_eq!(ManagementPolicy::default(), ManagementPolicy::AdminOnly);
    }
}
