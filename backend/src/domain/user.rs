//! User identity, roles, and profiles.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a UUID string into a [`UserId`].
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access level of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May review, mark read, and delete submissions across the portal.
    Admin,
    /// May submit inspections and view the listing.
    User,
}

impl Role {
    /// Storage tag for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Normalise a stored role value; unknown strings read as plain users so
    /// a bad row can never grant admin access.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile row backing role and tenant decisions.
///
/// The single source of truth for `role` and `brand`; the session cookie only
/// carries the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    /// Tenant the user is scoped to; `None` until first selection and
    /// cleared again on sign-out.
    pub brand: Option<Brand>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Whether this profile grants admin access.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Validation errors for login credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct credentials from raw request parts.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    #[case("superuser", Role::User)]
    #[case("", Role::User)]
    fn stored_roles_normalise(#[case] stored: &str, #[case] expected: Role) {
        assert_eq!(Role::from_stored(stored), expected);
    }

    #[rstest]
    fn empty_username_rejected() {
        let result = LoginCredentials::try_from_parts("  ", "secret");
        assert_eq!(result, Err(LoginValidationError::EmptyUsername));
    }

    #[rstest]
    fn empty_password_rejected() {
        let result = LoginCredentials::try_from_parts("inspector", "");
        assert_eq!(result, Err(LoginValidationError::EmptyPassword));
    }
}
