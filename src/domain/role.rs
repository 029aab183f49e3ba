//! Admin roles and the resolved identity of a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Role stored in `user_roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Can manage services, queues and the gallery.
    Admin,
    /// Admin who can also read the activity log.
    Superadmin,
}

impl AdminRole {
    /// Column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(other.to_string()),
        }
    }
}

/// Outcome of a role lookup for an optional session.
///
/// Mirrors what every admin page needs to know: who is asking, with which
/// role, and whether the superadmin-only views should be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRole {
    /// Authenticated user, if any.
    pub user: Option<UserId>,
    /// Role row for that user, if any.
    pub role: Option<AdminRole>,
    /// Shorthand for `role == Some(Superadmin)`.
    pub is_superadmin: bool,
}

impl UserRole {
    /// Lookup result for a request without a verified session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            role: None,
            is_superadmin: false,
        }
    }

    /// Lookup result for an authenticated user.
    #[must_use]
    pub fn resolved(user: UserId, role: Option<AdminRole>) -> Self {
        Self {
            user: Some(user),
            role,
            is_superadmin: role == Some(AdminRole::Superadmin),
        }
    }
}

/// An authenticated user holding an admin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminIdentity {
    /// The user.
    pub user_id: UserId,
    /// Their role.
    pub role: AdminRole,
    /// Whether the role is `superadmin`.
    pub is_superadmin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_flags_superadmin() {
        let user = UserId::new();
        assert!(UserRole::resolved(user, Some(AdminRole::Superadmin)).is_superadmin);
        assert!(!UserRole::resolved(user, Some(AdminRole::Admin)).is_superadmin);
        assert!(!UserRole::resolved(user, None).is_superadmin);
    }

    #[test]
    fn role_parses_column_values() {
        assert_eq!("superadmin".parse::<AdminRole>(), Ok(AdminRole::Superadmin));
        assert!("owner".parse::<AdminRole>().is_err());
    }
}
