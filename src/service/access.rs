//! Role resolution and the admin / superadmin gates.

use std::sync::Arc;

use crate::domain::{AdminIdentity, AdminRole, UserId, UserRole};
use crate::error::AdminError;
use crate::persistence::AdminStore;

/// Resolves the role of a session and enforces the access gates.
///
/// Failing gates produce [`AdminError::Unauthenticated`] (no session) or
/// [`AdminError::Forbidden`] (wrong role), which render as redirects to
/// the configured login and forbidden paths.
#[derive(Debug, Clone)]
pub struct AccessService {
    store: Arc<dyn AdminStore>,
    login_path: String,
    forbidden_path: String,
}

impl AccessService {
    /// Creates a new `AccessService`.
    #[must_use]
    pub fn new(store: Arc<dyn AdminStore>, login_path: &str, forbidden_path: &str) -> Self {
        Self {
            store,
            login_path: login_path.to_string(),
            forbidden_path: forbidden_path.to_string(),
        }
    }

    /// Looks up the role of the (optional) session user.
    ///
    /// # Errors
    ///
    /// Returns the store error if the role lookup fails.
    pub async fn get_user_role(&self, user: Option<UserId>) -> Result<UserRole, AdminError> {
        let Some(user) = user else {
            return Ok(UserRole::anonymous());
        };
        let role = self.store.role_for_user(user).await?;
        Ok(UserRole::resolved(user, role))
    }

    /// Admits `admin` and `superadmin` sessions.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthenticated`] without a session,
    /// [`AdminError::Forbidden`] without an admin role, or the store error.
    pub async fn require_admin(&self, user: Option<UserId>) -> Result<AdminIdentity, AdminError> {
        let resolved = self.get_user_role(user).await?;
        let Some(user_id) = resolved.user else {
            return Err(self.unauthenticated());
        };
        let Some(role) = resolved.role else {
            tracing::debug!(%user_id, "admin gate: no role");
            return Err(self.forbidden());
        };
        Ok(AdminIdentity {
            user_id,
            role,
            is_superadmin: resolved.is_superadmin,
        })
    }

    /// Admits `superadmin` sessions only.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthenticated`] without a session,
    /// [`AdminError::Forbidden`] for any other role, or the store error.
    pub async fn require_superadmin(
        &self,
        user: Option<UserId>,
    ) -> Result<AdminIdentity, AdminError> {
        let resolved = self.get_user_role(user).await?;
        let Some(user_id) = resolved.user else {
            return Err(self.unauthenticated());
        };
        if !resolved.is_superadmin {
            tracing::debug!(%user_id, role = ?resolved.role, "superadmin gate: refused");
            return Err(self.forbidden());
        }
        Ok(AdminIdentity {
            user_id,
            role: AdminRole::Superadmin,
            is_superadmin: true,
        })
    }

    /// Grants `role` to `user`, replacing any previous role.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write fails.
    pub async fn grant(&self, user: UserId, role: AdminRole) -> Result<(), AdminError> {
        self.store.upsert_role(user, role).await?;
        tracing::info!(%user, %role, "role granted");
        Ok(())
    }

    fn unauthenticated(&self) -> AdminError {
        AdminError::Unauthenticated {
            redirect_to: self.login_path.clone(),
        }
    }

    fn forbidden(&self) -> AdminError {
        AdminError::Forbidden {
            redirect_to: self.forbidden_path.clone(),
        }
    }
}
