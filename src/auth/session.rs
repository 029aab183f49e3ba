//! Axum extractors enforcing the admin and superadmin gates.
//!
//! Adding [`AdminSession`] or [`SuperadminSession`] to a handler's
//! arguments is the whole authorization story: the extractor verifies the
//! token, looks up the role and rejects with a redirect when the gate
//! fails.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::{AdminIdentity, UserId};
use crate::error::AdminError;

/// A request made by a user holding `admin` or `superadmin`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession(pub AdminIdentity);

impl AdminSession {
    /// The acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = state.tokens.verify_parts(parts);
        state.access.require_admin(user).await.map(Self)
    }
}

/// A request made by a user holding `superadmin`.
#[derive(Debug, Clone, Copy)]
pub struct SuperadminSession(pub AdminIdentity);

impl FromRequestParts<AppState> for SuperadminSession {
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = state.tokens.verify_parts(parts);
        state.access.require_superadmin(user).await.map(Self)
    }
}
