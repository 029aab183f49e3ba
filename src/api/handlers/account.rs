//! Session endpoints: who am I, and what can I open.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::DashboardResponse;
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::AdminIdentity;
use crate::error::ErrorResponse;

/// `GET /me` — Identity of the current admin session.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Account",
    summary = "Current admin",
    description = "Returns the user id and role of the session. Sessions without an admin role are redirected.",
    responses(
        (status = 200, description = "Current identity", body = AdminIdentity),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn me(AdminSession(identity): AdminSession) -> impl IntoResponse {
    Json(identity)
}

/// `GET /dashboard` — Sections of the admin home page.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Account",
    summary = "Admin home",
    description = "Lists the sections available to the session. The activity log appears for superadmins only.",
    responses(
        (status = 200, description = "Dashboard sections", body = DashboardResponse),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn dashboard(AdminSession(identity): AdminSession) -> impl IntoResponse {
    Json(DashboardResponse::for_identity(identity))
}

/// Account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/dashboard", get(dashboard))
}
