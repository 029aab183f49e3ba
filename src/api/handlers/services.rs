//! Catalog handlers: list, create, toggle, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateServiceRequest, ListResponse, ToggleResponse, ToggleServiceRequest};
use crate::api::extract::{AppJson, AppPath};
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::{Service, ServiceId, ServiceOption};
use crate::error::{AdminError, ErrorResponse};

/// `GET /services` — All services, newest first.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "Services",
    summary = "List services",
    responses(
        (status = 200, description = "Services ordered by creation time, newest first", body = ListResponse<Service>),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn list_services(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AdminError> {
    let services = state.catalog.list().await?;
    Ok(Json(ListResponse::from(services)))
}

/// `GET /services/active` — Active services for the enqueue form.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/services/active",
    tag = "Services",
    summary = "List active services",
    description = "Returns `id`, `name` and `category` of active services ordered by name.",
    responses(
        (status = 200, description = "Active services", body = ListResponse<ServiceOption>),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn list_active_services(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AdminError> {
    let options = state.catalog.list_active().await?;
    Ok(Json(ListResponse::from(options)))
}

/// `POST /services` — Add a service.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] on invalid input, or the store
/// error.
#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "Services",
    summary = "Create a service",
    description = "Defaults: category `car`, price 0, duration 0, active. The name is trimmed and required.",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn create_service(
    session: AdminSession,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateServiceRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let new = req.into_new_service()?;
    let service = state.catalog.create(session.user_id(), &new).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// `POST /services/{id}/toggle` — Flip visibility.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    post,
    path = "/api/v1/services/{id}/toggle",
    tag = "Services",
    summary = "Toggle a service",
    description = "Writes the negation of `current_is_active` as submitted by the client.",
    params(
        ("id" = uuid::Uuid, Path, description = "Service UUID"),
    ),
    request_body = ToggleServiceRequest,
    responses(
        (status = 200, description = "New `is_active` value", body = ToggleResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
    )
)]
pub async fn toggle_service(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<ServiceId>,
    AppJson(req): AppJson<ToggleServiceRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let value = state
        .catalog
        .toggle(session.user_id(), id, req.current_is_active)
        .await?;
    Ok(Json(ToggleResponse { value }))
}

/// `DELETE /services/{id}` — Remove a service.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id,
/// [`AdminError::Conflict`] while queue items reference it, or the store
/// error.
#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    tag = "Services",
    summary = "Delete a service",
    params(
        ("id" = uuid::Uuid, Path, description = "Service UUID"),
    ),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Service still referenced by the queue", body = ErrorResponse),
    )
)]
pub async fn delete_service(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<ServiceId>,
) -> Result<impl IntoResponse, AdminError> {
    state.catalog.delete(session.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/active", get(list_active_services))
        .route("/services/{id}", delete(delete_service))
        .route("/services/{id}/toggle", post(toggle_service))
}
