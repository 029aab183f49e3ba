//! Queue handlers: list, enqueue, status change, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};

use crate::api::dto::{CreateQueueRequest, ListResponse, UpdateQueueStatusRequest};
use crate::api::extract::{AppJson, AppPath};
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::{QueueEntry, QueueItem, QueueItemId};
use crate::error::{AdminError, ErrorResponse};

/// `GET /queues` — Queue with service details, newest first.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/queues",
    tag = "Queues",
    summary = "List the queue",
    responses(
        (status = 200, description = "Queue items ordered by enqueue time, newest first", body = ListResponse<QueueEntry>),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn list_queue(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AdminError> {
    let entries = state.queue.list().await?;
    Ok(Json(ListResponse::from(entries)))
}

/// `POST /queues` — Enqueue a vehicle.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] when a field is missing,
/// [`AdminError::Conflict`] for an unknown service, or the store error.
#[utoipa::path(
    post,
    path = "/api/v1/queues",
    tag = "Queues",
    summary = "Enqueue a vehicle",
    description = "All three fields are required. New items start as `waiting`.",
    request_body = CreateQueueRequest,
    responses(
        (status = 201, description = "Queue item created", body = QueueItem),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Unknown service", body = ErrorResponse),
    )
)]
pub async fn create_queue_item(
    session: AdminSession,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateQueueRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let new = req.into_new_item()?;
    let item = state.queue.create(session.user_id(), &new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /queues/{id}/status` — Move an item through the workflow.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for an unknown status,
/// [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    put,
    path = "/api/v1/queues/{id}/status",
    tag = "Queues",
    summary = "Update queue status",
    description = "Missing status means `waiting`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Queue item UUID"),
    ),
    request_body = UpdateQueueStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Queue item not found", body = ErrorResponse),
    )
)]
pub async fn update_queue_status(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<QueueItemId>,
    AppJson(req): AppJson<UpdateQueueStatusRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let status = req.status()?;
    state
        .queue
        .update_status(session.user_id(), id, status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /queues/{id}` — Remove a queue item.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    delete,
    path = "/api/v1/queues/{id}",
    tag = "Queues",
    summary = "Delete a queue item",
    params(
        ("id" = uuid::Uuid, Path, description = "Queue item UUID"),
    ),
    responses(
        (status = 204, description = "Queue item deleted"),
        (status = 404, description = "Queue item not found", body = ErrorResponse),
    )
)]
pub async fn delete_queue_item(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<QueueItemId>,
) -> Result<impl IntoResponse, AdminError> {
    state.queue.delete(session.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Queue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/queues", get(list_queue).post(create_queue_item))
        .route("/queues/{id}", delete(delete_queue_item))
        .route("/queues/{id}/status", put(update_queue_status))
}
