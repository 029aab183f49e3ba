//! Gallery tag handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{ListResponse, TagRequest};
use crate::api::extract::{AppJson, AppPath};
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::{GalleryTag, TagId};
use crate::error::{AdminError, ErrorResponse};

/// `GET /gallery/tags` — All tags by name.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/gallery/tags",
    tag = "Gallery",
    summary = "List tags",
    responses(
        (status = 200, description = "Tags ordered by name", body = ListResponse<GalleryTag>),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn list_tags(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AdminError> {
    let tags = state.gallery.list_tags().await?;
    Ok(Json(ListResponse::from(tags)))
}

/// `POST /gallery/tags` — Create a tag.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a blank name,
/// [`AdminError::Conflict`] for a duplicate, or the store error.
#[utoipa::path(
    post,
    path = "/api/v1/gallery/tags",
    tag = "Gallery",
    summary = "Create a tag",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = GalleryTag),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 409, description = "Duplicate name", body = ErrorResponse),
    )
)]
pub async fn create_tag(
    session: AdminSession,
    State(state): State<AppState>,
    AppJson(req): AppJson<TagRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let tag = state.gallery.create_tag(session.user_id(), &req.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// `PUT /gallery/tags/{id}` — Rename a tag.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a blank name,
/// [`AdminError::NotFound`] for an unknown id,
/// [`AdminError::Conflict`] for a duplicate, or the store error.
#[utoipa::path(
    put,
    path = "/api/v1/gallery/tags/{id}",
    tag = "Gallery",
    summary = "Rename a tag",
    params(
        ("id" = uuid::Uuid, Path, description = "Tag UUID"),
    ),
    request_body = TagRequest,
    responses(
        (status = 204, description = "Tag renamed"),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 409, description = "Duplicate name", body = ErrorResponse),
    )
)]
pub async fn rename_tag(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<TagId>,
    AppJson(req): AppJson<TagRequest>,
) -> Result<impl IntoResponse, AdminError> {
    state
        .gallery
        .rename_tag(session.user_id(), id, &req.name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /gallery/tags/{id}` — Delete a tag and its links.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    delete,
    path = "/api/v1/gallery/tags/{id}",
    tag = "Gallery",
    summary = "Delete a tag",
    params(
        ("id" = uuid::Uuid, Path, description = "Tag UUID"),
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found", body = ErrorResponse),
    )
)]
pub async fn delete_tag(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<TagId>,
) -> Result<impl IntoResponse, AdminError> {
    state.gallery.delete_tag(session.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tag routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gallery/tags", get(list_tags).post(create_tag))
        .route("/gallery/tags/{id}", put(rename_tag).delete(delete_tag))
}
