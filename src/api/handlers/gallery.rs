//! Gallery image handlers, including the multipart upload.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    CreateImageForm, ListResponse, ToggleResponse, ToggleVisibilityRequest, UpdateImageRequest,
    checkbox, required_field,
};
use crate::api::extract::{AppJson, AppPath};
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::{GalleryEntry, GalleryImage, ImageId};
use crate::error::{AdminError, ErrorResponse};
use crate::service::{ImageUpload, UploadedFile};

/// `GET /gallery` — Images with tags, newest first.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/gallery",
    tag = "Gallery",
    summary = "List gallery images",
    responses(
        (status = 200, description = "Images with their tags, newest first", body = ListResponse<GalleryEntry>),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn list_images(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AdminError> {
    let entries = state.gallery.list().await?;
    Ok(Json(ListResponse::from(entries)))
}

/// `POST /gallery` — Upload an image.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] / [`AdminError::InvalidUpload`]
/// on invalid input, then the first storage or store error.
#[utoipa::path(
    post,
    path = "/api/v1/gallery",
    tag = "Gallery",
    summary = "Upload an image",
    description = "Stores the file under `gallery/<uuid>.<ext>`, inserts the row, then links the selected tags. Steps are not rolled back on failure.",
    request_body(content = CreateImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image created", body = GalleryImage),
        (status = 400, description = "Missing title or file", body = ErrorResponse),
        (status = 500, description = "Storage or store failure", body = ErrorResponse),
    )
)]
pub async fn create_image(
    session: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AdminError> {
    let upload = read_upload(&mut multipart).await?;
    let image = state.gallery.create(session.user_id(), upload).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// `POST /gallery/{id}/visibility` — Flip visibility.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    post,
    path = "/api/v1/gallery/{id}/visibility",
    tag = "Gallery",
    summary = "Toggle image visibility",
    description = "Writes the negation of `current_is_visible` as submitted by the client.",
    params(
        ("id" = uuid::Uuid, Path, description = "Image UUID"),
    ),
    request_body = ToggleVisibilityRequest,
    responses(
        (status = 200, description = "New `is_visible` value", body = ToggleResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
pub async fn toggle_visibility(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<ImageId>,
    AppJson(req): AppJson<ToggleVisibilityRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let value = state
        .gallery
        .toggle_visibility(session.user_id(), id, req.current_is_visible)
        .await?;
    Ok(Json(ToggleResponse { value }))
}

/// `PUT /gallery/{id}` — Edit an image and replace its tags.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a blank title,
/// [`AdminError::NotFound`] for an unknown id, or the first store error.
#[utoipa::path(
    put,
    path = "/api/v1/gallery/{id}",
    tag = "Gallery",
    summary = "Update an image",
    description = "Updates title, alt text and visibility, then replaces the tag set with `selected_tags`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Image UUID"),
    ),
    request_body = UpdateImageRequest,
    responses(
        (status = 204, description = "Image updated"),
        (status = 400, description = "Blank title", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
pub async fn update_image(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<ImageId>,
    AppJson(req): AppJson<UpdateImageRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let update = req.update()?;
    state
        .gallery
        .update(session.user_id(), id, &update, &req.selected_tags)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /gallery/{id}` — Delete an image and its stored file.
///
/// # Errors
///
/// Returns [`AdminError::NotFound`] for an unknown id, or the store error.
#[utoipa::path(
    delete,
    path = "/api/v1/gallery/{id}",
    tag = "Gallery",
    summary = "Delete an image",
    description = "Removes the stored object (failures are logged only), then the row.",
    params(
        ("id" = uuid::Uuid, Path, description = "Image UUID"),
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
pub async fn delete_image(
    session: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<ImageId>,
) -> Result<impl IntoResponse, AdminError> {
    state.gallery.delete(session.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reads the upload form. Unknown fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<ImageUpload, AdminError> {
    let mut upload = ImageUpload {
        title: String::new(),
        alt_text: None,
        is_visible: false,
        file: None,
        tags: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => upload.title = field_text(field).await?,
            "alt_text" => upload.alt_text = Some(field_text(field).await?),
            "is_visible" => upload.is_visible = checkbox(&field_text(field).await?),
            "selected_tags" => {
                let raw = field_text(field).await?;
                if !raw.trim().is_empty() {
                    upload.tags.push(required_field(Some(raw.as_str()), "selected_tags")?);
                }
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;
                upload.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }
    Ok(upload)
}

async fn field_text(field: Field<'_>) -> Result<String, AdminError> {
    field.text().await.map_err(malformed)
}

fn malformed(err: axum::extract::multipart::MultipartError) -> AdminError {
    AdminError::InvalidUpload(err.body_text())
}

/// Gallery image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gallery", get(list_images).post(create_image))
        .route("/gallery/{id}", put(update_image).delete(delete_image))
        .route("/gallery/{id}/visibility", post(toggle_visibility))
}
