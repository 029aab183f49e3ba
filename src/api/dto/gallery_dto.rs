//! Gallery request bodies and the multipart upload form.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{GalleryImageUpdate, TagId};
use crate::error::AdminError;

/// Request body for creating or renaming a tag.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TagRequest {
    /// Tag label (required, unique).
    #[serde(default)]
    pub name: String,
}

/// Request body for `POST /api/v1/gallery/{id}/visibility`.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct ToggleVisibilityRequest {
    /// The `is_visible` value the client is displaying; the server writes
    /// its negation.
    #[serde(default)]
    pub current_is_visible: bool,
}

/// Request body for `PUT /api/v1/gallery/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateImageRequest {
    /// Caption (required).
    #[serde(default)]
    pub title: String,
    /// Accessibility text; blank becomes null.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Visibility.
    #[serde(default)]
    pub is_visible: bool,
    /// Complete new tag set.
    #[serde(default)]
    pub selected_tags: Vec<TagId>,
}

impl UpdateImageRequest {
    /// Validates the editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for a blank title.
    pub fn update(&self) -> Result<GalleryImageUpdate, AdminError> {
        GalleryImageUpdate::new(&self.title, self.alt_text.as_deref(), self.is_visible)
    }
}

/// `multipart/form-data` fields accepted by `POST /api/v1/gallery`.
///
/// Documentation only; the handler reads the fields one by one.
#[derive(Debug, ToSchema)]
pub struct CreateImageForm {
    /// Caption (required).
    pub title: String,
    /// Accessibility text.
    pub alt_text: Option<String>,
    /// `on`, `true` or `1` for visible.
    pub is_visible: Option<String>,
    /// The image file (required, non-empty).
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Tag ids; repeat the field once per tag.
    pub selected_tags: Vec<TagId>,
}

/// Interprets an HTML checkbox value.
#[must_use]
pub fn checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_values() {
        assert!(checkbox("on"));
        assert!(checkbox("TRUE"));
        assert!(!checkbox(""));
        assert!(!checkbox("off"));
    }
}
