//! Photo gallery: images, tags and the object keys images are stored under.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::non_blank;
use super::{ImageId, TagId};
use crate::error::AdminError;

/// Key prefix for every gallery object inside the bucket.
pub const OBJECT_PREFIX: &str = "gallery";

/// Extension used when the uploaded file name has none.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// A row of `gallery_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GalleryTag {
    /// Record id.
    pub id: TagId,
    /// Unique label.
    pub name: String,
}

/// A row of `gallery_images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GalleryImage {
    /// Record id.
    pub id: ImageId,
    /// Caption.
    pub title: String,
    /// Public URL of the stored object.
    pub image_url: String,
    /// Object key inside the bucket; empty for rows without a stored file.
    pub image_path: String,
    /// Accessibility text.
    pub alt_text: Option<String>,
    /// Whether customers can see the image.
    pub is_visible: bool,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// An image with its tags, for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GalleryEntry {
    /// The image row.
    #[serde(flatten)]
    pub image: GalleryImage,
    /// Linked tags ordered by name.
    pub tags: Vec<GalleryTag>,
}

/// Row values for a freshly uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGalleryImage {
    /// Caption.
    pub title: String,
    /// Public URL of the stored object.
    pub image_url: String,
    /// Object key inside the bucket.
    pub image_path: String,
    /// Accessibility text.
    pub alt_text: Option<String>,
    /// Initial visibility.
    pub is_visible: bool,
}

/// Editable image fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImageUpdate {
    /// Trimmed, non-empty caption.
    pub title: String,
    /// Trimmed accessibility text; `None` when blank.
    pub alt_text: Option<String>,
    /// New visibility.
    pub is_visible: bool,
}

impl GalleryImageUpdate {
    /// Validates and normalizes edit input.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] when the title is blank.
    pub fn new(title: &str, alt_text: Option<&str>, is_visible: bool) -> Result<Self, AdminError> {
        Ok(Self {
            title: required_title(title)?,
            alt_text: non_blank(alt_text),
            is_visible,
        })
    }
}

/// Trims an image title, rejecting blank input.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] when the title is blank.
pub fn required_title(title: &str) -> Result<String, AdminError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AdminError::InvalidRequest("image title is required".to_string()));
    }
    Ok(title.to_string())
}

/// Trims a tag name, rejecting blank input.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] when the name is blank.
pub fn tag_name(name: &str) -> Result<String, AdminError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::InvalidRequest("tag name is required".to_string()));
    }
    Ok(name.to_string())
}

/// Extension of an uploaded file name: the text after the last `.`,
/// lowercased. Falls back to [`FALLBACK_EXTENSION`] when there is no dot,
/// nothing after it, or it contains anything but ASCII alphanumerics.
#[must_use]
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| FALLBACK_EXTENSION.to_string(), str::to_ascii_lowercase)
}

/// Generates a fresh object key `gallery/<uuid-v4>.<extension>`.
#[must_use]
pub fn object_key(file_name: &str) -> String {
    format!(
        "{OBJECT_PREFIX}/{}.{}",
        uuid::Uuid::new_v4(),
        file_extension(file_name)
    )
}

/// Removes repeated tag ids, keeping first-seen order.
#[must_use]
pub fn distinct_tags(tags: &[TagId]) -> Vec<TagId> {
    let mut seen = HashSet::with_capacity(tags.len());
    tags.iter().copied().filter(|t| seen.insert(*t)).collect()
}
