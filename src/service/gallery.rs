//! Gallery service: image uploads, visibility, tagging.
//!
//! Uploads and tag re-linking are multi-step sequences against two
//! independent backends (object storage and the relational store). They
//! run step by step and stop at the first failure; earlier steps are not
//! undone. An object uploaded before a failed row insert stays in the
//! bucket, and a failed re-link leaves the image with whatever links
//! were present at that point.

use std::sync::Arc;

use crate::domain::catalog::non_blank;
use crate::domain::gallery::{self, distinct_tags, object_key, required_title, tag_name};
use crate::domain::{
    AdminEvent, AdminView, ChangeKind, EventBus, GalleryEntry, GalleryImage, GalleryImageUpdate,
    GalleryTag, ImageId, NewGalleryImage, TagId, UserId,
};
use crate::error::AdminError;
use crate::persistence::AdminStore;
use crate::storage::ObjectStorage;

const IMAGES: &str = "gallery_images";
const TAGS: &str = "gallery_tags";

/// A file received from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-side file name; only its extension is kept.
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// MIME type to store the object with.
    ///
    /// The declared type wins; otherwise it is guessed from the extension.
    /// Returns `None` when the file is not recognisably an image.
    #[must_use]
    pub fn image_content_type(&self) -> Option<String> {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if declared.starts_with("image/") => Some(declared.to_string()),
            Some(declared) if !declared.is_empty() && declared != "application/octet-stream" => {
                None
            }
            _ => guess_image_type(&gallery::file_extension(&self.file_name)).map(str::to_string),
        }
    }
}

fn guess_image_type(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Input of the create-image form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Caption (trimmed, required).
    pub title: String,
    /// Accessibility text.
    pub alt_text: Option<String>,
    /// Initial visibility.
    pub is_visible: bool,
    /// The image file, if the form carried one.
    pub file: Option<UploadedFile>,
    /// Tags to link.
    pub tags: Vec<TagId>,
}

/// Orchestrates the gallery tables and the image bucket.
#[derive(Debug, Clone)]
pub struct GalleryService {
    store: Arc<dyn AdminStore>,
    storage: Arc<dyn ObjectStorage>,
    event_bus: EventBus,
    max_upload_bytes: usize,
}

impl GalleryService {
    /// Creates a new `GalleryService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn AdminStore>,
        storage: Arc<dyn ObjectStorage>,
        event_bus: EventBus,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            storage,
            event_bus,
            max_upload_bytes,
        }
    }

    // ── Tags ────────────────────────────────────────────────────────────

    /// All tags ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn list_tags(&self) -> Result<Vec<GalleryTag>, AdminError> {
        self.store.list_tags().await
    }

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// [`AdminError::InvalidRequest`] for a blank name,
    /// [`AdminError::Conflict`] for a duplicate, or the store error.
    pub async fn create_tag(&self, actor: UserId, name: &str) -> Result<GalleryTag, AdminError> {
        let name = tag_name(name)?;
        let tag = self.store.insert_tag(actor, &name).await?;
        tracing::info!(tag_id = %tag.id, %actor, name = %tag.name, "tag created");
        self.notify(ChangeKind::Created, TAGS, tag.id, actor);
        Ok(tag)
    }

    /// Renames a tag.
    ///
    /// # Errors
    ///
    /// [`AdminError::InvalidRequest`] for a blank name,
    /// [`AdminError::NotFound`] for an unknown tag,
    /// [`AdminError::Conflict`] for a duplicate, or the store error.
    pub async fn rename_tag(&self, actor: UserId, id: TagId, name: &str) -> Result<(), AdminError> {
        let name = tag_name(name)?;
        if !self.store.rename_tag(actor, id, &name).await? {
            return Err(AdminError::not_found(TAGS, id));
        }
        tracing::info!(tag_id = %id, %actor, %name, "tag renamed");
        self.notify(ChangeKind::Updated, TAGS, id, actor);
        Ok(())
    }

    /// Deletes a tag along with its image links.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for an unknown tag, or the store error.
    pub async fn delete_tag(&self, actor: UserId, id: TagId) -> Result<(), AdminError> {
        if !self.store.delete_tag(actor, id).await? {
            return Err(AdminError::not_found(TAGS, id));
        }
        tracing::info!(tag_id = %id, %actor, "tag deleted");
        self.notify(ChangeKind::Deleted, TAGS, id, actor);
        Ok(())
    }

    // ── Images ──────────────────────────────────────────────────────────

    /// Images with their tags, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn list(&self) -> Result<Vec<GalleryEntry>, AdminError> {
        self.store.list_gallery().await
    }

    /// Uploads the file, inserts the image row, then links the tags.
    ///
    /// # Errors
    ///
    /// [`AdminError::InvalidRequest`] for a blank title,
    /// [`AdminError::InvalidUpload`] for a missing, empty, oversized or
    /// non-image file, then the first storage or store error.
    pub async fn create(&self, actor: UserId, upload: ImageUpload) -> Result<GalleryImage, AdminError> {
        let title = required_title(&upload.title)?;
        let Some(file) = upload.file.filter(|f| !f.bytes.is_empty()) else {
            return Err(AdminError::InvalidUpload("an image file is required".to_string()));
        };
        if file.bytes.len() > self.max_upload_bytes {
            return Err(AdminError::InvalidUpload(format!(
                "file is {} bytes, limit is {}",
                file.bytes.len(),
                self.max_upload_bytes
            )));
        }
        let Some(content_type) = file.image_content_type() else {
            return Err(AdminError::InvalidUpload(format!(
                "{} is not an image",
                file.file_name
            )));
        };

        let key = object_key(&file.file_name);
        self.storage.upload(&key, &file.bytes, &content_type).await?;
        tracing::debug!(%key, size = file.bytes.len(), "image object stored");

        let new = NewGalleryImage {
            title,
            image_url: self.storage.public_url(&key),
            image_path: key,
            alt_text: non_blank(upload.alt_text.as_deref()),
            is_visible: upload.is_visible,
        };
        let image = self.store.insert_gallery_image(actor, &new).await?;

        let tags = distinct_tags(&upload.tags);
        if !tags.is_empty() {
            self.store.link_image_tags(image.id, &tags).await?;
        }

        tracing::info!(
            image_id = %image.id,
            %actor,
            path = %image.image_path,
            tags = tags.len(),
            "gallery image created"
        );
        self.notify(ChangeKind::Created, IMAGES, image.id, actor);
        Ok(image)
    }

    /// Writes the negation of `current_is_visible` and returns the new value.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for an unknown image, or the store error.
    pub async fn toggle_visibility(
        &self,
        actor: UserId,
        id: ImageId,
        current_is_visible: bool,
    ) -> Result<bool, AdminError> {
        let is_visible = !current_is_visible;
        if !self.store.set_gallery_visible(actor, id, is_visible).await? {
            return Err(AdminError::not_found(IMAGES, id));
        }
        tracing::info!(image_id = %id, %actor, is_visible, "gallery visibility toggled");
        self.notify(ChangeKind::Updated, IMAGES, id, actor);
        Ok(is_visible)
    }

    /// Updates the row, then replaces its tag set with `tags`.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for an unknown image, then the first store
    /// error.
    pub async fn update(
        &self,
        actor: UserId,
        id: ImageId,
        update: &GalleryImageUpdate,
        tags: &[TagId],
    ) -> Result<(), AdminError> {
        if !self.store.update_gallery_image(actor, id, update).await? {
            return Err(AdminError::not_found(IMAGES, id));
        }
        let removed = self.store.unlink_image_tags(id).await?;
        let tags = distinct_tags(tags);
        if !tags.is_empty() {
            self.store.link_image_tags(id, &tags).await?;
        }
        tracing::info!(image_id = %id, %actor, removed, linked = tags.len(), "gallery image updated");
        self.notify(ChangeKind::Updated, IMAGES, id, actor);
        Ok(())
    }

    /// Removes the stored object (best effort), then the row.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for an unknown image, or the store error.
    /// Storage failures are logged and do not stop the row delete.
    pub async fn delete(&self, actor: UserId, id: ImageId) -> Result<(), AdminError> {
        let Some(image) = self.store.get_gallery_image(id).await? else {
            return Err(AdminError::not_found(IMAGES, id));
        };
        if !image.image_path.is_empty()
            && let Err(e) = self.storage.remove(&[image.image_path.clone()]).await
        {
            tracing::warn!(image_id = %id, path = %image.image_path, error = %e, "object removal failed");
        }
        if !self.store.delete_gallery_image(actor, id).await? {
            return Err(AdminError::not_found(IMAGES, id));
        }
        tracing::info!(image_id = %id, %actor, "gallery image deleted");
        self.notify(ChangeKind::Deleted, IMAGES, id, actor);
        Ok(())
    }

    fn notify(&self, change: ChangeKind, table: &'static str, id: impl Into<uuid::Uuid>, actor: UserId) {
        let _ = self
            .event_bus
            .publish(AdminEvent::now(AdminView::Gallery, change, table, id, actor));
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::storage::MemoryObjectStorage;

    struct Fixture {
        gallery: GalleryService,
        store: Arc<MemoryStore>,
        storage: Arc<MemoryObjectStorage>,
        bus: EventBus,
        actor: UserId,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::new("http://cdn.test/storage/gallery"));
        let bus = EventBus::new(64);
        let gallery = GalleryService::new(
            Arc::clone(&store) as Arc<dyn AdminStore>,
            Arc::clone(&storage) as Arc<dyn ObjectStorage>,
            bus.clone(),
            1024,
        );
        Fixture {
            gallery,
            store,
            storage,
            bus,
            actor: UserId::new(),
        }
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: b"\x89PNG fake".to_vec(),
        }
    }

    fn upload(title: &str, file: Option<UploadedFile>, tags: Vec<TagId>) -> ImageUpload {
        ImageUpload {
            title: title.to_string(),
            alt_text: Some("  ".to_string()),
            is_visible: true,
            file,
            tags,
        }
    }

    async fn tag(f: &Fixture, name: &str) -> TagId {
        let Ok(tag) = f.gallery.create_tag(f.actor, name).await else {
            panic!("tag create failed");
        };
        tag.id
    }

    async fn tag_names(f: &Fixture, image: ImageId) -> Vec<String> {
        let Ok(entries) = f.gallery.list().await else {
            panic!("list failed");
        };
        let Some(entry) = entries.into_iter().find(|e| e.image.id == image) else {
            panic!("image missing from listing");
        };
        entry.tags.into_iter().map(|t| t.name).collect()
    }

    #[tokio::test]
    async fn create_stores_object_under_gallery_prefix() {
        let f = fixture();
        let exterior = tag(&f, "exterior").await;

        let Ok(image) = f
            .gallery
            .create(f.actor, upload(" After ", Some(png("Shiny.Car.PNG")), vec![exterior, exterior]))
            .await
        else {
            panic!("create failed");
        };

        assert_eq!(image.title, "After");
        assert_eq!(image.alt_text, None);
        assert!(image.image_path.starts_with("gallery/"));
        assert!(image.image_path.ends_with(".png"));
        assert_eq!(
            image.image_url,
            format!("http://cdn.test/storage/gallery/{}", image.image_path)
        );
        let Some(stored) = f.storage.get(&image.image_path).await else {
            panic!("object not stored");
        };
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(tag_names(&f, image.id).await, vec!["exterior"]);
    }

    #[tokio::test]
    async fn create_requires_title_and_file() {
        let f = fixture();
        let result = f.gallery.create(f.actor, upload("  ", Some(png("a.png")), vec![])).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));

        let result = f.gallery.create(f.actor, upload("Title", None, vec![])).await;
        assert!(matches!(result, Err(AdminError::InvalidUpload(_))));

        let empty = UploadedFile {
            bytes: Vec::new(),
            ..png("a.png")
        };
        let result = f.gallery.create(f.actor, upload("Title", Some(empty), vec![])).await;
        assert!(matches!(result, Err(AdminError::InvalidUpload(_))));
        assert!(f.storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_oversized_and_non_image_files() {
        let f = fixture();
        let big = UploadedFile {
            bytes: vec![0_u8; 2048],
            ..png("big.png")
        };
        let result = f.gallery.create(f.actor, upload("Big", Some(big), vec![])).await;
        assert!(matches!(result, Err(AdminError::InvalidUpload(_))));

        let pdf = UploadedFile {
            file_name: "invoice.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: b"%PDF".to_vec(),
        };
        let result = f.gallery.create(f.actor, upload("Doc", Some(pdf), vec![])).await;
        assert!(matches!(result, Err(AdminError::InvalidUpload(_))));
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        let file = UploadedFile {
            file_name: "photo.JPEG".to_string(),
            content_type: None,
            bytes: vec![1],
        };
        assert_eq!(file.image_content_type().as_deref(), Some("image/jpeg"));

        let unknown = UploadedFile {
            file_name: "noext".to_string(),
            content_type: Some("application/octet-stream".to_string()),
            bytes: vec![1],
        };
        // Falls back to the jpg extension.
        assert_eq!(unknown.image_content_type().as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn failed_row_insert_leaves_object_behind() {
        let f = fixture();
        f.store.reject_image_inserts(true);
        let mut rx = f.bus.subscribe();

        let result = f.gallery.create(f.actor, upload("Orphan", Some(png("o.png")), vec![])).await;
        assert!(matches!(result, Err(AdminError::Persistence(_))));

        assert_eq!(f.storage.keys().await.len(), 1);
        assert_eq!(f.store.image_count().await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_tag_link_keeps_row_and_object() {
        let f = fixture();
        let result = f
            .gallery
            .create(f.actor, upload("Half", Some(png("h.png")), vec![TagId::new()]))
            .await;
        assert!(matches!(result, Err(AdminError::Conflict(_))));
        assert_eq!(f.store.image_count().await, 1);
        assert_eq!(f.storage.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_tag_set_exactly() {
        let f = fixture();
        let a = tag(&f, "a").await;
        let b = tag(&f, "b").await;
        let c = tag(&f, "c").await;
        let Ok(image) = f
            .gallery
            .create(f.actor, upload("Img", Some(png("i.png")), vec![a, b]))
            .await
        else {
            panic!("create failed");
        };

        let Ok(edit) = GalleryImageUpdate::new("Renamed", Some("alt"), false) else {
            panic!("valid update");
        };
        assert!(f.gallery.update(f.actor, image.id, &edit, &[c, b]).await.is_ok());
        assert_eq!(tag_names(&f, image.id).await, vec!["b", "c"]);

        assert!(f.gallery.update(f.actor, image.id, &edit, &[]).await.is_ok());
        assert!(tag_names(&f, image.id).await.is_empty());
    }

    #[tokio::test]
    async fn toggle_visibility_negates_submitted_value() {
        let f = fixture();
        let Ok(image) = f.gallery.create(f.actor, upload("V", Some(png("v.png")), vec![])).await
        else {
            panic!("create failed");
        };
        assert_eq!(
            f.gallery.toggle_visibility(f.actor, image.id, true).await.ok(),
            Some(false)
        );
        let result = f.gallery.toggle_visibility(f.actor, ImageId::new(), true).await;
        assert!(matches!(result, Err(AdminError::NotFound { table: "gallery_images", .. })));
    }

    #[tokio::test]
    async fn delete_removes_object_and_row() {
        let f = fixture();
        let Ok(image) = f.gallery.create(f.actor, upload("D", Some(png("d.png")), vec![])).await
        else {
            panic!("create failed");
        };
        let mut rx = f.bus.subscribe();

        assert!(f.gallery.delete(f.actor, image.id).await.is_ok());
        assert!(f.storage.keys().await.is_empty());
        assert_eq!(f.store.image_count().await, 0);

        let Ok(event) = rx.try_recv() else {
            panic!("expected delete event");
        };
        assert_eq!((event.view, event.change), (AdminView::Gallery, ChangeKind::Deleted));

        let result = f.gallery.delete(f.actor, image.id).await;
        assert!(matches!(result, Err(AdminError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_survives_storage_failure() {
        let f = fixture();
        let Ok(image) = f.gallery.create(f.actor, upload("S", Some(png("s.png")), vec![])).await
        else {
            panic!("create failed");
        };
        f.storage.reject_removals(true);
        let mut rx = f.bus.subscribe();

        assert!(f.gallery.delete(f.actor, image.id).await.is_ok());
        assert_eq!(f.store.image_count().await, 0);
        assert_eq!(f.storage.keys().await, vec![image.image_path.clone()]);

        let Ok(event) = rx.try_recv() else {
            panic!("expected delete event");
        };
        assert_eq!((event.view, event.change), (AdminView::Gallery, ChangeKind::Deleted));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn deleting_a_tag_unlinks_it() {
        let f = fixture();
        let keep = tag(&f, "keep").await;
        let gone = tag(&f, "gone").await;
        let Ok(image) = f
            .gallery
            .create(f.actor, upload("T", Some(png("t.png")), vec![keep, gone]))
            .await
        else {
            panic!("create failed");
        };

        assert!(f.gallery.delete_tag(f.actor, gone).await.is_ok());
        assert_eq!(tag_names(&f, image.id).await, vec!["keep"]);

        assert!(f.gallery.rename_tag(f.actor, keep, " kept ").await.is_ok());
        assert_eq!(tag_names(&f, image.id).await, vec!["kept"]);

        let duplicate = f.gallery.create_tag(f.actor, "kept").await;
        assert!(matches!(duplicate, Err(AdminError::Conflict(_))));
    }
}
