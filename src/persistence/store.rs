//! The [`AdminStore`] trait: every read and write the dashboard performs.
//!
//! Each method is one statement against one table (or a join for
//! listings). Writes take the acting user so the store can attribute its
//! audit rows. Methods that target a single row by id return `false` (or
//! `None`) when no row matched instead of failing.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    AdminRole, AuditLog, GalleryEntry, GalleryImage, GalleryImageUpdate, GalleryTag, ImageId,
    NewGalleryImage, NewQueueItem, NewService, QueueEntry, QueueItem, QueueItemId, QueueStatus,
    Service, ServiceId, ServiceOption, TagId, UserId,
};
use crate::error::AdminError;

/// Relational backend for the admin dashboard.
#[async_trait]
pub trait AdminStore: Send + Sync + fmt::Debug {
    // ── Roles ───────────────────────────────────────────────────────────

    /// Looks up the role row for `user`.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn role_for_user(&self, user: UserId) -> Result<Option<AdminRole>, AdminError>;

    /// Inserts or replaces the role row for `user`.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn upsert_role(&self, user: UserId, role: AdminRole) -> Result<(), AdminError>;

    // ── Services ────────────────────────────────────────────────────────

    /// All services, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn list_services(&self) -> Result<Vec<Service>, AdminError>;

    /// Active services ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn list_active_services(&self) -> Result<Vec<ServiceOption>, AdminError>;

    /// Inserts a service.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn insert_service(&self, actor: UserId, new: &NewService)
    -> Result<Service, AdminError>;

    /// Sets `is_active`; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn set_service_active(
        &self,
        actor: UserId,
        id: ServiceId,
        is_active: bool,
    ) -> Result<bool, AdminError>;

    /// Deletes a service; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn delete_service(&self, actor: UserId, id: ServiceId) -> Result<bool, AdminError>;

    // ── Queue ───────────────────────────────────────────────────────────

    /// Queue items joined with their service, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn list_queue(&self) -> Result<Vec<QueueEntry>, AdminError>;

    /// Inserts a queue item with status `waiting`.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn insert_queue_item(
        &self,
        actor: UserId,
        new: &NewQueueItem,
    ) -> Result<QueueItem, AdminError>;

    /// Sets the status; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn set_queue_status(
        &self,
        actor: UserId,
        id: QueueItemId,
        status: QueueStatus,
    ) -> Result<bool, AdminError>;

    /// Deletes a queue item; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn delete_queue_item(&self, actor: UserId, id: QueueItemId) -> Result<bool, AdminError>;

    // ── Tags ────────────────────────────────────────────────────────────

    /// All tags ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn list_tags(&self) -> Result<Vec<GalleryTag>, AdminError>;

    /// Inserts a tag.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn insert_tag(&self, actor: UserId, name: &str) -> Result<GalleryTag, AdminError>;

    /// Renames a tag; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn rename_tag(&self, actor: UserId, id: TagId, name: &str) -> Result<bool, AdminError>;

    /// Deletes a tag and its links; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn delete_tag(&self, actor: UserId, id: TagId) -> Result<bool, AdminError>;

    // ── Gallery ─────────────────────────────────────────────────────────

    /// Images with their tags, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn list_gallery(&self) -> Result<Vec<GalleryEntry>, AdminError>;

    /// Fetches one image row.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn get_gallery_image(&self, id: ImageId) -> Result<Option<GalleryImage>, AdminError>;

    /// Inserts an image row.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn insert_gallery_image(
        &self,
        actor: UserId,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, AdminError>;

    /// Updates title, alt text and visibility; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn update_gallery_image(
        &self,
        actor: UserId,
        id: ImageId,
        update: &GalleryImageUpdate,
    ) -> Result<bool, AdminError>;

    /// Sets `is_visible`; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn set_gallery_visible(
        &self,
        actor: UserId,
        id: ImageId,
        is_visible: bool,
    ) -> Result<bool, AdminError>;

    /// Deletes an image row and its links; `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn delete_gallery_image(&self, actor: UserId, id: ImageId) -> Result<bool, AdminError>;

    /// Removes every tag link of `image`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn unlink_image_tags(&self, image: ImageId) -> Result<u64, AdminError>;

    /// Inserts one link per tag. `tags` must not contain duplicates.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn link_image_tags(&self, image: ImageId, tags: &[TagId]) -> Result<(), AdminError>;

    // ── Audit ───────────────────────────────────────────────────────────

    /// Most recent audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    async fn recent_audit_logs(&self, limit: u32) -> Result<Vec<AuditLog>, AdminError>;
}
