//! Process-local [`AdminStore`] for development and tests.
//!
//! [`MemoryStore`] keeps every table behind one [`tokio::sync::RwLock`] and
//! reproduces the relational constraints the Postgres schema declares:
//! unique tag names, foreign keys (queue → service restricts deletes,
//! image/tag links cascade), and one audit row per catalog, queue and
//! gallery write. Rows are kept in insertion order, so "newest first"
//! listings are a reverse walk.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::AdminStore;
use crate::domain::{
    AdminRole, AuditAction, AuditLog, GalleryEntry, GalleryImage, GalleryImageUpdate, GalleryTag,
    ImageId, NewGalleryImage, NewQueueItem, NewService, QueueEntry, QueueItem, QueueItemId,
    QueueServiceRef, QueueStatus, Service, ServiceId, ServiceOption, TagId, UserId,
};
use crate::error::AdminError;

#[derive(Debug, Default)]
struct Tables {
    roles: HashMap<UserId, AdminRole>,
    services: Vec<Service>,
    queue: Vec<QueueItem>,
    tags: Vec<GalleryTag>,
    images: Vec<GalleryImage>,
    image_tags: HashSet<(ImageId, TagId)>,
    audit: Vec<AuditLog>,
}

impl Tables {
    fn audit(
        &mut self,
        actor: UserId,
        action: AuditAction,
        table: &str,
        record: impl ToString,
    ) {
        let id = i64::try_from(self.audit.len()).unwrap_or(i64::MAX).saturating_add(1);
        self.audit.push(AuditLog {
            id,
            action: action.as_str().to_string(),
            table_name: table.to_string(),
            record_id: record.to_string(),
            actor_id: Some(actor),
            created_at: Utc::now(),
        });
    }

    fn ensure_unique_tag(&self, name: &str, except: Option<TagId>) -> Result<(), AdminError> {
        if self
            .tags
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
        {
            return Err(AdminError::Conflict(format!(
                "duplicate key value violates unique constraint \"gallery_tags_name_key\": {name}"
            )));
        }
        Ok(())
    }
}

/// In-memory store mirroring the Postgres schema's constraints.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    reject_image_inserts: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored gallery images.
    pub async fn image_count(&self) -> usize {
        self.tables.read().await.images.len()
    }

    /// Makes every following `insert_gallery_image` fail with a
    /// persistence error until switched off again.
    pub fn reject_image_inserts(&self, reject: bool) {
        self.reject_image_inserts.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn role_for_user(&self, user: UserId) -> Result<Option<AdminRole>, AdminError> {
        Ok(self.tables.read().await.roles.get(&user).copied())
    }

    async fn upsert_role(&self, user: UserId, role: AdminRole) -> Result<(), AdminError> {
        self.tables.write().await.roles.insert(user, role);
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<Service>, AdminError> {
        let tables = self.tables.read().await;
        Ok(tables.services.iter().rev().cloned().collect())
    }

    async fn list_active_services(&self) -> Result<Vec<ServiceOption>, AdminError> {
        let tables = self.tables.read().await;
        let mut options: Vec<ServiceOption> = tables
            .services
            .iter()
            .filter(|s| s.is_active)
            .map(ServiceOption::from)
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(options)
    }

    async fn insert_service(
        &self,
        actor: UserId,
        new: &NewService,
    ) -> Result<Service, AdminError> {
        let service = Service {
            id: ServiceId::new(),
            name: new.name.clone(),
            category: new.category,
            description: new.description.clone(),
            price: new.price,
            duration_minutes: new.duration_minutes,
            is_active: new.is_active,
            created_at: Utc::now(),
        };
        let mut tables = self.tables.write().await;
        tables.services.push(service.clone());
        tables.audit(actor, AuditAction::Create, "services", service.id);
        Ok(service)
    }

    async fn set_service_active(
        &self,
        actor: UserId,
        id: ServiceId,
        is_active: bool,
    ) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let Some(service) = tables.services.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        service.is_active = is_active;
        tables.audit(actor, AuditAction::Update, "services", id);
        Ok(true)
    }

    async fn delete_service(&self, actor: UserId, id: ServiceId) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        if !tables.services.iter().any(|s| s.id == id) {
            return Ok(false);
        }
        if tables.queue.iter().any(|q| q.service_id == id) {
            return Err(AdminError::Conflict(format!(
                "service {id} is still referenced from table \"queues\""
            )));
        }
        tables.services.retain(|s| s.id != id);
        tables.audit(actor, AuditAction::Delete, "services", id);
        Ok(true)
    }

    async fn list_queue(&self) -> Result<Vec<QueueEntry>, AdminError> {
        let tables = self.tables.read().await;
        let services: HashMap<ServiceId, &Service> =
            tables.services.iter().map(|s| (s.id, s)).collect();
        Ok(tables
            .queue
            .iter()
            .rev()
            .map(|item| QueueEntry {
                item: item.clone(),
                service: services.get(&item.service_id).map(|s| QueueServiceRef {
                    name: s.name.clone(),
                    category: s.category,
                }),
            })
            .collect())
    }

    async fn insert_queue_item(
        &self,
        actor: UserId,
        new: &NewQueueItem,
    ) -> Result<QueueItem, AdminError> {
        let mut tables = self.tables.write().await;
        if !tables.services.iter().any(|s| s.id == new.service_id) {
            return Err(AdminError::Conflict(format!(
                "service {} is not present in table \"services\"",
                new.service_id
            )));
        }
        let item = QueueItem {
            id: QueueItemId::new(),
            service_id: new.service_id,
            customer_name: new.customer_name.clone(),
            vehicle_plate: new.vehicle_plate.clone(),
            status: QueueStatus::Waiting,
            queued_at: Utc::now(),
        };
        tables.queue.push(item.clone());
        tables.audit(actor, AuditAction::Create, "queues", item.id);
        Ok(item)
    }

    async fn set_queue_status(
        &self,
        actor: UserId,
        id: QueueItemId,
        status: QueueStatus,
    ) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.queue.iter_mut().find(|q| q.id == id) else {
            return Ok(false);
        };
        item.status = status;
        tables.audit(actor, AuditAction::Update, "queues", id);
        Ok(true)
    }

    async fn delete_queue_item(&self, actor: UserId, id: QueueItemId) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let before = tables.queue.len();
        tables.queue.retain(|q| q.id != id);
        if tables.queue.len() == before {
            return Ok(false);
        }
        tables.audit(actor, AuditAction::Delete, "queues", id);
        Ok(true)
    }

    async fn list_tags(&self) -> Result<Vec<GalleryTag>, AdminError> {
        let mut tags = self.tables.read().await.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn insert_tag(&self, actor: UserId, name: &str) -> Result<GalleryTag, AdminError> {
        let mut tables = self.tables.write().await;
        tables.ensure_unique_tag(name, None)?;
        let tag = GalleryTag {
            id: TagId::new(),
            name: name.to_string(),
        };
        tables.tags.push(tag.clone());
        tables.audit(actor, AuditAction::Create, "gallery_tags", tag.id);
        Ok(tag)
    }

    async fn rename_tag(&self, actor: UserId, id: TagId, name: &str) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        tables.ensure_unique_tag(name, Some(id))?;
        if let Some(tag) = tables.tags.iter_mut().find(|t| t.id == id) {
            tag.name = name.to_string();
        }
        tables.audit(actor, AuditAction::Update, "gallery_tags", id);
        Ok(true)
    }

    async fn delete_tag(&self, actor: UserId, id: TagId) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let before = tables.tags.len();
        tables.tags.retain(|t| t.id != id);
        if tables.tags.len() == before {
            return Ok(false);
        }
        tables.image_tags.retain(|(_, tag)| *tag != id);
        tables.audit(actor, AuditAction::Delete, "gallery_tags", id);
        Ok(true)
    }

    async fn list_gallery(&self) -> Result<Vec<GalleryEntry>, AdminError> {
        let tables = self.tables.read().await;
        Ok(tables
            .images
            .iter()
            .rev()
            .map(|image| {
                let mut tags: Vec<GalleryTag> = tables
                    .tags
                    .iter()
                    .filter(|t| tables.image_tags.contains(&(image.id, t.id)))
                    .cloned()
                    .collect();
                tags.sort_by(|a, b| a.name.cmp(&b.name));
                GalleryEntry {
                    image: image.clone(),
                    tags,
                }
            })
            .collect())
    }

    async fn get_gallery_image(&self, id: ImageId) -> Result<Option<GalleryImage>, AdminError> {
        let tables = self.tables.read().await;
        Ok(tables.images.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_gallery_image(
        &self,
        actor: UserId,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, AdminError> {
        if self.reject_image_inserts.load(Ordering::SeqCst) {
            return Err(AdminError::Persistence(
                "insert into gallery_images rejected".to_string(),
            ));
        }
        let image = GalleryImage {
            id: ImageId::new(),
            title: new.title.clone(),
            image_url: new.image_url.clone(),
            image_path: new.image_path.clone(),
            alt_text: new.alt_text.clone(),
            is_visible: new.is_visible,
            created_at: Utc::now(),
        };
        let mut tables = self.tables.write().await;
        tables.images.push(image.clone());
        tables.audit(actor, AuditAction::Create, "gallery_images", image.id);
        Ok(image)
    }

    async fn update_gallery_image(
        &self,
        actor: UserId,
        id: ImageId,
        update: &GalleryImageUpdate,
    ) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let Some(image) = tables.images.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        image.title = update.title.clone();
        image.alt_text = update.alt_text.clone();
        image.is_visible = update.is_visible;
        tables.audit(actor, AuditAction::Update, "gallery_images", id);
        Ok(true)
    }

    async fn set_gallery_visible(
        &self,
        actor: UserId,
        id: ImageId,
        is_visible: bool,
    ) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let Some(image) = tables.images.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        image.is_visible = is_visible;
        tables.audit(actor, AuditAction::Update, "gallery_images", id);
        Ok(true)
    }

    async fn delete_gallery_image(&self, actor: UserId, id: ImageId) -> Result<bool, AdminError> {
        let mut tables = self.tables.write().await;
        let before = tables.images.len();
        tables.images.retain(|i| i.id != id);
        if tables.images.len() == before {
            return Ok(false);
        }
        tables.image_tags.retain(|(image, _)| *image != id);
        tables.audit(actor, AuditAction::Delete, "gallery_images", id);
        Ok(true)
    }

    async fn unlink_image_tags(&self, image: ImageId) -> Result<u64, AdminError> {
        let mut tables = self.tables.write().await;
        let before = tables.image_tags.len();
        tables.image_tags.retain(|(i, _)| *i != image);
        Ok(u64::try_from(before.saturating_sub(tables.image_tags.len())).unwrap_or(u64::MAX))
    }

    async fn link_image_tags(&self, image: ImageId, tags: &[TagId]) -> Result<(), AdminError> {
        let mut tables = self.tables.write().await;
        if !tables.images.iter().any(|i| i.id == image) {
            return Err(AdminError::Conflict(format!(
                "image {image} is not present in table \"gallery_images\""
            )));
        }
        // Validate the whole batch first: a multi-row insert is all or nothing.
        for tag in tags {
            if !tables.tags.iter().any(|t| t.id == *tag) {
                return Err(AdminError::Conflict(format!(
                    "tag {tag} is not present in table \"gallery_tags\""
                )));
            }
            if tables.image_tags.contains(&(image, *tag)) {
                return Err(AdminError::Conflict(format!(
                    "image {image} is already linked to tag {tag}"
                )));
            }
        }
        tables.image_tags.extend(tags.iter().map(|tag| (image, *tag)));
        Ok(())
    }

    async fn recent_audit_logs(&self, limit: u32) -> Result<Vec<AuditLog>, AdminError> {
        let tables = self.tables.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(tables.audit.iter().rev().take(limit).cloned().collect())
    }
}
