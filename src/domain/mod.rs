//! Domain layer: record types, validation, roles and change events.
//!
//! Everything here is backend-agnostic. Stores translate to and from
//! these types; handlers translate DTOs into the validated inputs.

pub mod admin_event;
pub mod audit;
pub mod catalog;
pub mod event_bus;
pub mod gallery;
pub mod ids;
pub mod queue;
pub mod role;

pub use admin_event::{AdminEvent, AdminView, ChangeKind};
pub use audit::{AuditAction, AuditLog};
pub use catalog::{NewService, Service, ServiceCategory, ServiceOption};
pub use event_bus::EventBus;
pub use gallery::{GalleryEntry, GalleryImage, GalleryImageUpdate, GalleryTag, NewGalleryImage};
pub use ids::{ImageId, QueueItemId, ServiceId, TagId, UserId};
pub use queue::{NewQueueItem, QueueEntry, QueueItem, QueueServiceRef, QueueStatus};
pub use role::{AdminIdentity, AdminRole, UserRole};
