//! Service layer: business logic orchestration.
//!
//! Each service owns an `Arc<dyn AdminStore>` (plus the object storage for
//! the gallery) and an [`crate::domain::EventBus`]. Mutations follow the
//! same pattern: validate → write through the store → log → publish one
//! [`crate::domain::AdminEvent`] for the stale view → return.

pub mod access;
pub mod activity;
pub mod catalog;
pub mod gallery;
pub mod queue;

pub use access::AccessService;
pub use activity::ActivityService;
pub use catalog::CatalogService;
pub use gallery::{GalleryService, ImageUpload, UploadedFile};
pub use queue::QueueService;
