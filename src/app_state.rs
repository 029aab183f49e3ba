//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::AdminConfig;
use crate::domain::EventBus;
use crate::persistence::AdminStore;
use crate::service::{AccessService, ActivityService, CatalogService, GalleryService, QueueService};
use crate::storage::ObjectStorage;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Role lookup and access gates.
    pub access: Arc<AccessService>,
    /// Service catalog.
    pub catalog: Arc<CatalogService>,
    /// Walk-in queue.
    pub queue: Arc<QueueService>,
    /// Gallery images and tags.
    pub gallery: Arc<GalleryService>,
    /// Audit trail reader.
    pub activity: Arc<ActivityService>,
    /// Session token verifier.
    pub tokens: Arc<TokenVerifier>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires every service over the given store and object storage.
    #[must_use]
    pub fn new(
        config: &AdminConfig,
        store: Arc<dyn AdminStore>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        Self {
            access: Arc::new(AccessService::new(
                Arc::clone(&store),
                &config.login_path,
                &config.forbidden_path,
            )),
            catalog: Arc::new(CatalogService::new(Arc::clone(&store), event_bus.clone())),
            queue: Arc::new(QueueService::new(Arc::clone(&store), event_bus.clone())),
            gallery: Arc::new(GalleryService::new(
                Arc::clone(&store),
                storage,
                event_bus.clone(),
                config.max_upload_bytes,
            )),
            activity: Arc::new(ActivityService::new(store, config.audit_log_limit)),
            tokens: Arc::new(TokenVerifier::new(&config.jwt_secret)),
            event_bus,
        }
    }
}
