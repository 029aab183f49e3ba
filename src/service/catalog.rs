//! Catalog service: the cleaning offerings.

use std::sync::Arc;

use crate::domain::{
    AdminEvent, AdminView, ChangeKind, EventBus, NewService, Service, ServiceId, ServiceOption,
    UserId,
};
use crate::error::AdminError;
use crate::persistence::AdminStore;

const TABLE: &str = "services";

/// Orchestrates reads and writes of `services`.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<dyn AdminStore>,
    event_bus: EventBus,
}

impl CatalogService {
    /// Creates a new `CatalogService`.
    #[must_use]
    pub fn new(store: Arc<dyn AdminStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// All services, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn list(&self) -> Result<Vec<Service>, AdminError> {
        self.store.list_services().await
    }

    /// Active services ordered by name, for the enqueue form.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn list_active(&self) -> Result<Vec<ServiceOption>, AdminError> {
        self.store.list_active_services().await
    }

    /// Adds a service to the catalog.
    ///
    /// # Errors
    ///
    /// Returns the store error if the insert fails.
    pub async fn create(&self, actor: UserId, new: &NewService) -> Result<Service, AdminError> {
        let service = self.store.insert_service(actor, new).await?;
        tracing::info!(service_id = %service.id, %actor, name = %service.name, "service created");
        self.notify(ChangeKind::Created, service.id, actor);
        Ok(service)
    }

    /// Writes the negation of `current_is_active` and returns the new value.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] if no such service exists, or the store
    /// error.
    pub async fn toggle(
        &self,
        actor: UserId,
        id: ServiceId,
        current_is_active: bool,
    ) -> Result<bool, AdminError> {
        let is_active = !current_is_active;
        if !self.store.set_service_active(actor, id, is_active).await? {
            return Err(AdminError::not_found(TABLE, id));
        }
        tracing::info!(service_id = %id, %actor, is_active, "service toggled");
        self.notify(ChangeKind::Updated, id, actor);
        Ok(is_active)
    }

    /// Removes a service.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] if no such service exists,
    /// [`AdminError::Conflict`] while queue items still reference it, or
    /// the store error.
    pub async fn delete(&self, actor: UserId, id: ServiceId) -> Result<(), AdminError> {
        if !self.store.delete_service(actor, id).await? {
            return Err(AdminError::not_found(TABLE, id));
        }
        tracing::info!(service_id = %id, %actor, "service deleted");
        self.notify(ChangeKind::Deleted, id, actor);
        Ok(())
    }

    fn notify(&self, change: ChangeKind, id: ServiceId, actor: UserId) {
        let _ = self
            .event_bus
            .publish(AdminEvent::now(AdminView::Services, change, TABLE, id, actor));
    }
}
