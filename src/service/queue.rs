//! Queue service: walk-in customers and their progress.

use std::sync::Arc;

use crate::domain::{
    AdminEvent, AdminView, ChangeKind, EventBus, NewQueueItem, QueueEntry, QueueItem,
    QueueItemId, QueueStatus, UserId,
};
use crate::error::AdminError;
use crate::persistence::AdminStore;

const TABLE: &str = "queues";

/// Orchestrates reads and writes of `queues`.
#[derive(Debug, Clone)]
pub struct QueueService {
    store: Arc<dyn AdminStore>,
    event_bus: EventBus,
}

impl QueueService {
    /// Creates a new `QueueService`.
    #[must_use]
    pub fn new(store: Arc<dyn AdminStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Queue items with their service, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn list(&self) -> Result<Vec<QueueEntry>, AdminError> {
        self.store.list_queue().await
    }

    /// Enqueues a vehicle with status `waiting`.
    ///
    /// # Errors
    ///
    /// [`AdminError::Conflict`] if the service does not exist, or the store
    /// error.
    pub async fn create(&self, actor: UserId, new: &NewQueueItem) -> Result<QueueItem, AdminError> {
        let item = self.store.insert_queue_item(actor, new).await?;
        tracing::info!(
            queue_item_id = %item.id,
            service_id = %item.service_id,
            %actor,
            "vehicle enqueued"
        );
        self.notify(ChangeKind::Created, item.id, actor);
        Ok(item)
    }

    /// Moves an item to `status`.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] if no such item exists, or the store error.
    pub async fn update_status(
        &self,
        actor: UserId,
        id: QueueItemId,
        status: QueueStatus,
    ) -> Result<(), AdminError> {
        if !self.store.set_queue_status(actor, id, status).await? {
            return Err(AdminError::not_found(TABLE, id));
        }
        tracing::info!(queue_item_id = %id, %actor, %status, "queue status updated");
        self.notify(ChangeKind::Updated, id, actor);
        Ok(())
    }

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] if no such item exists, or the store error.
    pub async fn delete(&self, actor: UserId, id: QueueItemId) -> Result<(), AdminError> {
        if !self.store.delete_queue_item(actor, id).await? {
            return Err(AdminError::not_found(TABLE, id));
        }
        tracing::info!(queue_item_id = %id, %actor, "queue item deleted");
        self.notify(ChangeKind::Deleted, id, actor);
        Ok(())
    }

    fn notify(&self, change: ChangeKind, id: QueueItemId, actor: UserId) {
        let _ = self
            .event_bus
            .publish(AdminEvent::now(AdminView::Queues, change, TABLE, id, actor));
    }
}
