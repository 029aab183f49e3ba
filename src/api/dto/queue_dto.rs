//! Queue request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

use super::common_dto::required_field;
use crate::domain::{NewQueueItem, QueueStatus, ServiceId};
use crate::error::AdminError;

/// Request body for `POST /api/v1/queues`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateQueueRequest {
    /// Requested service (UUID, required).
    #[serde(default)]
    pub service_id: Option<String>,
    /// Customer name (required).
    #[serde(default)]
    pub customer_name: String,
    /// Licence plate (required).
    #[serde(default)]
    pub vehicle_plate: String,
}

impl CreateQueueRequest {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] when any field is missing or
    /// the service id is not a UUID.
    pub fn into_new_item(self) -> Result<NewQueueItem, AdminError> {
        let service_id: ServiceId = required_field(self.service_id.as_deref(), "service_id")?;
        NewQueueItem::new(service_id, &self.customer_name, &self.vehicle_plate)
    }
}

/// Request body for `PUT /api/v1/queues/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateQueueStatusRequest {
    /// `waiting` (default), `in_progress`, `done` or `canceled`.
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateQueueStatusRequest {
    /// Parses the status, defaulting to `waiting`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for any other value.
    pub fn status(&self) -> Result<QueueStatus, AdminError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(QueueStatus::default()),
            Some(raw) => raw.parse(),
        }
    }
}
