//! Walk-in queue: vehicles waiting for or undergoing a service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{QueueItemId, ServiceCategory, ServiceId};
use crate::error::AdminError;

/// Progress of a queue item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    /// Waiting for a bay.
    #[default]
    Waiting,
    /// Being cleaned.
    InProgress,
    /// Finished.
    Done,
    /// Dropped before completion.
    Canceled,
}

impl QueueStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::Waiting, Self::InProgress, Self::Done, Self::Canceled];

    /// Wire and column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AdminError::InvalidRequest(format!("unknown queue status: {s}")))
    }
}

/// A row of `queues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QueueItem {
    /// Record id.
    pub id: QueueItemId,
    /// Service requested by the customer.
    pub service_id: ServiceId,
    /// Customer name.
    pub customer_name: String,
    /// Licence plate.
    pub vehicle_plate: String,
    /// Current status.
    pub status: QueueStatus,
    /// Enqueue timestamp.
    pub queued_at: DateTime<Utc>,
}

/// Name and category of the service a queue item points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QueueServiceRef {
    /// Service name.
    pub name: String,
    /// Service category.
    pub category: ServiceCategory,
}

/// A queue item joined with its service for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QueueEntry {
    /// The queue row.
    #[serde(flatten)]
    pub item: QueueItem,
    /// Joined service, absent if the service row is gone.
    pub service: Option<QueueServiceRef>,
}

/// Validated input for a new queue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQueueItem {
    /// Requested service.
    pub service_id: ServiceId,
    /// Trimmed, non-empty customer name.
    pub customer_name: String,
    /// Trimmed, non-empty plate.
    pub vehicle_plate: String,
}

impl NewQueueItem {
    /// Validates and normalizes queue input.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] when the customer name or
    /// plate is blank.
    pub fn new(
        service_id: ServiceId,
        customer_name: &str,
        vehicle_plate: &str,
    ) -> Result<Self, AdminError> {
        let customer_name = customer_name.trim();
        let vehicle_plate = vehicle_plate.trim();
        if customer_name.is_empty() {
            return Err(AdminError::InvalidRequest(
                "customer name is required".to_string(),
            ));
        }
        if vehicle_plate.is_empty() {
            return Err(AdminError::InvalidRequest(
                "vehicle plate is required".to_string(),
            ));
        }
        Ok(Self {
            service_id,
            customer_name: customer_name.to_string(),
            vehicle_plate: vehicle_plate.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_every_variant() {
        for status in QueueStatus::ALL {
            assert_eq!(status.as_str().parse::<QueueStatus>().ok(), Some(status));
        }
        assert!("paused".parse::<QueueStatus>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&QueueStatus::InProgress).ok();
        assert_eq!(json.as_deref(), Some("\"in_progress\""));
    }

    #[test]
    fn new_item_requires_name_and_plate() {
        let service = ServiceId::new();
        assert!(NewQueueItem::new(service, " ", "B 1234 XY").is_err());
        assert!(NewQueueItem::new(service, "Dewi", "  ").is_err());
        let item = NewQueueItem::new(service, " Dewi ", " B 1234 XY ").ok();
        assert_eq!(item.map(|i| i.vehicle_plate), Some("B 1234 XY".to_string()));
    }
}
