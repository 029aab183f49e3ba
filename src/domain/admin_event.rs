//! Change notifications published after every successful write.
//!
//! An [`AdminEvent`] tells subscribed dashboards which view went stale so
//! they can reload it. Events carry no row data; clients re-fetch.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Dashboard view invalidated by a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminView {
    /// Service catalog.
    Services,
    /// Walk-in queue.
    Queues,
    /// Gallery images and tags.
    Gallery,
}

impl AdminView {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Queues => "queues",
            Self::Gallery => "gallery",
        }
    }
}

impl fmt::Display for AdminView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(Self::Services),
            "queues" => Ok(Self::Queues),
            "gallery" => Ok(Self::Gallery),
            other => Err(other.to_string()),
        }
    }
}

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Row inserted.
    Created,
    /// Row updated (including tag re-linking).
    Updated,
    /// Row deleted.
    Deleted,
}

/// A write that invalidated a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminEvent {
    /// Stale view.
    pub view: AdminView,
    /// Kind of change.
    pub change: ChangeKind,
    /// Table the write touched.
    pub table: &'static str,
    /// Id of the written row.
    pub record_id: uuid::Uuid,
    /// User who made the change.
    pub actor: UserId,
    /// When the write completed.
    pub timestamp: DateTime<Utc>,
}

impl AdminEvent {
    /// Builds an event stamped with the current time.
    #[must_use]
    pub fn now(
        view: AdminView,
        change: ChangeKind,
        table: &'static str,
        record_id: impl Into<uuid::Uuid>,
        actor: UserId,
    ) -> Self {
        Self {
            view,
            change,
            table,
            record_id: record_id.into(),
            actor,
            timestamp: Utc::now(),
        }
    }
}
