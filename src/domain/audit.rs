//! Activity log rows written by the store on every catalog, queue and
//! gallery change. Application code only reads them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;

/// Kind of change recorded in `audit_logs.action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// Row inserted.
    Create,
    /// Row updated.
    Update,
    /// Row deleted.
    Delete,
}

impl AuditAction {
    /// Column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A row of `audit_logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuditLog {
    /// Monotonic row id.
    pub id: i64,
    /// `create`, `update` or `delete`.
    pub action: String,
    /// Table the change touched.
    pub table_name: String,
    /// Id of the changed row.
    pub record_id: String,
    /// User who made the change, when known.
    pub actor_id: Option<UserId>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
}
