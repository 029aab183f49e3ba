//! Activity log reader for superadmins.

use std::sync::Arc;

use crate::domain::AuditLog;
use crate::error::AdminError;
use crate::persistence::AdminStore;

/// Reads the audit trail produced by the store.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: Arc<dyn AdminStore>,
    max_limit: u32,
}

impl ActivityService {
    /// Creates a service whose page size defaults to, and never exceeds,
    /// `max_limit`.
    #[must_use]
    pub fn new(store: Arc<dyn AdminStore>, max_limit: u32) -> Self {
        Self {
            store,
            max_limit: max_limit.max(1),
        }
    }

    /// Effective page size for a requested `limit`.
    #[must_use]
    pub fn clamp_limit(&self, limit: Option<u32>) -> u32 {
        limit.unwrap_or(self.max_limit).clamp(1, self.max_limit)
    }

    /// Most recent audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store error if the read fails.
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<AuditLog>, AdminError> {
        self.store.recent_audit_logs(self.clamp_limit(limit)).await
    }
}
