//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::AuditLog;

/// Page-size query parameter for the activity log.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LimitParams {
    /// Number of rows to return. Defaults to, and is capped at, the
    /// configured maximum (100 unless overridden).
    pub limit: Option<u32>,
}

/// Generic list envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListResponse<T> {
    /// Items in display order.
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Activity log page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditLogPage {
    /// Rows, newest first.
    pub data: Vec<AuditLog>,
    /// Effective page size after clamping.
    pub limit: u32,
}

/// Reply to a visibility toggle.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ToggleResponse {
    /// Value written by the toggle.
    pub value: bool,
}

/// Parses an optional id-like string, mapping absence and garbage to a
/// validation error naming `field`.
///
/// # Errors
///
/// Returns [`crate::error::AdminError::InvalidRequest`] when the value is
/// missing, blank or malformed.
pub fn required_field<T: std::str::FromStr>(
    raw: Option<&str>,
    field: &str,
) -> Result<T, crate::error::AdminError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        crate::error::AdminError::InvalidRequest(format!("{field} is required"))
    })?;
    raw.parse()
        .map_err(|_| crate::error::AdminError::InvalidRequest(format!("invalid {field}: {raw}")))
}
