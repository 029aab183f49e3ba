//! Admin error types with HTTP status code mapping.
//!
//! [`AdminError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! The two access variants render as `303 See Other` redirects so that an
//! unauthorized session is sent to the login or forbidden page.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: service name is required",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`AdminError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details (redirect target for access errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                   |
/// |-----------|-------------------|-------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request               |
/// | 2000–2099 | State/Not Found   | 404 Not Found / 409 Conflict  |
/// | 2100–2199 | Access            | 303 See Other                 |
/// | 3000–3999 | Server / Backend  | 500 Internal Server Error     |
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Uploaded file is missing, empty, too large or not an image.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Record with the given id does not exist in the named table.
    #[error("{table} record not found: {id}")]
    NotFound {
        /// Table the lookup ran against.
        table: &'static str,
        /// Requested record id.
        id: uuid::Uuid,
    },

    /// Write rejected by a uniqueness or referential constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No verified session; the client is sent to the login page.
    #[error("authentication required")]
    Unauthenticated {
        /// Redirect target.
        redirect_to: String,
    },

    /// Session lacks the required role; the client is sent away.
    #[error("insufficient role")]
    Forbidden {
        /// Redirect target.
        redirect_to: String,
    },

    /// Relational store failure (raw backend message).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Object storage failure (raw backend message).
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Shorthand for a [`AdminError::NotFound`] on `table`.
    #[must_use]
    pub fn not_found(table: &'static str, id: impl Into<uuid::Uuid>) -> Self {
        Self::NotFound {
            table,
            id: id.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidUpload(_) => 1002,
            Self::NotFound { .. } => 2001,
            Self::Conflict(_) => 2002,
            Self::Unauthenticated { .. } => 2101,
            Self::Forbidden { .. } => 2102,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Storage(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthenticated { .. } | Self::Forbidden { .. } => StatusCode::SEE_OTHER,
            Self::Persistence(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the redirect target for access errors.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { redirect_to } | Self::Forbidden { redirect_to } => {
                Some(redirect_to)
            }
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AdminError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            // SQLSTATE classes: 23505 unique, 23503 foreign key,
            // 23514 check, 22P02 invalid text representation.
            match db.code().as_deref() {
                Some("23505") | Some("23503") => {
                    return Self::Conflict(db.message().to_string());
                }
                Some("23514") | Some("22P02") => {
                    return Self::InvalidRequest(db.message().to_string());
                }
                _ => {}
            }
        }
        Self::Persistence(err.to_string())
    }
}

impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AdminError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AdminError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let location = self.redirect_target().map(str::to_owned);
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: location.clone(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        if let Some(location) = location
            && let Ok(value) = header::HeaderValue::from_str(&location)
        {
            response.headers_mut().insert(header::LOCATION, value);
        }
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_request() {
        let err = AdminError::InvalidRequest("name is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
        assert_eq!(err.to_string(), "invalid request: name is required");
    }

    #[test]
    fn not_found_names_the_table() {
        let id = uuid::Uuid::new_v4();
        let err = AdminError::not_found("services", id);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), format!("services record not found: {id}"));
    }

    #[test]
    fn access_errors_redirect_with_location() {
        let err = AdminError::Unauthenticated {
            redirect_to: "/auth/login".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let Some(location) = response.headers().get(header::LOCATION) else {
            panic!("missing location header");
        };
        assert_eq!(location, "/auth/login");
    }

    #[test]
    fn forbidden_redirects_to_protected_page() {
        let err = AdminError::Forbidden {
            redirect_to: "/protected".to_string(),
        };
        assert_eq!(err.redirect_target(), Some("/protected"));
        assert_eq!(err.error_code(), 2102);
    }

    #[test]
    fn non_database_sqlx_errors_become_persistence() {
        let err = AdminError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.error_code(), 3001);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn backend_failures_are_server_errors() {
        assert_eq!(
            AdminError::Storage("bucket offline".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AdminError::Conflict("dup".to_string()).error_code(), 2002);
    }
}
