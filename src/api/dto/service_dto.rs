//! Catalog request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{NewService, ServiceCategory};
use crate::error::AdminError;

/// Request body for `POST /api/v1/services`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    /// Display name (required).
    #[serde(default)]
    pub name: String,
    /// `car` (default) or `bike`.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional description; blank becomes null.
    #[serde(default)]
    pub description: Option<String>,
    /// Price, default 0.
    #[serde(default)]
    pub price: Option<f64>,
    /// Duration in minutes, default 0.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Initial visibility, default `true`.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateServiceRequest {
    /// Applies defaults and validates.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for a blank name, unknown
    /// category or negative price.
    pub fn into_new_service(self) -> Result<NewService, AdminError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => ServiceCategory::default(),
            Some(raw) => raw.parse()?,
        };
        NewService::new(
            &self.name,
            category,
            self.description.as_deref(),
            self.price.unwrap_or(0.0),
            self.duration_minutes.unwrap_or(0),
            self.is_active.unwrap_or(true),
        )
    }
}

/// Request body for `POST /api/v1/services/{id}/toggle`.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct ToggleServiceRequest {
    /// The `is_active` value the client is displaying; the server writes
    /// its negation.
    #[serde(default)]
    pub current_is_active: bool,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let request = CreateServiceRequest {
            name: "Quick rinse".to_string(),
            ..CreateServiceRequest::default()
        };
        let Ok(new) = request.into_new_service() else {
            panic!("valid request");
        };
        assert_eq!(new.category, ServiceCategory::Car);
        assert!(new.is_active);
        assert_eq!(new.price, 0.0);
        assert_eq!(new.duration_minutes, 0);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let request = CreateServiceRequest {
            name: "Quick rinse".to_string(),
            category: Some("boat".to_string()),
            ..CreateServiceRequest::default()
        };
        assert!(matches!(
            request.into_new_service(),
            Err(AdminError::InvalidRequest(_))
        ));
    }
}
