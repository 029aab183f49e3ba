//! Service catalog: the cleaning offerings shown to customers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ServiceId;
use crate::error::AdminError;

/// Vehicle class a service applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Car cleaning.
    #[default]
    Car,
    /// Bike cleaning.
    Bike,
}

impl ServiceCategory {
    /// Wire and column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            other => Err(AdminError::InvalidRequest(format!(
                "unknown service category: {other}"
            ))),
        }
    }
}

/// A row of `services`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Service {
    /// Record id.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Vehicle class.
    pub category: ServiceCategory,
    /// Optional long description.
    pub description: Option<String>,
    /// Price in the shop's currency.
    pub price: f64,
    /// Expected duration in minutes.
    pub duration_minutes: u32,
    /// Whether customers can see the service.
    pub is_active: bool,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// Compact active-service entry used to pick a service when enqueueing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceOption {
    /// Record id.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Vehicle class.
    pub category: ServiceCategory,
}

impl From<&Service> for ServiceOption {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            category: service.category,
        }
    }
}

/// Validated input for a new catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Vehicle class.
    pub category: ServiceCategory,
    /// Trimmed description; `None` when blank.
    pub description: Option<String>,
    /// Non-negative finite price.
    pub price: f64,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Initial visibility.
    pub is_active: bool,
}

/// Largest duration the `INTEGER` column holds.
pub const MAX_DURATION_MINUTES: u32 = i32::MAX as u32;

impl NewService {
    /// Validates and normalizes catalog input.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] when the trimmed name is
    /// empty, the price is negative or not finite, or the duration exceeds
    /// [`MAX_DURATION_MINUTES`].
    pub fn new(
        name: &str,
        category: ServiceCategory,
        description: Option<&str>,
        price: f64,
        duration_minutes: u32,
        is_active: bool,
    ) -> Result<Self, AdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::InvalidRequest(
                "service name is required".to_string(),
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(AdminError::InvalidRequest(format!(
                "price must be a non-negative number, got {price}"
            )));
        }
        if duration_minutes > MAX_DURATION_MINUTES {
            return Err(AdminError::InvalidRequest(format!(
                "duration_minutes must be at most {MAX_DURATION_MINUTES}, got {duration_minutes}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            category,
            description: non_blank(description),
            price,
            duration_minutes,
            is_active,
        })
    }
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn trims_name_and_blanks_description() {
        let Ok(svc) = NewService::new("  Premium wash ", ServiceCategory::Car, Some("   "), 12.5, 30, true)
        else {
            panic!("valid input");
        };
        assert_eq!(svc.name, "Premium wash");
        assert_eq!(svc.description, None);
    }

    #[test]
    fn rejects_blank_name() {
        let result = NewService::new("   ", ServiceCategory::Bike, None, 0.0, 0, true);
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_negative_or_nan_price() {
        assert!(NewService::new("Wash", ServiceCategory::Car, None, -1.0, 0, true).is_err());
        assert!(NewService::new("Wash", ServiceCategory::Car, None, f64::NAN, 0, true).is_err());
    }

    #[test]
    fn rejects_duration_beyond_integer_column() {
        let result = NewService::new("Marathon", ServiceCategory::Car, None, 1.0, u32::MAX, true);
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));

        let Ok(svc) = NewService::new(
            "Marathon",
            ServiceCategory::Car,
            None,
            1.0,
            MAX_DURATION_MINUTES,
            true,
        ) else {
            panic!("largest storable duration is valid");
        };
        assert_eq!(svc.duration_minutes, MAX_DURATION_MINUTES);
    }

    #[test]
    fn category_round_trips_through_str() {
        assert_eq!("bike".parse::<ServiceCategory>().ok(), Some(ServiceCategory::Bike));
        assert_eq!(ServiceCategory::Car.to_string(), "car");
        assert!("truck".parse::<ServiceCategory>().is_err());
    }
}
