//! Database row shapes and their conversion into domain types.
//!
//! Enum-like columns are stored as `TEXT` with `CHECK` constraints, so a
//! row that fails to parse means the schema and the code disagree; that
//! surfaces as [`AdminError::Persistence`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AuditLog, GalleryImage, GalleryTag, QueueEntry, QueueItem, QueueServiceRef, Service,
    ServiceCategory, ServiceOption,
};
use crate::error::AdminError;

/// A row from `services`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// `car` or `bike`.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Price.
    pub price: f64,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Visibility flag.
    pub is_active: bool,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ServiceRow> for Service {
    type Error = AdminError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            name: row.name,
            category: parse_category(&row.category)?,
            description: row.description,
            price: row.price,
            duration_minutes: u32::try_from(row.duration_minutes).unwrap_or(0),
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

/// The `(id, name, category)` projection of `services`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceOptionRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// `car` or `bike`.
    pub category: String,
}

impl TryFrom<ServiceOptionRow> for ServiceOption {
    type Error = AdminError;

    fn try_from(row: ServiceOptionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            name: row.name,
            category: parse_category(&row.category)?,
        })
    }
}

/// A row from `queues` left-joined with its service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QueueRow {
    /// Primary key.
    pub id: Uuid,
    /// Referenced service.
    pub service_id: Uuid,
    /// Customer name.
    pub customer_name: String,
    /// Licence plate.
    pub vehicle_plate: String,
    /// Status column.
    pub status: String,
    /// Enqueue timestamp.
    pub queued_at: DateTime<Utc>,
    /// Joined service name.
    pub service_name: Option<String>,
    /// Joined service category.
    pub service_category: Option<String>,
}

impl TryFrom<QueueRow> for QueueEntry {
    type Error = AdminError;

    fn try_from(row: QueueRow) -> Result<Self, Self::Error> {
        let service = match (row.service_name, row.service_category) {
            (Some(name), Some(category)) => Some(QueueServiceRef {
                name,
                category: parse_category(&category)?,
            }),
            _ => None,
        };
        Ok(Self {
            item: QueueItem {
                id: row.id.into(),
                service_id: row.service_id.into(),
                customer_name: row.customer_name,
                vehicle_plate: row.vehicle_plate,
                status: row
                    .status
                    .parse()
                    .map_err(|_| corrupt("queues.status", &row.status))?,
                queued_at: row.queued_at,
            },
            service,
        })
    }
}

/// A row from `gallery_tags`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRow {
    /// Primary key.
    pub id: Uuid,
    /// Label.
    pub name: String,
}

impl From<TagRow> for GalleryTag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

/// A tag joined through `gallery_image_tags`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImageTagRow {
    /// Linked image.
    pub image_id: Uuid,
    /// Tag id.
    pub id: Uuid,
    /// Tag label.
    pub name: String,
}

/// A row from `gallery_images`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GalleryImageRow {
    /// Primary key.
    pub id: Uuid,
    /// Caption.
    pub title: String,
    /// Public URL.
    pub image_url: String,
    /// Object key.
    pub image_path: Option<String>,
    /// Accessibility text.
    pub alt_text: Option<String>,
    /// Visibility flag.
    pub is_visible: bool,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<GalleryImageRow> for GalleryImage {
    fn from(row: GalleryImageRow) -> Self {
        Self {
            id: row.id.into(),
            title: row.title,
            image_url: row.image_url,
            image_path: row.image_path.unwrap_or_default(),
            alt_text: row.alt_text,
            is_visible: row.is_visible,
            created_at: row.created_at,
        }
    }
}

/// A row from `audit_logs`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuditLogRow {
    /// Primary key.
    pub id: i64,
    /// Action name.
    pub action: String,
    /// Touched table.
    pub table_name: String,
    /// Touched row id.
    pub record_id: String,
    /// Acting user.
    pub actor_id: Option<Uuid>,
    /// Timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLog {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            action: row.action,
            table_name: row.table_name,
            record_id: row.record_id,
            actor_id: row.actor_id.map(Into::into),
            created_at: row.created_at,
        }
    }
}

fn parse_category(raw: &str) -> Result<ServiceCategory, AdminError> {
    raw.parse().map_err(|_| corrupt("services.category", raw))
}

fn corrupt(column: &str, value: &str) -> AdminError {
    AdminError::Persistence(format!("unexpected value in {column}: {value}"))
}
