//! PostgreSQL implementation of [`AdminStore`].
//!
//! Every write runs in its own short transaction that first sets
//! `app.actor_id`, which the audit triggers read. Multi-step sequences
//! (tag re-linking, upload then insert) are composed by the service layer
//! out of these independent writes and are not wrapped in a shared
//! transaction.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::models::{
    AuditLogRow, GalleryImageRow, ImageTagRow, QueueRow, ServiceOptionRow, ServiceRow, TagRow,
};
use super::store::AdminStore;
use crate::config::AdminConfig;
use crate::domain::{
    AdminRole, AuditLog, GalleryEntry, GalleryImage, GalleryImageUpdate, GalleryTag, ImageId,
    NewGalleryImage, NewQueueItem, NewService, QueueEntry, QueueItem, QueueItemId, QueueStatus,
    Service, ServiceId, ServiceOption, TagId, UserId,
};
use crate::error::AdminError;

const SERVICE_COLUMNS: &str =
    "id, name, category, description, price, duration_minutes, is_active, created_at";
const IMAGE_COLUMNS: &str = "id, title, image_url, image_path, alt_text, is_visible, created_at";

/// Opens a connection pool sized from `config`.
///
/// # Errors
///
/// Returns [`AdminError::Persistence`] if the database is unreachable.
pub async fn connect(config: &AdminConfig) -> Result<PgPool, AdminError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
///
/// # Errors
///
/// Returns [`AdminError::Persistence`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), AdminError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AdminError::Persistence(e.to_string()))
}

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begins a transaction attributed to `actor` for the audit triggers.
    async fn begin_as(&self, actor: UserId) -> Result<Transaction<'static, Postgres>, AdminError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT set_config('app.actor_id', $1, true)")
            .bind(actor.to_string())
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Runs a single-row write as `actor`, reporting whether a row matched.
    async fn execute_as<'q>(
        &self,
        actor: UserId,
        query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<bool, AdminError> {
        let mut tx = self.begin_as(actor).await?;
        let result = query.execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn role_for_user(&self, user: UserId) -> Result<Option<AdminRole>, AdminError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        // Unknown role strings grant nothing.
        Ok(role.and_then(|r| r.parse().ok()))
    }

    async fn upsert_role(&self, user: UserId, role: AdminRole) -> Result<(), AdminError> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role",
        )
        .bind(user.into_uuid())
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<Service>, AdminError> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Service::try_from).collect()
    }

    async fn list_active_services(&self) -> Result<Vec<ServiceOption>, AdminError> {
        let rows = sqlx::query_as::<_, ServiceOptionRow>(
            "SELECT id, name, category FROM services WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ServiceOption::try_from).collect()
    }

    async fn insert_service(
        &self,
        actor: UserId,
        new: &NewService,
    ) -> Result<Service, AdminError> {
        // `NewService::new` bounds the duration to the column range.
        let duration = i32::try_from(new.duration_minutes)
            .map_err(|e| AdminError::Internal(e.to_string()))?;

        let mut tx = self.begin_as(actor).await?;
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "INSERT INTO services (id, name, category, description, price, duration_minutes, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(ServiceId::new().into_uuid())
        .bind(&new.name)
        .bind(new.category.as_str())
        .bind(new.description.as_deref())
        .bind(new.price)
        .bind(duration)
        .bind(new.is_active)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Service::try_from(row)
    }

    async fn set_service_active(
        &self,
        actor: UserId,
        id: ServiceId,
        is_active: bool,
    ) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("UPDATE services SET is_active = $2 WHERE id = $1")
                .bind(id.into_uuid())
                .bind(is_active),
        )
        .await
    }

    async fn delete_service(&self, actor: UserId, id: ServiceId) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("DELETE FROM services WHERE id = $1").bind(id.into_uuid()),
        )
        .await
    }

    async fn list_queue(&self) -> Result<Vec<QueueEntry>, AdminError> {
        let rows = sqlx::query_as::<_, QueueRow>(
            "SELECT q.id, q.service_id, q.customer_name, q.vehicle_plate, q.status, q.queued_at, \
                    s.name AS service_name, s.category AS service_category \
             FROM queues q LEFT JOIN services s ON s.id = q.service_id \
             ORDER BY q.queued_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QueueEntry::try_from).collect()
    }

    async fn insert_queue_item(
        &self,
        actor: UserId,
        new: &NewQueueItem,
    ) -> Result<QueueItem, AdminError> {
        let mut tx = self.begin_as(actor).await?;
        let row = sqlx::query_as::<_, QueueRow>(
            "INSERT INTO queues (id, service_id, customer_name, vehicle_plate) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, service_id, customer_name, vehicle_plate, status, queued_at, \
                       NULL::text AS service_name, NULL::text AS service_category",
        )
        .bind(QueueItemId::new().into_uuid())
        .bind(new.service_id.into_uuid())
        .bind(&new.customer_name)
        .bind(&new.vehicle_plate)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        QueueEntry::try_from(row).map(|entry| entry.item)
    }

    async fn set_queue_status(
        &self,
        actor: UserId,
        id: QueueItemId,
        status: QueueStatus,
    ) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("UPDATE queues SET status = $2 WHERE id = $1")
                .bind(id.into_uuid())
                .bind(status.as_str()),
        )
        .await
    }

    async fn delete_queue_item(&self, actor: UserId, id: QueueItemId) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("DELETE FROM queues WHERE id = $1").bind(id.into_uuid()),
        )
        .await
    }

    async fn list_tags(&self) -> Result<Vec<GalleryTag>, AdminError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name FROM gallery_tags ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(GalleryTag::from).collect())
    }

    async fn insert_tag(&self, actor: UserId, name: &str) -> Result<GalleryTag, AdminError> {
        let mut tx = self.begin_as(actor).await?;
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO gallery_tags (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(TagId::new().into_uuid())
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn rename_tag(&self, actor: UserId, id: TagId, name: &str) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("UPDATE gallery_tags SET name = $2 WHERE id = $1")
                .bind(id.into_uuid())
                .bind(name.to_string()),
        )
        .await
    }

    async fn delete_tag(&self, actor: UserId, id: TagId) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("DELETE FROM gallery_tags WHERE id = $1").bind(id.into_uuid()),
        )
        .await
    }

    async fn list_gallery(&self) -> Result<Vec<GalleryEntry>, AdminError> {
        let images = sqlx::query_as::<_, GalleryImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM gallery_images ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query_as::<_, ImageTagRow>(
            "SELECT l.image_id, t.id, t.name \
             FROM gallery_image_tags l JOIN gallery_tags t ON t.id = l.tag_id \
             ORDER BY t.name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_image: HashMap<Uuid, Vec<GalleryTag>> = HashMap::new();
        for link in links {
            tags_by_image
                .entry(link.image_id)
                .or_default()
                .push(GalleryTag {
                    id: link.id.into(),
                    name: link.name,
                });
        }

        Ok(images
            .into_iter()
            .map(|row| {
                let tags = tags_by_image.remove(&row.id).unwrap_or_default();
                GalleryEntry {
                    image: row.into(),
                    tags,
                }
            })
            .collect())
    }

    async fn get_gallery_image(&self, id: ImageId) -> Result<Option<GalleryImage>, AdminError> {
        let row = sqlx::query_as::<_, GalleryImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(GalleryImage::from))
    }

    async fn insert_gallery_image(
        &self,
        actor: UserId,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, AdminError> {
        let mut tx = self.begin_as(actor).await?;
        let row = sqlx::query_as::<_, GalleryImageRow>(&format!(
            "INSERT INTO gallery_images (id, title, image_url, image_path, alt_text, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(ImageId::new().into_uuid())
        .bind(&new.title)
        .bind(&new.image_url)
        .bind(&new.image_path)
        .bind(new.alt_text.as_deref())
        .bind(new.is_visible)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn update_gallery_image(
        &self,
        actor: UserId,
        id: ImageId,
        update: &GalleryImageUpdate,
    ) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query(
                "UPDATE gallery_images SET title = $2, alt_text = $3, is_visible = $4 WHERE id = $1",
            )
            .bind(id.into_uuid())
            .bind(update.title.clone())
            .bind(update.alt_text.clone())
            .bind(update.is_visible),
        )
        .await
    }

    async fn set_gallery_visible(
        &self,
        actor: UserId,
        id: ImageId,
        is_visible: bool,
    ) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("UPDATE gallery_images SET is_visible = $2 WHERE id = $1")
                .bind(id.into_uuid())
                .bind(is_visible),
        )
        .await
    }

    async fn delete_gallery_image(&self, actor: UserId, id: ImageId) -> Result<bool, AdminError> {
        self.execute_as(
            actor,
            sqlx::query("DELETE FROM gallery_images WHERE id = $1").bind(id.into_uuid()),
        )
        .await
    }

    async fn unlink_image_tags(&self, image: ImageId) -> Result<u64, AdminError> {
        let result = sqlx::query("DELETE FROM gallery_image_tags WHERE image_id = $1")
            .bind(image.into_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn link_image_tags(&self, image: ImageId, tags: &[TagId]) -> Result<(), AdminError> {
        if tags.is_empty() {
            return Ok(());
        }
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO gallery_image_tags (image_id, tag_id) ");
        builder.push_values(tags, |mut row, tag| {
            row.push_bind(image.into_uuid()).push_bind(tag.into_uuid());
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn recent_audit_logs(&self, limit: u32) -> Result<Vec<AuditLog>, AdminError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, action, table_name, record_id, actor_id, created_at \
             FROM audit_logs ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AuditLog::from).collect())
    }
}
