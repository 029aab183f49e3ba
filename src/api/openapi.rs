//! OpenAPI document for the REST API.
//!
//! Served at `/api-docs/openapi.json`; with the `swagger-ui` feature the
//! interactive UI is mounted at `/docs`.

use axum::Router;
use utoipa::OpenApi;

use super::handlers;
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "washbay-admin",
        description = "Admin API for the service catalog, walk-in queue, photo gallery and activity log."
    ),
    paths(
        handlers::system::health_handler,
        handlers::account::me,
        handlers::account::dashboard,
        handlers::services::list_services,
        handlers::services::list_active_services,
        handlers::services::create_service,
        handlers::services::toggle_service,
        handlers::services::delete_service,
        handlers::queues::list_queue,
        handlers::queues::create_queue_item,
        handlers::queues::update_queue_status,
        handlers::queues::delete_queue_item,
        handlers::tags::list_tags,
        handlers::tags::create_tag,
        handlers::tags::rename_tag,
        handlers::tags::delete_tag,
        handlers::gallery::list_images,
        handlers::gallery::create_image,
        handlers::gallery::toggle_visibility,
        handlers::gallery::update_image,
        handlers::gallery::delete_image,
        handlers::logs::recent_logs,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "System"),
        (name = "Account"),
        (name = "Services"),
        (name = "Queues"),
        (name = "Gallery"),
        (name = "Logs")
    )
)]
pub struct ApiDoc;

/// Routes serving the document (and the UI when enabled).
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Routes serving the document (and the UI when enabled).
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/me",
            "/api/v1/services/{id}/toggle",
            "/api/v1/queues/{id}/status",
            "/api/v1/gallery/tags/{id}",
            "/api/v1/gallery/{id}/visibility",
            "/api/v1/logs",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
