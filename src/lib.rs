//! Ink Studio server
//!
//! REST JSON API behind a tattoo and art studio website: public content and
//! gallery, an appointment booking flow driven by the studio's availability,
//! and a password-gated admin API.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Multipart framing on top of the largest accepted image
    let upload_limit = DefaultBodyLimit::max(state.config.uploads.max_bytes + 64 * 1024);

    let gallery = Router::new()
        .route("/gallery", get(api::gallery::list_gallery))
        .route("/gallery", post(api::gallery::create_gallery_item))
        .route("/gallery/:id", put(api::gallery::update_gallery_item))
        .route("/gallery/:id", delete(api::gallery::delete_gallery_item))
        .layer(upload_limit);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        // Booking flow
        .route("/booking/calendar", get(api::booking::calendar))
        .route("/booking/slots", get(api::booking::slots))
        .route("/booking/validate-contact", post(api::booking::validate_contact))
        .route("/booking/appointments", post(api::booking::submit))
        // Appointments
        .route("/appointments", get(api::appointments::list_appointments))
        .route("/appointments/:id", get(api::appointments::get_appointment))
        .route("/appointments/:id", delete(api::appointments::delete_appointment))
        .route("/appointments/:id/status", put(api::appointments::update_status))
        // Schedules
        .route("/schedules/working-hours", get(api::schedules::get_working_hours))
        .route("/schedules/working-hours", put(api::schedules::set_working_hours))
        .route("/schedules/blocked", get(api::schedules::get_blocked))
        .route("/schedules/blocked-dates", post(api::schedules::add_blocked_date))
        .route("/schedules/blocked-dates/:date", delete(api::schedules::remove_blocked_date))
        .route("/schedules/blocked-ranges", post(api::schedules::add_blocked_range))
        .route("/schedules/blocked-ranges/:id", delete(api::schedules::remove_blocked_range))
        // Site content
        .route("/content", get(api::content::get_content))
        .route("/content", put(api::content::update_content))
        .merge(gallery)
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    // Uploaded gallery images
    let uploads_path = state.config.uploads.public_path.trim_end_matches('/');
    let uploads = ServeDir::new(&state.config.uploads.dir);

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service(uploads_path, uploads)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        repository::{memory::MemoryDocumentStore, Repository},
        services::{email::LogNotifier, uploads::DiskBlobStore, Services},
    };

    fn app() -> Router {
        let config = AppConfig::default();
        let services = Services::new(
            Repository::new(Arc::new(MemoryDocumentStore::new())),
            &config,
            Arc::new(LogNotifier),
            Arc::new(DiskBlobStore::new(&config.uploads)),
        );
        create_router(AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_routes_are_mounted() {
        assert_eq!(status_of("/api/v1/health").await, StatusCode::OK);
        assert_eq!(status_of("/api/v1/gallery").await, StatusCode::OK);
        assert_eq!(status_of("/api-docs/openapi.json").await, StatusCode::OK);
        assert_eq!(status_of("/api/v1/nothing-here").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_route_without_token() {
        assert_eq!(status_of("/api/v1/schedules/blocked").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_query_is_rejected() {
        assert_eq!(
            status_of("/api/v1/booking/calendar?month=someday").await,
            StatusCode::BAD_REQUEST
        );
    }
}
