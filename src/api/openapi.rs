//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{appointments, auth, booking, content, gallery, health, schedules};

/// Registers the bearer token scheme used by admin routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ink Studio API",
        version = "0.3.0",
        description = "Tattoo and art studio site: booking, gallery and admin REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Booking
        booking::calendar,
        booking::slots,
        booking::validate_contact,
        booking::submit,
        // Appointments
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::update_status,
        appointments::delete_appointment,
        // Schedules
        schedules::get_working_hours,
        schedules::set_working_hours,
        schedules::get_blocked,
        schedules::add_blocked_date,
        schedules::remove_blocked_date,
        schedules::add_blocked_range,
        schedules::remove_blocked_range,
        // Gallery
        gallery::list_gallery,
        gallery::create_gallery_item,
        gallery::update_gallery_item,
        gallery::delete_gallery_item,
        // Content
        content::get_content,
        content::update_content,
    ),
    components(
        schemas(
            // Auth
            crate::models::auth::LoginRequest,
            crate::models::auth::LoginResponse,
            // Booking
            booking::ContactCheckResponse,
            crate::models::booking::CalendarDay,
            crate::models::booking::DaySlots,
            crate::models::appointment::ContactDetails,
            crate::models::appointment::CreateAppointment,
            // Appointments
            crate::models::appointment::Appointment,
            crate::models::appointment::AppointmentStatus,
            crate::models::appointment::Category,
            crate::models::appointment::TimeSlot,
            crate::models::appointment::UpdateAppointmentStatus,
            crate::models::appointment::AppointmentQuery,
            // Schedules
            crate::models::schedule::DayOfWeek,
            crate::models::schedule::DayHours,
            crate::models::schedule::WorkingHours,
            crate::models::schedule::BlockedDates,
            crate::models::schedule::BlockedDateRange,
            crate::models::schedule::CreateBlockedDate,
            crate::models::schedule::CreateBlockedDateRange,
            // Gallery
            crate::models::gallery::GalleryItem,
            crate::models::gallery::GalleryUploadForm,
            // Content
            crate::models::content::SiteContent,
            crate::models::content::UpdateSiteContent,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin authentication"),
        (name = "booking", description = "Client booking flow"),
        (name = "appointments", description = "Appointment management"),
        (name = "schedules", description = "Working hours and blocked dates"),
        (name = "gallery", description = "Gallery management"),
        (name = "content", description = "Site content")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
