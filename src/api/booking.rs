//! Public booking endpoints (calendar, slots, submission)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        appointment::{ContactDetails, CreateAppointment},
        booking::{CalendarDay, CalendarQuery, DaySlots, SlotsQuery},
        Appointment, Category,
    },
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct ContactCheckResponse {
    pub valid: bool,
    pub category: Category,
}

/// Days of a month with their availability
#[utoipa::path(
    get,
    path = "/booking/calendar",
    tag = "booking",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar days", body = Vec<CalendarDay>),
        (status = 400, description = "Invalid month", body = crate::error::ErrorResponse)
    )
)]
pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    let days = state.services.booking.calendar(&query.month).await?;
    Ok(Json(days))
}

/// Hourly slots of a day
#[utoipa::path(
    get,
    path = "/booking/slots",
    tag = "booking",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Slots of the day", body = DaySlots),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<DaySlots>> {
    let slots = state.services.booking.slots(&query.date).await?;
    Ok(Json(slots))
}

/// Check the contact step before picking a date
#[utoipa::path(
    post,
    path = "/booking/validate-contact",
    tag = "booking",
    request_body = ContactDetails,
    responses(
        (status = 200, description = "Contact details are valid", body = ContactCheckResponse),
        (status = 400, description = "Invalid contact details", body = crate::error::ErrorResponse)
    )
)]
pub async fn validate_contact(
    State(state): State<AppState>,
    Json(details): Json<ContactDetails>,
) -> AppResult<Json<ContactCheckResponse>> {
    let category = state.services.booking.validate_contact(&details)?;
    Ok(Json(ContactCheckResponse {
        valid: true,
        category,
    }))
}

/// Submit a booking request
#[utoipa::path(
    post,
    path = "/booking/appointments",
    tag = "booking",
    request_body = CreateAppointment,
    responses(
        (status = 201, description = "Appointment requested", body = Appointment),
        (status = 400, description = "Invalid booking", body = crate::error::ErrorResponse),
        (status = 409, description = "Slot no longer available", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    Json(data): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.services.booking.submit(&data).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
