//! Schedule endpoints (working hours, blocked dates and ranges)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        parse_date,
        schedule::{CreateBlockedDate, CreateBlockedDateRange},
        BlockedDateRange, BlockedDates, WorkingHours,
    },
    AppState,
};

use super::AdminUser;

// ---- Working hours ----

/// Weekly working hours
#[utoipa::path(
    get,
    path = "/schedules/working-hours",
    tag = "schedules",
    responses(
        (status = 200, description = "Working hours", body = WorkingHours)
    )
)]
pub async fn get_working_hours(State(state): State<AppState>) -> AppResult<Json<WorkingHours>> {
    let hours = state.services.schedules.working_hours().await?;
    Ok(Json(hours))
}

/// Replace the weekly working hours
#[utoipa::path(
    put,
    path = "/schedules/working-hours",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = WorkingHours,
    responses(
        (status = 200, description = "Working hours saved", body = WorkingHours),
        (status = 400, description = "A day opens after it closes", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_working_hours(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(hours): Json<WorkingHours>,
) -> AppResult<Json<WorkingHours>> {
    let hours = state.services.schedules.set_working_hours(hours).await?;
    Ok(Json(hours))
}

// ---- Blocked dates ----

/// Blocked dates and ranges
#[utoipa::path(
    get,
    path = "/schedules/blocked",
    tag = "schedules",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Blocked dates and ranges", body = BlockedDates)
    )
)]
pub async fn get_blocked(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<BlockedDates>> {
    let blocked = state.services.schedules.blocked().await?;
    Ok(Json(blocked))
}

/// Block a single day
#[utoipa::path(
    post,
    path = "/schedules/blocked-dates",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateBlockedDate,
    responses(
        (status = 200, description = "Updated blocked dates", body = BlockedDates)
    )
)]
pub async fn add_blocked_date(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(data): Json<CreateBlockedDate>,
) -> AppResult<Json<BlockedDates>> {
    let date = parse_date("date", &data.date)?;
    let blocked = state.services.schedules.add_blocked_date(date).await?;
    Ok(Json(blocked))
}

/// Unblock a single day
#[utoipa::path(
    delete,
    path = "/schedules/blocked-dates/{date}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Blocked day (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "Updated blocked dates", body = BlockedDates)
    )
)]
pub async fn remove_blocked_date(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(date): Path<String>,
) -> AppResult<Json<BlockedDates>> {
    let date = parse_date("date", &date)?;
    let blocked = state.services.schedules.remove_blocked_date(date).await?;
    Ok(Json(blocked))
}

// ---- Blocked ranges ----

/// Block a range of days
#[utoipa::path(
    post,
    path = "/schedules/blocked-ranges",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateBlockedDateRange,
    responses(
        (status = 201, description = "Range created", body = BlockedDateRange),
        (status = 400, description = "Invalid range", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_blocked_range(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(data): Json<CreateBlockedDateRange>,
) -> AppResult<(StatusCode, Json<BlockedDateRange>)> {
    let start = parse_date("start_date", &data.start_date)?;
    let end = parse_date("end_date", &data.end_date)?;
    let range = state
        .services
        .schedules
        .add_blocked_range(start, end, data.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(range)))
}

/// Remove a blocked range
#[utoipa::path(
    delete,
    path = "/schedules/blocked-ranges/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Range ID")),
    responses(
        (status = 204, description = "Range removed (or was already gone)")
    )
)]
pub async fn remove_blocked_range(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.schedules.remove_blocked_range(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
