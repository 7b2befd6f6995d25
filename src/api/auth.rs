//! Admin login

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::auth::{LoginRequest, LoginResponse},
    AppState,
};

/// Exchange the admin password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.auth.login(&request.password)?;
    Ok(Json(response))
}
