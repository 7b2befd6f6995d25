//! API handlers for the Ink Studio REST endpoints

pub mod appointments;
pub mod auth;
pub mod booking;
pub mod content;
pub mod gallery;
pub mod health;
pub mod openapi;
pub mod schedules;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{error::AppError, models::auth::AdminClaims, AppState};

/// Extractor guarding admin routes with the dashboard JWT
pub struct AdminUser(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::Authentication(e.to_string()))?;

        let claims = state.services.auth.verify(bearer.token())?;
        Ok(AdminUser(claims))
    }
}
