//! Site content endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{content::UpdateSiteContent, SiteContent},
    AppState,
};

use super::AdminUser;

/// Public site text
#[utoipa::path(
    get,
    path = "/content",
    tag = "content",
    responses(
        (status = 200, description = "Site content", body = SiteContent)
    )
)]
pub async fn get_content(State(state): State<AppState>) -> AppResult<Json<SiteContent>> {
    let content = state.services.content.get().await?;
    Ok(Json(content))
}

/// Update some of the site text
#[utoipa::path(
    put,
    path = "/content",
    tag = "content",
    security(("bearer_auth" = [])),
    request_body = UpdateSiteContent,
    responses(
        (status = 200, description = "Updated content", body = SiteContent)
    )
)]
pub async fn update_content(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(update): Json<UpdateSiteContent>,
) -> AppResult<Json<SiteContent>> {
    let content = state.services.content.update(update).await?;
    Ok(Json(content))
}
