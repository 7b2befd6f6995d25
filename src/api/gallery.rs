//! Gallery endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::{
        gallery::{GalleryUploadForm, ImageUpload},
        GalleryItem,
    },
    AppState,
};

use super::AdminUser;

/// Fields of a gallery multipart form
#[derive(Default)]
struct GalleryForm {
    title: Option<String>,
    image: Option<ImageUpload>,
}

async fn read_form(mut multipart: Multipart) -> AppResult<GalleryForm> {
    let mut form = GalleryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                form.title = Some(text);
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// List gallery items, newest first
#[utoipa::path(
    get,
    path = "/gallery",
    tag = "gallery",
    responses(
        (status = 200, description = "Gallery items", body = Vec<GalleryItem>)
    )
)]
pub async fn list_gallery(State(state): State<AppState>) -> AppResult<Json<Vec<GalleryItem>>> {
    let items = state.services.gallery.list().await?;
    Ok(Json(items))
}

/// Upload a new artwork
#[utoipa::path(
    post,
    path = "/gallery",
    tag = "gallery",
    security(("bearer_auth" = [])),
    request_body(content = GalleryUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created", body = GalleryItem),
        (status = 400, description = "Missing title or image", body = crate::error::ErrorResponse),
        (status = 413, description = "Image too large", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_gallery_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<GalleryItem>)> {
    let form = read_form(multipart).await?;
    let image = form
        .image
        .ok_or_else(|| AppError::Validation("image: is required".to_string()))?;

    let item = state
        .services
        .gallery
        .create(form.title.as_deref().unwrap_or(""), image)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Rename an artwork and/or replace its image
#[utoipa::path(
    put,
    path = "/gallery/{id}",
    tag = "gallery",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Gallery item ID")),
    request_body(content = GalleryUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item updated", body = GalleryItem),
        (status = 404, description = "Unknown item", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_gallery_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<GalleryItem>> {
    let form = read_form(multipart).await?;
    let item = state
        .services
        .gallery
        .update(&id, form.title.as_deref(), form.image)
        .await?;
    Ok(Json(item))
}

/// Delete an artwork and its image
#[utoipa::path(
    delete,
    path = "/gallery/{id}",
    tag = "gallery",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Gallery item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Unknown item", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.gallery.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
