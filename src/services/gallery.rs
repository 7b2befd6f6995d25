//! Gallery service

use std::sync::Arc;

use chrono::Utc;

use super::uploads::{blob_name, BlobStore, StoredBlob};
use crate::{
    error::{AppError, AppResult},
    models::{
        gallery::{ImageUpload, NewGalleryItem},
        GalleryItem,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct GalleryService {
    repository: Repository,
    blobs: Arc<dyn BlobStore>,
    max_bytes: usize,
}

impl GalleryService {
    pub fn new(repository: Repository, blobs: Arc<dyn BlobStore>, max_bytes: usize) -> Self {
        Self {
            repository,
            blobs,
            max_bytes,
        }
    }

    /// All items, newest first
    pub async fn list(&self) -> AppResult<Vec<GalleryItem>> {
        let mut items = self.repository.gallery_list().await?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> AppResult<GalleryItem> {
        self.repository
            .gallery_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gallery item {} not found", id)))
    }

    pub async fn create(&self, title: &str, image: ImageUpload) -> AppResult<GalleryItem> {
        let title = required_title(title)?;
        let blob = self.store_image(&image).await?;

        let created = self
            .repository
            .gallery_create(NewGalleryItem {
                title,
                image_url: blob.url.clone(),
                file_name: Some(blob.file_name.clone()),
                created_at: Utc::now(),
            })
            .await;

        match created {
            Ok(item) => {
                tracing::info!("Gallery item {} created ({})", item.id, blob.file_name);
                Ok(item)
            }
            Err(e) => {
                self.discard_blob(&blob.file_name, None).await;
                Err(e)
            }
        }
    }

    /// Change the title and/or replace the image
    pub async fn update(
        &self,
        id: &str,
        title: Option<&str>,
        image: Option<ImageUpload>,
    ) -> AppResult<GalleryItem> {
        if title.is_none() && image.is_none() {
            return Err(AppError::Validation(
                "Nothing to update (send a title and/or an image)".to_string(),
            ));
        }

        let mut item = self.get(id).await?;
        let title = title.map(required_title).transpose()?;

        let blob = match &image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let updated = self
            .repository
            .gallery_update(
                id,
                title.as_deref(),
                blob.as_ref().map(|b| (b.url.as_str(), b.file_name.as_str())),
            )
            .await;

        if let Err(e) = updated {
            if let Some(blob) = &blob {
                if item.file_name.as_deref() != Some(blob.file_name.as_str()) {
                    self.discard_blob(&blob.file_name, Some(id)).await;
                }
            }
            return Err(e);
        }

        if let Some(title) = title {
            item.title = title;
        }
        if let Some(blob) = blob {
            let previous = item.file_name.replace(blob.file_name.clone());
            item.image_url = blob.url;
            if let Some(previous) = previous.filter(|p| *p != blob.file_name) {
                self.discard_blob(&previous, Some(id)).await;
            }
        }

        tracing::info!("Gallery item {} updated", id);
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let item = self.get(id).await?;
        self.repository.gallery_delete(id).await?;
        tracing::info!("Gallery item {} deleted", id);

        if let Some(file_name) = &item.file_name {
            self.discard_blob(file_name, Some(id)).await;
        }
        Ok(())
    }

    async fn store_image(&self, image: &ImageUpload) -> AppResult<StoredBlob> {
        if image.bytes.is_empty() {
            return Err(AppError::Validation("image: file is empty".to_string()));
        }
        if image.bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Image is {} bytes, the limit is {}",
                image.bytes.len(),
                self.max_bytes
            )));
        }
        if let Some(content_type) = &image.content_type {
            if !content_type.starts_with("image/") {
                return Err(AppError::Validation(format!(
                    "image: unsupported content type {}",
                    content_type
                )));
            }
        }

        let name = blob_name(&image.file_name, &image.bytes);
        self.blobs
            .put(&name, &image.bytes, image.content_type.as_deref())
            .await
    }

    /// Best-effort removal of a blob no other item points to
    async fn discard_blob(&self, file_name: &str, owner: Option<&str>) {
        match self.repository.gallery_list().await {
            Ok(items) => {
                let shared = items
                    .iter()
                    .any(|i| Some(i.id.as_str()) != owner && i.file_name.as_deref() == Some(file_name));
                if shared {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("Keeping blob {}: could not check references: {}", file_name, e);
                return;
            }
        }

        if let Err(e) = self.blobs.delete(file_name).await {
            tracing::warn!("Failed to delete blob {}: {}", file_name, e);
        }
    }
}

fn required_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title: is required".to_string()));
    }
    Ok(title.to_string())
}
