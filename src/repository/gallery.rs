//! Gallery domain methods on Repository

use serde_json::json;

use super::{Repository, GALLERY};
use crate::{
    error::AppResult,
    models::{gallery::NewGalleryItem, GalleryItem},
};

impl Repository {
    pub async fn gallery_list(&self) -> AppResult<Vec<GalleryItem>> {
        self.list_records(GALLERY).await
    }

    pub async fn gallery_get(&self, id: &str) -> AppResult<Option<GalleryItem>> {
        self.get_record(GALLERY, id).await
    }

    pub async fn gallery_create(&self, data: NewGalleryItem) -> AppResult<GalleryItem> {
        let id = self.create_record(GALLERY, &data).await?;
        Ok(data.with_id(id))
    }

    /// Update title and/or image of an item
    pub async fn gallery_update(
        &self,
        id: &str,
        title: Option<&str>,
        image: Option<(&str, &str)>,
    ) -> AppResult<()> {
        let mut patch = serde_json::Map::new();
        if let Some(title) = title {
            patch.insert("title".to_string(), json!(title));
        }
        if let Some((image_url, file_name)) = image {
            patch.insert("image_url".to_string(), json!(image_url));
            patch.insert("file_name".to_string(), json!(file_name));
        }
        self.store()
            .update(GALLERY, id, serde_json::Value::Object(patch))
            .await
    }

    pub async fn gallery_delete(&self, id: &str) -> AppResult<()> {
        self.store().delete(GALLERY, id).await
    }
}
