//! Gallery models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A gallery artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    /// Public URL of the image
    pub image_url: String,
    /// Blob name in the upload store (absent for external images)
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored form of a gallery item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGalleryItem {
    pub title: String,
    pub image_url: String,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewGalleryItem {
    pub fn with_id(self, id: String) -> GalleryItem {
        GalleryItem {
            id,
            title: self.title,
            image_url: self.image_url,
            file_name: self.file_name,
            created_at: self.created_at,
        }
    }
}

/// Uploaded image extracted from a multipart request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart form accepted by the gallery endpoints (documentation only)
#[derive(Debug, ToSchema)]
pub struct GalleryUploadForm {
    pub title: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub image: Option<Vec<u8>>,
}
