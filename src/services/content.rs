//! Site content service

use crate::{
    error::AppResult,
    models::{content::UpdateSiteContent, SiteContent},
    repository::Repository,
};

#[derive(Clone)]
pub struct ContentService {
    repository: Repository,
}

impl ContentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Current content; the defaults are stored on first read
    pub async fn get(&self) -> AppResult<SiteContent> {
        if let Some(content) = self.repository.content_get().await? {
            return Ok(content);
        }

        let content = SiteContent::default();
        self.repository.content_set(&content).await?;
        tracing::info!("Seeded default site content");
        Ok(content)
    }

    pub async fn update(&self, update: UpdateSiteContent) -> AppResult<SiteContent> {
        let mut content = self.get().await?;
        content.merge(update);
        self.repository.content_set(&content).await?;
        tracing::info!("Site content updated");
        Ok(content)
    }
}
