//! Site content methods on Repository

use super::{Repository, SITE_CONTENT_KEY};
use crate::{error::AppResult, models::SiteContent};

impl Repository {
    pub async fn content_get(&self) -> AppResult<Option<SiteContent>> {
        self.get_singleton_as(SITE_CONTENT_KEY).await
    }

    pub async fn content_set(&self, content: &SiteContent) -> AppResult<()> {
        self.set_singleton_from(SITE_CONTENT_KEY, content).await
    }
}
