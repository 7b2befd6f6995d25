//! Site content (hero, contact details)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Editable text shown on the public site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SiteContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub instagram_url: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub contact_address: String,
    /// Free-text opening hours shown in the footer
    pub working_hours_text: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero_title: "Art on skin".to_string(),
            hero_subtitle: "Professional tattoo studio in Tel Aviv".to_string(),
            hero_description: "We design unique, custom tattoos. Every piece is a work of art."
                .to_string(),
            instagram_url: "https://instagram.com/inkstudio".to_string(),
            contact_phone: "054-1234567".to_string(),
            contact_email: "info@inkstudio.example".to_string(),
            contact_address: "123 Dizengoff St, Tel Aviv".to_string(),
            working_hours_text: "Sun-Thu: 10:00-20:00 | Fri: 10:00-14:00".to_string(),
        }
    }
}

/// Partial update of the site content
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSiteContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_description: Option<String>,
    pub instagram_url: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_address: Option<String>,
    pub working_hours_text: Option<String>,
}

impl SiteContent {
    /// Overwrite the fields present in `update`
    pub fn merge(&mut self, update: UpdateSiteContent) {
        let UpdateSiteContent {
            hero_title,
            hero_subtitle,
            hero_description,
            instagram_url,
            contact_phone,
            contact_email,
            contact_address,
            working_hours_text,
        } = update;

        if let Some(v) = hero_title {
            self.hero_title = v;
        }
        if let Some(v) = hero_subtitle {
            self.hero_subtitle = v;
        }
        if let Some(v) = hero_description {
            self.hero_description = v;
        }
        if let Some(v) = instagram_url {
            self.instagram_url = v;
        }
        if let Some(v) = contact_phone {
            self.contact_phone = v;
        }
        if let Some(v) = contact_email {
            self.contact_email = v;
        }
        if let Some(v) = contact_address {
            self.contact_address = v;
        }
        if let Some(v) = working_hours_text {
            self.working_hours_text = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut content = SiteContent::default();
        content.merge(UpdateSiteContent {
            hero_title: Some("Black & grey".to_string()),
            ..Default::default()
        });

        assert_eq!(content.hero_title, "Black & grey");
        assert_eq!(content.contact_phone, SiteContent::default().contact_phone);
    }
}
