//! Business logic services

pub mod appointments;
pub mod auth;
pub mod availability;
pub mod booking;
pub mod content;
pub mod email;
pub mod gallery;
pub mod schedules;
pub mod uploads;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub schedules: schedules::SchedulesService,
    pub appointments: appointments::AppointmentsService,
    pub booking: booking::BookingService,
    pub gallery: gallery::GalleryService,
    pub content: content::ContentService,
    repository: Repository,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        notifier: Arc<dyn email::Notifier>,
        blobs: Arc<dyn uploads::BlobStore>,
    ) -> Self {
        let schedules = schedules::SchedulesService::new(repository.clone());
        let appointments = appointments::AppointmentsService::new(
            repository.clone(),
            schedules.clone(),
            notifier,
            config.email.notify_to.clone(),
        );

        Self {
            auth: auth::AuthService::new(config.admin.clone()),
            booking: booking::BookingService::new(schedules.clone(), appointments.clone()),
            gallery: gallery::GalleryService::new(repository.clone(), blobs, config.uploads.max_bytes),
            content: content::ContentService::new(repository.clone()),
            schedules,
            appointments,
            repository,
        }
    }

    /// Build the services from configuration alone (SMTP or log notifier, disk uploads)
    pub fn from_config(repository: Repository, config: &AppConfig) -> Self {
        Self::new(
            repository,
            config,
            email::notifier_from_config(&config.email),
            Arc::new(uploads::DiskBlobStore::new(&config.uploads)),
        )
    }

    /// Readiness probe against the persistence backend
    pub async fn ping_store(&self) -> crate::error::AppResult<()> {
        self.repository.store().ping().await
    }
}
