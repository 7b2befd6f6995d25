//! Schedules domain methods on Repository (working hours, blocked dates)

use super::{Repository, BLOCKED_DATES_KEY, WORKING_HOURS_KEY};
use crate::{
    error::AppResult,
    models::{BlockedDates, WorkingHours},
};

impl Repository {
    /// Stored working hours table, if the admin ever saved one
    pub async fn schedules_working_hours(&self) -> AppResult<Option<WorkingHours>> {
        self.get_singleton_as(WORKING_HOURS_KEY).await
    }

    pub async fn schedules_set_working_hours(&self, hours: &WorkingHours) -> AppResult<()> {
        self.set_singleton_from(WORKING_HOURS_KEY, hours).await
    }

    /// Blocked dates and ranges (empty when never written)
    pub async fn schedules_blocked_dates(&self) -> AppResult<BlockedDates> {
        Ok(self
            .get_singleton_as(BLOCKED_DATES_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn schedules_set_blocked_dates(&self, blocked: &BlockedDates) -> AppResult<()> {
        self.set_singleton_from(BLOCKED_DATES_KEY, blocked).await
    }
}
