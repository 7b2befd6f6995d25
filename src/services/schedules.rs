//! Schedules service (working hours, blocked dates and ranges)

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::availability::ScheduleSnapshot;
use crate::{
    error::{AppError, AppResult},
    models::{BlockedDateRange, BlockedDates, WorkingHours},
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    /// Serializes read-modify-write of the blocked dates singleton
    blocked_lock: Arc<Mutex<()>>,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            blocked_lock: Arc::new(Mutex::new(())),
        }
    }

    // ---- Working hours ----

    /// Current table, or the studio defaults when none was saved
    pub async fn working_hours(&self) -> AppResult<WorkingHours> {
        Ok(self
            .repository
            .schedules_working_hours()
            .await?
            .unwrap_or_default())
    }

    /// Replace the whole table
    pub async fn set_working_hours(&self, hours: WorkingHours) -> AppResult<WorkingHours> {
        hours.validate()?;
        self.repository.schedules_set_working_hours(&hours).await?;
        tracing::info!("Working hours updated");
        Ok(hours)
    }

    // ---- Blocked dates ----

    pub async fn blocked(&self) -> AppResult<BlockedDates> {
        self.repository.schedules_blocked_dates().await
    }

    /// Block a whole day; blocking it twice keeps a single entry
    pub async fn add_blocked_date(&self, date: NaiveDate) -> AppResult<BlockedDates> {
        let _guard = self.blocked_lock.lock().await;
        let mut blocked = self.blocked().await?;
        if blocked.dates.contains(&date) {
            return Ok(blocked);
        }

        blocked.dates.push(date);
        blocked.dates.sort();
        self.repository.schedules_set_blocked_dates(&blocked).await?;
        tracing::info!("Blocked date {}", date);
        Ok(blocked)
    }

    /// Unblock a day; unknown dates are ignored
    pub async fn remove_blocked_date(&self, date: NaiveDate) -> AppResult<BlockedDates> {
        let _guard = self.blocked_lock.lock().await;
        let mut blocked = self.blocked().await?;
        let before = blocked.dates.len();
        blocked.dates.retain(|d| *d != date);
        if blocked.dates.len() == before {
            return Ok(blocked);
        }

        self.repository.schedules_set_blocked_dates(&blocked).await?;
        tracing::info!("Unblocked date {}", date);
        Ok(blocked)
    }

    // ---- Blocked ranges ----

    /// Block every day from `start` to `end` inclusive. Ranges may overlap.
    pub async fn add_blocked_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<BlockedDateRange> {
        if start > end {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        let range = BlockedDateRange {
            id: Uuid::new_v4().to_string(),
            start_date: start,
            end_date: end,
            reason: reason.map(|r| r.trim().to_string()).unwrap_or_default(),
            created_at: Utc::now(),
        };

        let _guard = self.blocked_lock.lock().await;
        let mut blocked = self.blocked().await?;
        blocked.ranges.push(range.clone());
        self.repository.schedules_set_blocked_dates(&blocked).await?;
        tracing::info!("Blocked range {} .. {} ({})", start, end, range.id);
        Ok(range)
    }

    /// Remove a range by id; a missing id is a no-op
    pub async fn remove_blocked_range(&self, id: &str) -> AppResult<()> {
        let _guard = self.blocked_lock.lock().await;
        let mut blocked = self.blocked().await?;
        let before = blocked.ranges.len();
        blocked.ranges.retain(|r| r.id != id);
        if blocked.ranges.len() == before {
            tracing::warn!("Blocked range {} not found, nothing removed", id);
            return Ok(());
        }

        self.repository.schedules_set_blocked_dates(&blocked).await?;
        tracing::info!("Removed blocked range {}", id);
        Ok(())
    }

    // ---- Availability ----

    /// Fresh snapshot of everything the availability calculator needs
    pub async fn snapshot(&self) -> AppResult<ScheduleSnapshot> {
        let (working_hours, blocked, appointments) = tokio::try_join!(
            self.working_hours(),
            self.blocked(),
            self.repository.appointments_list(),
        )?;
        Ok(ScheduleSnapshot::new(working_hours, blocked, appointments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::{
        models::DayHours,
        repository::{memory::MemoryDocumentStore, Document, DocumentStore},
    };

    fn service() -> SchedulesService {
        SchedulesService::new(Repository::new(Arc::new(MemoryDocumentStore::new())))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_working_hours_default_then_round_trip() {
        let service = service();
        assert_eq!(service.working_hours().await.unwrap(), WorkingHours::default());

        let mut hours = WorkingHours::closed();
        hours.wednesday = DayHours::open(12, 22);
        service.set_working_hours(hours.clone()).await.unwrap();

        assert_eq!(service.working_hours().await.unwrap(), hours);
    }

    #[tokio::test]
    async fn test_set_working_hours_rejects_invalid_table() {
        let service = service();
        let mut hours = WorkingHours::default();
        hours.monday = DayHours::open(18, 9);

        let result = service.set_working_hours(hours).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.working_hours().await.unwrap(), WorkingHours::default());
    }

    #[tokio::test]
    async fn test_add_blocked_date_is_idempotent() {
        let service = service();
        let day = date(2025, 12, 25);

        service.add_blocked_date(day).await.unwrap();
        let blocked = service.add_blocked_date(day).await.unwrap();

        assert_eq!(blocked.dates, vec![day]);
        assert_eq!(service.blocked().await.unwrap().dates, vec![day]);
    }

    #[tokio::test]
    async fn test_remove_blocked_date_is_idempotent() {
        let service = service();
        let keep = date(2025, 12, 24);
        let gone = date(2025, 12, 25);
        service.add_blocked_date(keep).await.unwrap();
        service.add_blocked_date(gone).await.unwrap();

        let first = service.remove_blocked_date(gone).await.unwrap();
        let second = service.remove_blocked_date(gone).await.unwrap();

        assert_eq!(first.dates, vec![keep]);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_blocked_ranges() {
        let service = service();

        let range = service
            .add_blocked_range(date(2025, 8, 1), date(2025, 8, 14), Some(" Summer break ".to_string()))
            .await
            .unwrap();
        assert_eq!(range.reason, "Summer break");

        // Overlap is allowed
        service
            .add_blocked_range(date(2025, 8, 10), date(2025, 8, 20), None)
            .await
            .unwrap();
        assert_eq!(service.blocked().await.unwrap().ranges.len(), 2);

        service.remove_blocked_range(&range.id).await.unwrap();
        // Second removal is a no-op
        service.remove_blocked_range(&range.id).await.unwrap();

        let ranges = service.blocked().await.unwrap().ranges;
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_date, date(2025, 8, 10));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let service = service();
        let result = service
            .add_blocked_range(date(2025, 8, 14), date(2025, 8, 1), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_single_day_range_allowed() {
        let service = service();
        let day = date(2025, 9, 1);
        service.add_blocked_range(day, day, None).await.unwrap();

        let snapshot = service.snapshot().await.unwrap();
        assert!(snapshot.is_date_blocked(day));
        assert!(!snapshot.is_date_blocked(date(2025, 9, 2)));
    }

    /// Memory store that yields between a read and the following write,
    /// like a network round trip would
    struct SlowStore(MemoryDocumentStore);

    #[async_trait]
    impl DocumentStore for SlowStore {
        async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
            self.0.list(collection).await
        }

        async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
            self.0.get(collection, id).await
        }

        async fn create(&self, collection: &str, record: Value) -> AppResult<String> {
            self.0.create(collection, record).await
        }

        async fn update(&self, collection: &str, id: &str, patch: Value) -> AppResult<()> {
            self.0.update(collection, id, patch).await
        }

        async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
            self.0.delete(collection, id).await
        }

        async fn get_singleton(&self, key: &str) -> AppResult<Option<Value>> {
            let value = self.0.get_singleton(key).await;
            tokio::task::yield_now().await;
            value
        }

        async fn set_singleton(&self, key: &str, record: Value) -> AppResult<()> {
            tokio::task::yield_now().await;
            self.0.set_singleton(key, record).await
        }

        async fn ping(&self) -> AppResult<()> {
            self.0.ping().await
        }
    }

    #[tokio::test]
    async fn test_concurrent_blocked_edits_are_all_kept() {
        let service = SchedulesService::new(Repository::new(Arc::new(SlowStore(MemoryDocumentStore::new()))));

        let (first, second, christmas, new_year) = tokio::join!(
            service.add_blocked_range(date(2025, 8, 1), date(2025, 8, 14), Some("Summer".to_string())),
            service.add_blocked_range(date(2025, 10, 1), date(2025, 10, 3), Some("Convention".to_string())),
            service.add_blocked_date(date(2025, 12, 25)),
            service.add_blocked_date(date(2026, 1, 1)),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        christmas.unwrap();
        new_year.unwrap();

        let blocked = service.blocked().await.unwrap();
        let mut ids: Vec<String> = blocked.ranges.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        let mut expected = vec![first.id.clone(), second.id.clone()];
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(blocked.dates, vec![date(2025, 12, 25), date(2026, 1, 1)]);

        // Removals racing each other keep the other edits too
        let (a, b) = tokio::join!(
            service.remove_blocked_range(&first.id),
            service.remove_blocked_date(date(2025, 12, 25)),
        );
        a.unwrap();
        b.unwrap();

        let blocked = service.blocked().await.unwrap();
        assert_eq!(blocked.ranges.len(), 1);
        assert_eq!(blocked.ranges[0].id, second.id);
        assert_eq!(blocked.dates, vec![date(2026, 1, 1)]);
    }
}
