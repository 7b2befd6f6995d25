//! Schedule models (working hours, blocked dates and ranges)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// WorkingHours
// ---------------------------------------------------------------------------

/// Day of week keys used by the working hours table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DayOfWeek::Sunday => "sunday",
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        };
        write!(f, "{}", label)
    }
}

/// Opening window for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayHours {
    pub enabled: bool,
    /// Opening time (HH:MM)
    #[serde(with = "crate::models::hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub start: NaiveTime,
    /// Closing time (HH:MM), exclusive
    #[serde(with = "crate::models::hhmm")]
    #[schema(value_type = String, example = "20:00")]
    pub end: NaiveTime,
}

impl DayHours {
    pub fn open(start_hour: u32, end_hour: u32) -> Self {
        Self {
            enabled: true,
            start: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    pub fn closed() -> Self {
        Self {
            enabled: false,
            ..Self::open(10, 14)
        }
    }
}

impl Default for DayHours {
    /// A weekday without configuration is closed
    fn default() -> Self {
        Self::closed()
    }
}

/// Weekly working hours table, replaced as a whole by the admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkingHours {
    #[serde(default)]
    pub sunday: DayHours,
    #[serde(default)]
    pub monday: DayHours,
    #[serde(default)]
    pub tuesday: DayHours,
    #[serde(default)]
    pub wednesday: DayHours,
    #[serde(default)]
    pub thursday: DayHours,
    #[serde(default)]
    pub friday: DayHours,
    #[serde(default)]
    pub saturday: DayHours,
}

impl WorkingHours {
    pub fn day(&self, day: DayOfWeek) -> &DayHours {
        match day {
            DayOfWeek::Sunday => &self.sunday,
            DayOfWeek::Monday => &self.monday,
            DayOfWeek::Tuesday => &self.tuesday,
            DayOfWeek::Wednesday => &self.wednesday,
            DayOfWeek::Thursday => &self.thursday,
            DayOfWeek::Friday => &self.friday,
            DayOfWeek::Saturday => &self.saturday,
        }
    }

    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut DayHours {
        match day {
            DayOfWeek::Sunday => &mut self.sunday,
            DayOfWeek::Monday => &mut self.monday,
            DayOfWeek::Tuesday => &mut self.tuesday,
            DayOfWeek::Wednesday => &mut self.wednesday,
            DayOfWeek::Thursday => &mut self.thursday,
            DayOfWeek::Friday => &mut self.friday,
            DayOfWeek::Saturday => &mut self.saturday,
        }
    }

    /// Every weekday closed
    pub fn closed() -> Self {
        Self {
            sunday: DayHours::closed(),
            monday: DayHours::closed(),
            tuesday: DayHours::closed(),
            wednesday: DayHours::closed(),
            thursday: DayHours::closed(),
            friday: DayHours::closed(),
            saturday: DayHours::closed(),
        }
    }

    /// Enabled days must open before they close
    pub fn validate(&self) -> AppResult<()> {
        for day in DayOfWeek::ALL {
            let hours = self.day(day);
            if hours.enabled && hours.start >= hours.end {
                return Err(AppError::Validation(format!(
                    "{}: start must be before end",
                    day
                )));
            }
        }
        Ok(())
    }
}

impl Default for WorkingHours {
    /// Studio opening hours used until the admin saves a table
    fn default() -> Self {
        Self {
            sunday: DayHours::open(10, 20),
            monday: DayHours::open(10, 20),
            tuesday: DayHours::open(10, 20),
            wednesday: DayHours::open(10, 20),
            thursday: DayHours::open(10, 20),
            friday: DayHours::open(10, 14),
            saturday: DayHours::closed(),
        }
    }
}

// ---------------------------------------------------------------------------
// Blocked dates
// ---------------------------------------------------------------------------

/// An inclusive span of days without bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlockedDateRange {
    pub id: String,
    /// First blocked day
    pub start_date: NaiveDate,
    /// Last blocked day (inclusive)
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl BlockedDateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Blocked single days and ranges, stored as one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlockedDates {
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub ranges: Vec<BlockedDateRange>,
}

/// Block a single date request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlockedDate {
    /// Date to block (YYYY-MM-DD)
    pub date: String,
}

/// Block a date range request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlockedDateRange {
    /// First blocked day (YYYY-MM-DD)
    pub start_date: String,
    /// Last blocked day, inclusive (YYYY-MM-DD)
    pub end_date: String,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weekday_is_closed() {
        let hours: WorkingHours = serde_json::from_str(
            r#"{"monday": {"enabled": true, "start": "09:00", "end": "17:00"}}"#,
        )
        .unwrap();

        assert!(hours.monday.enabled);
        assert_eq!(hours.monday.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert!(!hours.sunday.enabled);
        assert!(!hours.saturday.enabled);
    }

    #[test]
    fn test_working_hours_serialize_as_hhmm() {
        let value = serde_json::to_value(WorkingHours::default()).unwrap();
        assert_eq!(value["friday"]["start"], "10:00");
        assert_eq!(value["friday"]["end"], "14:00");
        assert_eq!(value["saturday"]["enabled"], false);
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut hours = WorkingHours::default();
        assert!(hours.validate().is_ok());

        *hours.day_mut(DayOfWeek::Tuesday) = DayHours::open(15, 11);
        assert!(matches!(hours.validate(), Err(AppError::Validation(_))));

        // Disabled days are not checked
        hours.tuesday.enabled = false;
        assert!(hours.validate().is_ok());
    }

    #[test]
    fn test_range_contains_bounds() {
        let range = BlockedDateRange {
            id: "r1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            reason: "Convention".to_string(),
            created_at: Utc::now(),
        };

        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 8, 12).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()));
    }
}
