//! Data models for Ink Studio

pub mod appointment;
pub mod auth;
pub mod booking;
pub mod content;
pub mod gallery;
pub mod schedule;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentStatus, Category, TimeSlot};
pub use content::SiteContent;
pub use gallery::GalleryItem;
pub use schedule::{BlockedDateRange, BlockedDates, DayHours, DayOfWeek, WorkingHours};

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse an ISO calendar date (YYYY-MM-DD)
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}

/// Parse a time of day (HH:MM)
pub fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}

/// Serde adapter storing `NaiveTime` as "HH:MM"
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", "2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(matches!(parse_date("date", "09/03/2025"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("date", "2025-02-30"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("time", "09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert!(matches!(parse_time("time", "9am"), Err(AppError::Validation(_))));
        assert!(matches!(parse_time("time", "25:00"), Err(AppError::Validation(_))));
    }
}
