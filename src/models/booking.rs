//! Booking flow DTOs (calendar, day slots)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{DayOfWeek, TimeSlot};

/// One day of the booking calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    /// Selectable in the calendar (not past, not blocked, weekday enabled)
    pub open: bool,
    /// Number of free slots left on that day
    pub available_slots: usize,
}

/// Slots offered on a given day
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Month to display (YYYY-MM)
    pub month: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    /// Day to inspect (YYYY-MM-DD)
    pub date: String,
}
