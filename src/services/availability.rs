//! Availability calculation
//!
//! Pure derivation of bookable hourly slots from a snapshot of the working
//! hours, the blocked dates/ranges and the existing appointments. Nothing in
//! here performs I/O; callers load a fresh [`ScheduleSnapshot`] for every
//! request.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::{Appointment, BlockedDates, DayOfWeek, TimeSlot, WorkingHours};

/// Everything needed to answer availability questions
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    pub working_hours: WorkingHours,
    pub blocked: BlockedDates,
    pub appointments: Vec<Appointment>,
}

impl ScheduleSnapshot {
    pub fn new(working_hours: WorkingHours, blocked: BlockedDates, appointments: Vec<Appointment>) -> Self {
        Self {
            working_hours,
            blocked,
            appointments,
        }
    }

    /// True if the day is a blocked date or falls inside any blocked range
    pub fn is_date_blocked(&self, date: NaiveDate) -> bool {
        self.blocked.dates.contains(&date) || self.blocked.ranges.iter().any(|r| r.contains(date))
    }

    /// Hourly slots for a day, in ascending order
    ///
    /// Empty when the day is blocked or its weekday is closed. Slots cover
    /// every whole hour `h` with `start <= h:00 < end`.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        if self.is_date_blocked(date) {
            return Vec::new();
        }

        let hours = self.working_hours.day(DayOfWeek::from(date.weekday()));
        if !hours.enabled {
            return Vec::new();
        }

        slot_starts(hours.start, hours.end)
            .map(|time| TimeSlot {
                time,
                available: !self.appointments.iter().any(|a| a.occupies(date, time)),
            })
            .collect()
    }

    /// Whether `time` is an offered, unbooked slot on `date`
    pub fn is_slot_available(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.available_slots(date)
            .iter()
            .any(|slot| slot.time == time && slot.available)
    }

    /// Number of free slots on a day
    pub fn free_slot_count(&self, date: NaiveDate) -> usize {
        self.available_slots(date)
            .iter()
            .filter(|slot| slot.available)
            .count()
    }

    /// Slots of `date` that start after `now`
    ///
    /// Past days offer nothing; on the current day hours that already began
    /// are dropped.
    pub fn upcoming_slots(&self, date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        if date < now.date() {
            return Vec::new();
        }

        let mut slots = self.available_slots(date);
        slots.retain(|slot| date.and_time(slot.time) > now);
        slots
    }

    /// Whether `time` on `date` is free and still ahead of `now`
    pub fn is_slot_bookable(&self, date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
        date.and_time(time) > now && self.is_slot_available(date, time)
    }
}

/// Whole hours in `[start, end)`
fn slot_starts(start: NaiveTime, end: NaiveTime) -> impl Iterator<Item = NaiveTime> {
    let first = if start.minute() == 0 && start.second() == 0 {
        start.hour()
    } else {
        start.hour() + 1
    };
    (first..24)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .take_while(move |time| *time < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{AppointmentStatus, BlockedDateRange, Category, DayHours};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hour(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn appointment(day: NaiveDate, h: u32, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: format!("{}-{}", day, h),
            full_name: "Noa".to_string(),
            phone: "050-0000000".to_string(),
            email: "noa@example.com".to_string(),
            category: Category::Tattoo,
            description: None,
            date: day,
            time: hour(h),
            status,
            created_at: Utc::now(),
        }
    }

    /// Mondays 10:00-14:00, everything else closed
    fn monday_only() -> WorkingHours {
        let mut hours = WorkingHours::closed();
        hours.monday = DayHours::open(10, 14);
        hours
    }

    // 2025-06-02 is a Monday
    const MONDAY: (i32, u32, u32) = (2025, 6, 2);

    fn monday() -> NaiveDate {
        date(MONDAY.0, MONDAY.1, MONDAY.2)
    }

    #[test]
    fn test_open_day_yields_hourly_slots_excluding_end() {
        let snapshot = ScheduleSnapshot::new(monday_only(), BlockedDates::default(), vec![]);

        let slots = snapshot.available_slots(monday());
        let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();

        assert_eq!(times, vec![hour(10), hour(11), hour(12), hour(13)]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_disabled_weekday_has_no_slots() {
        let snapshot = ScheduleSnapshot::new(monday_only(), BlockedDates::default(), vec![]);

        // Every day of the following week except Monday
        for offset in 1..7 {
            let day = monday() + chrono::Duration::days(offset);
            assert!(snapshot.available_slots(day).is_empty(), "{} should be closed", day);
        }
    }

    #[test]
    fn test_blocked_single_date_has_no_slots() {
        let blocked = BlockedDates {
            dates: vec![monday()],
            ranges: vec![],
        };
        let snapshot = ScheduleSnapshot::new(WorkingHours::default(), blocked, vec![]);

        assert!(snapshot.is_date_blocked(monday()));
        assert!(snapshot.available_slots(monday()).is_empty());
        assert!(!snapshot.is_slot_available(monday(), hour(10)));
    }

    #[test]
    fn test_blocked_range_is_inclusive() {
        let blocked = BlockedDates {
            dates: vec![],
            ranges: vec![BlockedDateRange {
                id: "vacation".to_string(),
                start_date: date(2025, 6, 2),
                end_date: date(2025, 6, 4),
                reason: "Vacation".to_string(),
                created_at: Utc::now(),
            }],
        };
        let snapshot = ScheduleSnapshot::new(WorkingHours::default(), blocked, vec![]);

        assert!(!snapshot.available_slots(date(2025, 6, 1)).is_empty());
        for d in 2..=4 {
            assert!(snapshot.available_slots(date(2025, 6, d)).is_empty());
        }
        assert!(!snapshot.available_slots(date(2025, 6, 5)).is_empty());
    }

    #[test]
    fn test_overlapping_ranges_union() {
        let range = |id: &str, start: NaiveDate, end: NaiveDate| BlockedDateRange {
            id: id.to_string(),
            start_date: start,
            end_date: end,
            reason: String::new(),
            created_at: Utc::now(),
        };
        let blocked = BlockedDates {
            dates: vec![],
            ranges: vec![
                range("a", date(2025, 7, 1), date(2025, 7, 10)),
                range("b", date(2025, 7, 5), date(2025, 7, 15)),
            ],
        };
        let snapshot = ScheduleSnapshot::new(WorkingHours::default(), blocked, vec![]);

        assert!(snapshot.is_date_blocked(date(2025, 7, 1)));
        assert!(snapshot.is_date_blocked(date(2025, 7, 7)));
        assert!(snapshot.is_date_blocked(date(2025, 7, 15)));
        assert!(!snapshot.is_date_blocked(date(2025, 7, 16)));
    }

    #[test]
    fn test_booked_slot_is_unavailable_until_completed() {
        let booked = ScheduleSnapshot::new(
            monday_only(),
            BlockedDates::default(),
            vec![appointment(monday(), 11, AppointmentStatus::Confirmed)],
        );
        let slots = booked.available_slots(monday());
        assert_eq!(slots.len(), 4);
        assert!(slots[0].available);
        assert_eq!(slots[1].time, hour(11));
        assert!(!slots[1].available);
        assert!(!booked.is_slot_available(monday(), hour(11)));
        assert_eq!(booked.free_slot_count(monday()), 3);

        let completed = ScheduleSnapshot::new(
            monday_only(),
            BlockedDates::default(),
            vec![appointment(monday(), 11, AppointmentStatus::Completed)],
        );
        assert!(completed.available_slots(monday()).iter().all(|s| s.available));
        assert!(completed.is_slot_available(monday(), hour(11)));
    }

    #[test]
    fn test_pending_booking_on_other_day_does_not_interfere() {
        let next_monday = monday() + chrono::Duration::days(7);
        let snapshot = ScheduleSnapshot::new(
            monday_only(),
            BlockedDates::default(),
            vec![appointment(next_monday, 10, AppointmentStatus::Pending)],
        );

        assert!(snapshot.is_slot_available(monday(), hour(10)));
        assert!(!snapshot.is_slot_available(next_monday, hour(10)));
    }

    #[test]
    fn test_slot_outside_hours_is_unavailable() {
        let snapshot = ScheduleSnapshot::new(monday_only(), BlockedDates::default(), vec![]);

        assert!(!snapshot.is_slot_available(monday(), hour(9)));
        assert!(!snapshot.is_slot_available(monday(), hour(14)));
        assert!(!snapshot.is_slot_available(monday(), NaiveTime::from_hms_opt(10, 30, 0).unwrap()));
    }

    #[test]
    fn test_partial_hour_bounds() {
        let mut hours = WorkingHours::closed();
        hours.monday = DayHours {
            enabled: true,
            start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
        };
        let snapshot = ScheduleSnapshot::new(hours, BlockedDates::default(), vec![]);

        let times: Vec<NaiveTime> = snapshot.available_slots(monday()).iter().map(|s| s.time).collect();
        assert_eq!(times, vec![hour(10), hour(11), hour(12)]);
    }

    #[test]
    fn test_slots_until_midnight() {
        let mut hours = WorkingHours::closed();
        hours.monday = DayHours {
            enabled: true,
            start: hour(21),
            end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        };
        let snapshot = ScheduleSnapshot::new(hours, BlockedDates::default(), vec![]);

        let times: Vec<NaiveTime> = snapshot.available_slots(monday()).iter().map(|s| s.time).collect();
        assert_eq!(times, vec![hour(21), hour(22), hour(23)]);
    }

    fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        day.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_upcoming_slots_drop_started_hours() {
        let snapshot = ScheduleSnapshot::new(monday_only(), BlockedDates::default(), vec![]);

        let times: Vec<NaiveTime> = snapshot
            .upcoming_slots(monday(), at(monday(), 11, 30))
            .iter()
            .map(|s| s.time)
            .collect();
        assert_eq!(times, vec![hour(12), hour(13)]);

        // A slot starting exactly now has begun
        let times: Vec<NaiveTime> = snapshot
            .upcoming_slots(monday(), at(monday(), 12, 0))
            .iter()
            .map(|s| s.time)
            .collect();
        assert_eq!(times, vec![hour(13)]);

        assert!(snapshot.upcoming_slots(monday(), at(monday(), 13, 1)).is_empty());
        assert_eq!(snapshot.upcoming_slots(monday(), at(monday(), 8, 0)).len(), 4);
    }

    #[test]
    fn test_upcoming_slots_for_other_days() {
        let snapshot = ScheduleSnapshot::new(monday_only(), BlockedDates::default(), vec![]);
        let sunday_evening = at(monday() - chrono::Duration::days(1), 23, 0);
        let tuesday_morning = at(monday() + chrono::Duration::days(1), 9, 0);

        assert_eq!(snapshot.upcoming_slots(monday(), sunday_evening).len(), 4);
        assert!(snapshot.upcoming_slots(monday(), tuesday_morning).is_empty());
    }

    #[test]
    fn test_is_slot_bookable() {
        let snapshot = ScheduleSnapshot::new(
            monday_only(),
            BlockedDates::default(),
            vec![appointment(monday(), 13, AppointmentStatus::Pending)],
        );
        let now = at(monday(), 10, 15);

        assert!(!snapshot.is_slot_bookable(monday(), hour(10), now));
        assert!(snapshot.is_slot_bookable(monday(), hour(11), now));
        assert!(!snapshot.is_slot_bookable(monday(), hour(13), now));
        assert!(snapshot.is_slot_bookable(monday(), hour(10), at(monday(), 9, 59)));
    }
}
