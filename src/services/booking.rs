//! Client booking flow: calendar, slot picker and submission

use chrono::{Datelike, Months, NaiveDate};

use super::{
    appointments::{self, now, AppointmentsService},
    schedules::SchedulesService,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        appointment::{ContactDetails, CreateAppointment},
        booking::{CalendarDay, DaySlots},
        parse_date, Appointment, Category, DayOfWeek,
    },
};

#[derive(Clone)]
pub struct BookingService {
    schedules: SchedulesService,
    appointments: AppointmentsService,
}

impl BookingService {
    pub fn new(schedules: SchedulesService, appointments: AppointmentsService) -> Self {
        Self {
            schedules,
            appointments,
        }
    }

    /// Every day of `month` (YYYY-MM) with whether it can be picked
    pub async fn calendar(&self, month: &str) -> AppResult<Vec<CalendarDay>> {
        let first = parse_month(month)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| AppError::Validation("month out of range".to_string()))?;

        let snapshot = self.schedules.snapshot().await?;
        let now = now();

        let days = first
            .iter_days()
            .take_while(|day| *day < next)
            .map(|date| {
                let weekday = DayOfWeek::from(date.weekday());
                let open = date >= now.date()
                    && !snapshot.is_date_blocked(date)
                    && snapshot.working_hours.day(weekday).enabled;
                let slots = if open {
                    snapshot.upcoming_slots(date, now)
                } else {
                    Vec::new()
                };
                CalendarDay {
                    date,
                    weekday,
                    // Today closes once its last hour has started
                    open: open && (date > now.date() || !slots.is_empty()),
                    available_slots: slots.iter().filter(|slot| slot.available).count(),
                }
            })
            .collect();

        Ok(days)
    }

    /// Slots for one day; past days and hours that already started offer nothing
    pub async fn slots(&self, date: &str) -> AppResult<DaySlots> {
        let date = parse_date("date", date)?;
        let now = now();
        if date < now.date() {
            return Ok(DaySlots {
                date,
                slots: Vec::new(),
            });
        }

        let snapshot = self.schedules.snapshot().await?;
        Ok(DaySlots {
            date,
            slots: snapshot.upcoming_slots(date, now),
        })
    }

    /// First form step, checked before a date is picked
    pub fn validate_contact(&self, details: &ContactDetails) -> AppResult<Category> {
        appointments::validate_contact(details)
    }

    pub async fn submit(&self, data: &CreateAppointment) -> AppResult<Appointment> {
        self.appointments.create(data).await
    }
}

fn parse_month(month: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid month (use YYYY-MM)".to_string()))
}
