//! Appointment lifecycle service

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use tokio::sync::Mutex;
use validator::Validate;

use super::{
    email::{Notification, Notifier},
    schedules::SchedulesService,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        appointment::{AppointmentQuery, ContactDetails, CreateAppointment, NewAppointment},
        parse_date, parse_time, Appointment, AppointmentStatus, Category,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AppointmentsService {
    repository: Repository,
    schedules: SchedulesService,
    notifier: Arc<dyn Notifier>,
    notify_to: String,
    /// Serializes the availability check and the insert of concurrent bookings
    booking_lock: Arc<Mutex<()>>,
}

impl AppointmentsService {
    pub fn new(
        repository: Repository,
        schedules: SchedulesService,
        notifier: Arc<dyn Notifier>,
        notify_to: String,
    ) -> Self {
        Self {
            repository,
            schedules,
            notifier,
            notify_to,
            booking_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Book a slot. The appointment always starts as pending.
    pub async fn create(&self, data: &CreateAppointment) -> AppResult<Appointment> {
        let category = validate_contact(&data.contact())?;
        let date = parse_date("date", &data.date)?;
        let time = parse_slot_time(&data.time)?;

        if date.and_time(time) <= now() {
            return Err(AppError::SlotUnavailable(format!(
                "{} at {} has already passed, please pick another time",
                date,
                time.format("%H:%M")
            )));
        }

        let appointment = {
            let _guard = self.booking_lock.lock().await;

            let snapshot = self.schedules.snapshot().await?;
            if !snapshot.is_slot_bookable(date, time, now()) {
                tracing::warn!("Rejected booking for {} {}: slot unavailable", date, time.format("%H:%M"));
                return Err(AppError::SlotUnavailable(format!(
                    "{} at {} is not available, please pick another time",
                    date,
                    time.format("%H:%M")
                )));
            }

            self.repository
                .appointments_create(&NewAppointment {
                    full_name: data.full_name.trim().to_string(),
                    phone: data.phone.trim().to_string(),
                    email: data.email.trim().to_string(),
                    category,
                    description: data
                        .description
                        .as_deref()
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string),
                    date,
                    time,
                    status: AppointmentStatus::Pending,
                    created_at: Utc::now(),
                })
                .await?
        };

        tracing::info!(
            "Appointment {} booked for {} {}",
            appointment.id,
            appointment.date,
            appointment.time.format("%H:%M")
        );
        self.notify_new_booking(&appointment);

        Ok(appointment)
    }

    /// Fire-and-forget notification to the studio; failures are only logged
    fn notify_new_booking(&self, appointment: &Appointment) {
        let notification = Notification {
            to: self.notify_to.clone(),
            subject: "New booking request".to_string(),
            body: format!(
                "New booking from {} for {} at {}.\n\nService: {}\nPhone: {}\nEmail: {}",
                appointment.full_name,
                appointment.date,
                appointment.time.format("%H:%M"),
                appointment.category,
                appointment.phone,
                appointment.email,
            ),
        };

        let notifier = Arc::clone(&self.notifier);
        let appointment_id = appointment.id.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(notification).await {
                tracing::warn!("Failed to notify about appointment {}: {}", appointment_id, e);
            }
        });
    }

    pub async fn get(&self, id: &str) -> AppResult<Appointment> {
        self.repository
            .appointments_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))
    }

    /// Advance the status; only pending -> confirmed -> completed is allowed
    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> AppResult<Appointment> {
        let mut appointment = self.get(id).await?;

        if !appointment.status.can_transition_to(status) {
            return Err(AppError::InvalidTransition(format!(
                "Appointment {} cannot go from {} to {}",
                id, appointment.status, status
            )));
        }

        self.repository.appointments_set_status(id, status).await?;
        tracing::info!("Appointment {} is now {}", id, status);

        appointment.status = status;
        Ok(appointment)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.get(id).await?;
        self.repository.appointments_delete(id).await?;
        tracing::info!("Appointment {} deleted", id);
        Ok(())
    }

    /// All appointments, unordered
    pub async fn list(&self) -> AppResult<Vec<Appointment>> {
        self.repository.appointments_list().await
    }

    /// Filtered appointments sorted by date then time
    pub async fn search(&self, query: &AppointmentQuery) -> AppResult<Vec<Appointment>> {
        let from = query.from.as_deref().map(|d| parse_date("from", d)).transpose()?;
        let to = query.to.as_deref().map(|d| parse_date("to", d)).transpose()?;

        let mut appointments: Vec<Appointment> = self
            .list()
            .await?
            .into_iter()
            .filter(|a| query.status.map_or(true, |s| a.status == s))
            .filter(|a| from.map_or(true, |f| a.date >= f))
            .filter(|a| to.map_or(true, |t| a.date <= t))
            .collect();

        appointments.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(appointments)
    }
}

/// Check the contact step of a booking and resolve its category
pub fn validate_contact(details: &ContactDetails) -> AppResult<Category> {
    details.validate()?;

    for (field, value) in [
        ("full_name", &details.full_name),
        ("phone", &details.phone),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{}: is required", field)));
        }
    }

    details
        .category
        .parse::<Category>()
        .map_err(|e| AppError::Validation(format!("category: {}", e)))
}

/// Slots start on the hour
fn parse_slot_time(value: &str) -> AppResult<NaiveTime> {
    let time = parse_time("time", value)?;
    if time.minute() != 0 {
        return Err(AppError::Validation(
            "time must be on the hour (HH:00)".to_string(),
        ));
    }
    Ok(time)
}

/// Today in the studio's local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current wall-clock time in the studio's local calendar
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
