//! Appointments domain methods on Repository

use serde_json::json;

use super::{Repository, APPOINTMENTS};
use crate::{
    error::AppResult,
    models::{appointment::NewAppointment, Appointment, AppointmentStatus},
};

impl Repository {
    /// List every appointment in storage order
    pub async fn appointments_list(&self) -> AppResult<Vec<Appointment>> {
        self.list_records(APPOINTMENTS).await
    }

    /// Get an appointment by ID
    pub async fn appointments_get(&self, id: &str) -> AppResult<Option<Appointment>> {
        self.get_record(APPOINTMENTS, id).await
    }

    /// Insert an appointment and return the stored record
    pub async fn appointments_create(&self, data: &NewAppointment) -> AppResult<Appointment> {
        let id = self.create_record(APPOINTMENTS, data).await?;
        Ok(data.clone().with_id(id))
    }

    /// Write a new status (the transition is checked by the caller)
    pub async fn appointments_set_status(&self, id: &str, status: AppointmentStatus) -> AppResult<()> {
        self.store()
            .update(APPOINTMENTS, id, json!({ "status": status }))
            .await
    }

    /// Delete an appointment
    pub async fn appointments_delete(&self, id: &str) -> AppResult<()> {
        self.store().delete(APPOINTMENTS, id).await
    }
}
