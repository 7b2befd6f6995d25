//! Appointment models (bookings, status lifecycle, slots)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Service requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Tattoo,
    Painting,
    #[serde(alias = "merch")]
    MerchConsult,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Tattoo => "Tattoo",
            Category::Painting => "Commissioned painting",
            Category::MerchConsult => "Merchandise consultation",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tattoo" => Ok(Category::Tattoo),
            "painting" => Ok(Category::Painting),
            "merch-consult" | "merch" => Ok(Category::MerchConsult),
            other => Err(format!(
                "Unknown category '{}' (expected tattoo, painting or merch-consult)",
                other
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// AppointmentStatus
// ---------------------------------------------------------------------------

/// Appointment lifecycle: pending -> confirmed -> completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
}

impl AppointmentStatus {
    /// The single legal successor of this status, if any
    pub fn next(self) -> Option<AppointmentStatus> {
        match self {
            AppointmentStatus::Pending => Some(AppointmentStatus::Confirmed),
            AppointmentStatus::Confirmed => Some(AppointmentStatus::Completed),
            AppointmentStatus::Completed => None,
        }
    }

    pub fn can_transition_to(self, target: AppointmentStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Whether an appointment in this status still holds its slot
    pub fn occupies_slot(self) -> bool {
        self != AppointmentStatus::Completed
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

/// Appointment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub category: Category,
    pub description: Option<String>,
    /// Appointment day
    pub date: NaiveDate,
    /// Start of the hourly slot (HH:00)
    #[serde(with = "crate::models::hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// True when this appointment holds the given slot
    pub fn occupies(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.date == date && self.time == time && self.status.occupies_slot()
    }
}

/// Stored form of an appointment (the store owns the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub category: Category,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "crate::models::hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl NewAppointment {
    pub fn with_id(self, id: String) -> Appointment {
        Appointment {
            id,
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            category: self.category,
            description: self.description,
            date: self.date,
            time: self.time,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Contact step of the booking form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactDetails {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// tattoo, painting or merch-consult
    pub category: String,
    pub description: Option<String>,
}

/// Booking submission (contact details plus chosen slot)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAppointment {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// tattoo, painting or merch-consult
    pub category: String,
    pub description: Option<String>,
    /// Appointment day (YYYY-MM-DD)
    pub date: String,
    /// Slot start (HH:00)
    pub time: String,
}

impl CreateAppointment {
    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentStatus {
    pub status: AppointmentStatus,
}

/// Query parameters for the admin appointment list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AppointmentQuery {
    /// Filter by status
    pub status: Option<AppointmentStatus>,
    /// Appointments on or after this date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Appointments on or before this date (YYYY-MM-DD)
    pub to: Option<String>,
}

// ---------------------------------------------------------------------------
// TimeSlot
// ---------------------------------------------------------------------------

/// One hourly booking opportunity on a given date (derived, never stored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeSlot {
    /// Slot start (HH:00)
    #[serde(with = "crate::models::hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use AppointmentStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Confirmed));
        assert!(Completed.is_terminal());
    }

    #[test]
    fn test_completed_frees_slot() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(!AppointmentStatus::Completed.occupies_slot());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("tattoo".parse::<Category>(), Ok(Category::Tattoo));
        assert_eq!("merch-consult".parse::<Category>(), Ok(Category::MerchConsult));
        assert_eq!("merch".parse::<Category>(), Ok(Category::MerchConsult));
        assert!("piercing".parse::<Category>().is_err());

        let json = serde_json::to_value(Category::MerchConsult).unwrap();
        assert_eq!(json, "merch-consult");
    }

    #[test]
    fn test_appointment_json_shape() {
        let appointment = NewAppointment {
            full_name: "Dana Levi".to_string(),
            phone: "054-1234567".to_string(),
            email: "dana@example.com".to_string(),
            category: Category::Tattoo,
            description: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
        .with_id("a1".to_string());

        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["date"], "2025-06-01");
        assert_eq!(value["time"], "14:00");
        assert_eq!(value["status"], "pending");
    }
}
