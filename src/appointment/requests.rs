use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::appointments::AppointmentFields,
    utils::{null_as_default, parse_date_str, parse_time_of_day_str},
};

const MIN_VEHICLE_YEAR: i32 = 1900;

/// Body of create and update requests.
///
/// Absent and `null` fields take their zero value, so an update that omits a
/// field overwrites it. `id` and `creation_date` are not accepted from clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_make: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_year: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub service_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_notes: String,
    pub appointment_state: Option<String>,
}

impl AppointmentRequest {
    /// Returns every rule the request breaks; empty when valid.
    pub fn validate(&self) -> Vec<String> {
        self.validate_for_year(Utc::now().year())
    }

    fn validate_for_year(&self, current_year: i32) -> Vec<String> {
        let mut errors = Vec::new();

        let required = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
            ("vehicle_make", &self.vehicle_make),
            ("vehicle_model", &self.vehicle_model),
            ("service_type", &self.service_type),
        ];
        for (name, value) in required.iter() {
            if value.trim().is_empty() {
                errors.push(format!("{} must not be empty", name));
            }
        }

        if !self.email.trim().is_empty() && !is_email(&self.email) {
            errors.push("email is not a valid address".to_string());
        }

        let max_year = current_year + 1;
        if self.vehicle_year < MIN_VEHICLE_YEAR || self.vehicle_year > max_year {
            errors.push(format!(
                "vehicle_year must be between {} and {}",
                MIN_VEHICLE_YEAR, max_year
            ));
        }

        if let Err(err) = parse_date_str(&self.preferred_date) {
            errors.push(format!("preferred_date is invalid: {}", err));
        }
        if let Err(err) = parse_time_of_day_str(&self.preferred_time) {
            errors.push(format!("preferred_time is invalid: {}", err));
        }

        errors
    }

    pub fn into_fields(self) -> Result<AppointmentFields, ApiError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(self.into())
    }
}

impl From<AppointmentRequest> for AppointmentFields {
    fn from(info: AppointmentRequest) -> Self {
        Self {
            full_name: info.full_name,
            email: info.email,
            phone_number: info.phone_number,
            vehicle_make: info.vehicle_make,
            vehicle_model: info.vehicle_model,
            vehicle_year: info.vehicle_year,
            service_type: info.service_type,
            preferred_date: info.preferred_date,
            preferred_time: info.preferred_time,
            additional_notes: info.additional_notes,
            appointment_state: info.appointment_state,
        }
    }
}

fn is_email(s: &str) -> bool {
    use regex::Regex;
    use std::sync::LazyLock;

    static EMAIL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
    EMAIL.is_match(s)
}
