use crate::schema::appointments;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Columns read for every `Appointment`, in struct field order.
///
/// Selecting through this tuple keeps the row mapping tied to column names
/// rather than to the physical column order of the table.
pub type AppointmentColumns = (
    appointments::id,
    appointments::full_name,
    appointments::email,
    appointments::phone_number,
    appointments::vehicle_make,
    appointments::vehicle_model,
    appointments::vehicle_year,
    appointments::service_type,
    appointments::preferred_date,
    appointments::preferred_time,
    appointments::additional_notes,
    appointments::creation_date,
    appointments::appointment_state,
);

pub const APPOINTMENT_COLUMNS: AppointmentColumns = (
    appointments::id,
    appointments::full_name,
    appointments::email,
    appointments::phone_number,
    appointments::vehicle_make,
    appointments::vehicle_model,
    appointments::vehicle_year,
    appointments::service_type,
    appointments::preferred_date,
    appointments::preferred_time,
    appointments::additional_notes,
    appointments::creation_date,
    appointments::appointment_state,
);

#[derive(Debug, Clone, PartialEq, Queryable, Serialize)]
pub struct Appointment {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: String,
    #[serde(serialize_with = "crate::utils::serialize_time")]
    pub creation_date: NaiveDateTime,
    pub appointment_state: String,
}

/// Client-owned fields of an appointment, as handed to the store.
///
/// `appointment_state` stays optional here: the store decides what an absent
/// state means (configured default on create, empty on update).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentFields {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: String,
    pub appointment_state: Option<String>,
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: String,
    pub creation_date: NaiveDateTime,
    pub appointment_state: String,
}

impl NewAppointment {
    pub fn new(fields: AppointmentFields, creation_date: NaiveDateTime, default_state: &str) -> Self {
        Self {
            full_name: fields.full_name,
            email: fields.email,
            phone_number: fields.phone_number,
            vehicle_make: fields.vehicle_make,
            vehicle_model: fields.vehicle_model,
            vehicle_year: fields.vehicle_year,
            service_type: fields.service_type,
            preferred_date: fields.preferred_date,
            preferred_time: fields.preferred_time,
            additional_notes: fields.additional_notes,
            creation_date,
            appointment_state: fields
                .appointment_state
                .unwrap_or_else(|| default_state.to_string()),
        }
    }
}

/// Full replacement of every mutable column; `id` and `creation_date` are
/// never written after insert.
#[derive(AsChangeset)]
#[table_name = "appointments"]
pub struct ReplaceAppointment {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: String,
    pub appointment_state: String,
}

impl From<AppointmentFields> for ReplaceAppointment {
    fn from(fields: AppointmentFields) -> Self {
        Self {
            full_name: fields.full_name,
            email: fields.email,
            phone_number: fields.phone_number,
            vehicle_make: fields.vehicle_make,
            vehicle_model: fields.vehicle_model,
            vehicle_year: fields.vehicle_year,
            service_type: fields.service_type,
            preferred_date: fields.preferred_date,
            preferred_time: fields.preferred_time,
            additional_notes: fields.additional_notes,
            appointment_state: fields.appointment_state.unwrap_or_default(),
        }
    }
}

pub const APPOINT_STATE_PENDING: &str = "Pending";
