use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::appointments::{Appointment, AppointmentFields};

/// Result of a full replace.
///
/// When no row carries the requested id the update still succeeds, and the
/// submitted fields are echoed back under that id. The echo has the same keys
/// as a stored appointment, with `creation_date` set to `null` since no row
/// exists to supply one.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdateResponse {
    Stored(Appointment),
    Echo {
        id: i32,
        #[serde(flatten)]
        fields: AppointmentFields,
        #[serde(serialize_with = "crate::utils::serialize_time_opt")]
        creation_date: Option<NaiveDateTime>,
    },
}

impl UpdateResponse {
    pub fn echo(id: i32, mut fields: AppointmentFields) -> Self {
        fields.appointment_state.get_or_insert_with(String::new);
        UpdateResponse::Echo {
            id,
            fields,
            creation_date: None,
        }
    }
}
