mod requests;
mod responses;
mod utils;


use crate::{
    error::ApiError, models::appointments::Appointment, protocol::MessageResponse, AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse};

use self::{
    requests::AppointmentRequest,
    responses::UpdateResponse,
    utils::{call_store, parse_id},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_appointments)
        .service(get_appointment)
        .service(create_appointment)
        .service(update_appointment)
        .service(delete_appointment);
}

/// Rejects undecodable bodies with the API's own error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let err = ApiError::InvalidJson(err.to_string());
        err.log(req.path());
        err.into()
    })
}

crate::api_funcs! {
    (get, list_appointments, "/appointments", Ok),
    (get, get_appointment, "/appointments/{id}", Ok, path: web::Path<String>),
    (post, create_appointment, "/appointments", Created, info: web::Json<AppointmentRequest>),
    (put, update_appointment, "/appointments/{id}", Ok, path: web::Path<String>, info: web::Json<AppointmentRequest>),
    (delete, delete_appointment, "/appointments/{id}", Ok, path: web::Path<String>),
}

async fn list_appointments_impl(state: web::Data<AppState>) -> Result<Vec<Appointment>, ApiError> {
    call_store(
        &state,
        "Failed to retrieve appointments from the database",
        |store| store.list(),
    )
    .await
}

async fn get_appointment_impl(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<Appointment, ApiError> {
    let id = parse_id(&path)?;

    call_store(
        &state,
        "Failed to retrieve appointment from the database",
        move |store| store.get(id),
    )
    .await?
    .ok_or(ApiError::NotFound)
}

async fn create_appointment_impl(
    state: web::Data<AppState>,
    info: web::Json<AppointmentRequest>,
) -> Result<Appointment, ApiError> {
    let fields = info.into_inner().into_fields()?;

    let created = call_store(
        &state,
        "Failed to insert data into the database",
        move |store| store.create(fields),
    )
    .await?;

    tracing::info!(id = created.id, "appointment created");
    Ok(created)
}

async fn update_appointment_impl(
    state: web::Data<AppState>,
    path: web::Path<String>,
    info: web::Json<AppointmentRequest>,
) -> Result<UpdateResponse, ApiError> {
    let id = parse_id(&path)?;
    let fields = info.into_inner().into_fields()?;
    let submitted = fields.clone();

    let updated = call_store(
        &state,
        "Failed to update appointment in the database",
        move |store| store.update(id, fields),
    )
    .await?;

    match updated {
        Some(appointment) => {
            tracing::info!(id, "appointment updated");
            Ok(UpdateResponse::Stored(appointment))
        }
        None => {
            tracing::debug!(id, "update matched no appointment");
            Ok(UpdateResponse::echo(id, submitted))
        }
    }
}

async fn delete_appointment_impl(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<MessageResponse, ApiError> {
    let id = parse_id(&path)?;

    let removed = call_store(
        &state,
        "Failed to delete appointment from the database",
        move |store| store.delete(id),
    )
    .await?;

    tracing::info!(id, removed, "appointment delete processed");
    Ok(MessageResponse::new("Appointment deleted successfully"))
}
