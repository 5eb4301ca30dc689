#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

mod appointment;
mod config;
mod database;
mod error;
mod models;
mod protocol;
mod schema;
mod utils;

use std::{sync::Arc, time::Duration};

use actix_files::Files;
use actix_web::{middleware, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::Config,
    database::{AppointmentStore, DieselStore},
};

/// Shared by every worker; the store synchronizes internally.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AppointmentStore>,
    pub request_timeout: Duration,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appointment_server=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = database::build_pool(&config.database_url, config.pool_size, config.request_timeout)?;
    database::run_migrations(&pool)?;
    tracing::info!(database = %config.database_url, "database ready");

    let state = AppState {
        store: Arc::new(DieselStore::new(pool, config.default_state.clone())),
        request_timeout: config.request_timeout,
    };
    let static_dir = config.static_dir.clone();

    tracing::info!(bind = %config.bind_addr, "server running");
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .data(state.clone())
            .app_data(appointment::json_config())
            .configure(appointment::config)
            // auxiliary assets
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
