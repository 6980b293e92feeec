#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for ward flood risk.
//!
//! Serves the ward list, ward detail, and map views computed by
//! [`flood_risk_engine`] over CSV datasets loaded once at startup.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use flood_risk_dataset::{DatasetContext, DatasetPaths};
use flood_risk_engine::Engine;
use flood_risk_ward::WardDirectory;

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 5000;

/// Shared application state.
///
/// Built once before the server starts and only read afterwards.
pub struct AppState {
    /// The three source tables.
    pub dataset: Arc<DatasetContext>,
    /// Ward names and localities.
    pub directory: Arc<WardDirectory>,
}

impl AppState {
    #[must_use]
    pub fn new(dataset: DatasetContext, directory: WardDirectory) -> Self {
        Self {
            dataset: Arc::new(dataset),
            directory: Arc::new(directory),
        }
    }

    #[must_use]
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.dataset, &self.directory)
    }
}

/// Registers the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/wards", web::get().to(handlers::wards))
        .route("/ward/{ward_id}", web::get().to(handlers::ward_detail))
        .route("/map-data", web::get().to(handlers::map_data));
}

/// Starts the flood risk API server.
///
/// Loads the datasets named by the `FLOOD_RISK_*` environment variables and
/// serves them on `BIND_ADDR:PORT`. A dataset file that cannot be read is
/// served as an empty table. The caller is responsible for initializing
/// logging and providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let paths = DatasetPaths::from_env();
    let state = web::Data::new(AppState::new(
        DatasetContext::load(&paths),
        WardDirectory::builtin(),
    ));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
