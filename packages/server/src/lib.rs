#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the EV charging demand dashboard.
//!
//! Serves the REST API behind each dashboard page (dataset table, chart
//! data, prediction form) and the static frontend. The dataset and the
//! demand model are loaded once at startup and shared read-only across all
//! requests for the lifetime of the process.

mod handlers;
pub mod interactive;
pub mod views;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use ev_demand_dataset::{DEFAULT_DATASET_PATH, DatasetError, DatasetStore};
use ev_demand_model::{DEFAULT_MODEL_PATH, DemandModel, ModelError};
use thiserror::Error;

/// Shared application state.
pub struct AppState {
    /// City statistics, immutable after load.
    pub dataset: Arc<DatasetStore>,
    /// Pre-trained demand model.
    pub model: Arc<dyn DemandModel>,
}

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The model artifact could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Runtime configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Dataset CSV (`EV_DEMAND_DATASET`).
    pub dataset_path: PathBuf,
    /// Model artifact (`EV_DEMAND_MODEL`).
    pub model_path: PathBuf,
}

impl ServerConfig {
    /// Builds the configuration from the environment, falling back to
    /// defaults for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            dataset_path: std::env::var("EV_DEMAND_DATASET")
                .map_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH), PathBuf::from),
            model_path: std::env::var("EV_DEMAND_MODEL")
                .map_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH), PathBuf::from),
        }
    }
}

/// Loads the dataset and model named by `config`.
///
/// # Errors
///
/// Returns [`StartupError`] if either artifact is unavailable.
pub fn load_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    log::info!("Loading dataset from {}...", config.dataset_path.display());
    let dataset = DatasetStore::load(&config.dataset_path)?;

    log::info!("Loading model from {}...", config.model_path.display());
    let model = ev_demand_model::load_model(&config.model_path)?;

    Ok(AppState {
        dataset: Arc::new(dataset),
        model: Arc::from(model),
    })
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/views", web::get().to(handlers::views))
            .route("/cities", web::get().to(handlers::cities))
            .route("/insights", web::get().to(handlers::insights))
            .route("/predict/sliders", web::get().to(handlers::sliders))
            .route("/predict", web::post().to(handlers::predict)),
    );
}

/// Starts the EV demand API server with configuration from the
/// environment.
///
/// This is a regular async function. The caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// See [`run_server_with`].
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    run_server_with(ServerConfig::from_env()).await
}

/// Loads the dataset and model, then starts the Actix-Web HTTP server.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset or model cannot be
/// loaded, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server_with(config: ServerConfig) -> std::io::Result<()> {
    let state = load_state(&config).map_err(|e| {
        log::error!("Startup failed: {e}");
        std::io::Error::other(e)
    })?;
    let state = web::Data::new(state);

    log::info!(
        "Starting server on {}:{} ({} cities)",
        config.bind_addr,
        config.port,
        state.dataset.len()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use ev_demand_station_models::DemandTier;

    use super::*;

    fn bundled_config() -> ServerConfig {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        ServerConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            dataset_path: data.join("ev_data.csv"),
            model_path: data.join("model.json"),
        }
    }

    #[test]
    fn bundled_dataset_and_model_load_together() {
        let state = load_state(&bundled_config()).unwrap();
        assert!(!state.dataset.is_empty());

        let result = ev_demand_predict::estimate_demand(state.model.as_ref(), 3000.0, 150.0)
            .unwrap();
        assert_eq!(result.estimated_station_count, 9);
        assert_eq!(result.demand_tier, DemandTier::High);
    }

    #[test]
    fn missing_model_stops_startup() {
        let config = ServerConfig {
            model_path: "does/not/exist.json".into(),
            ..bundled_config()
        };
        let err = load_state(&config).err().unwrap();
        assert!(matches!(err, StartupError::Model(ModelError::ModelUnavailable { .. })));
    }

    #[test]
    fn missing_dataset_stops_startup() {
        let config = ServerConfig {
            dataset_path: "does/not/exist.csv".into(),
            ..bundled_config()
        };
        let err = load_state(&config).err().unwrap();
        assert!(matches!(err, StartupError::Dataset(_)));
    }

    #[test]
    fn frontend_page_uses_the_api() {
        let index = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../app/dist/index.html");
        let html = std::fs::read_to_string(index).unwrap();
        for route in ["/api/views", "/api/cities", "/api/insights", "/api/predict"] {
            assert!(html.contains(route), "index.html never calls {route}");
        }
    }
}
