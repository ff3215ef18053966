#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the EV charging demand predictor.
//!
//! Each dashboard page has a subcommand (`cities`, `insights`, `predict`,
//! `serve`). Run without a subcommand to pick one from an interactive
//! menu, like the web dashboard's sidebar.

mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ev_demand_dataset::DatasetStore;
use ev_demand_server::ServerConfig;
use ev_demand_station_models::PredictionInput;

#[derive(Parser)]
#[command(name = "ev_demand", about = "EV charging station demand predictor")]
struct Cli {
    /// Dataset CSV (overrides `EV_DEMAND_DATASET`)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Model artifact (overrides `EV_DEMAND_MODEL`)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate how many charging stations an area needs
    Predict {
        /// Population per sq. km (100-5000, steps of 100)
        #[arg(long)]
        population_density: f64,
        /// EVs per sq. km (10-300, steps of 10)
        #[arg(long)]
        ev_density: f64,
    },
    /// Print the dataset table
    Cities {
        /// Order by station count, most first
        #[arg(long)]
        top: bool,
        /// Only include cities in this state
        #[arg(long)]
        state: Option<String>,
        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the correlation matrix and top cities
    Insights,
    /// Start the HTTP dashboard server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(path) = cli.dataset {
        config.dataset_path = path;
    }
    if let Some(path) = cli.model {
        config.model_path = path;
    }

    match cli.command {
        None => interactive::run(config).await?,
        Some(Commands::Predict {
            population_density,
            ev_density,
        }) => {
            let input = PredictionInput {
                population_density,
                ev_vehicle_density: ev_density,
            };
            predict(&config, input)?;
        }
        Some(Commands::Cities { top, state, limit }) => {
            cities(&config, top, state.as_deref(), limit)?;
        }
        Some(Commands::Insights) => insights(&config)?,
        Some(Commands::Serve) => serve(config).await?,
    }

    Ok(())
}

/// Validates `input` against the slider bounds, then prints the estimate.
fn predict(
    config: &ServerConfig,
    input: PredictionInput,
) -> Result<(), Box<dyn std::error::Error>> {
    input.validate()?;
    log::debug!("Using model artifact {}", config.model_path.display());
    let model = ev_demand_model::load_model(&config.model_path)?;
    let result = ev_demand_predict::estimate_demand(
        model.as_ref(),
        input.population_density,
        input.ev_vehicle_density,
    )?;
    println!("{}", report::prediction(&result));
    Ok(())
}

fn cities(
    config: &ServerConfig,
    top: bool,
    state: Option<&str>,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = DatasetStore::load(&config.dataset_path)?;

    let rows = dataset.query(state, top, limit);

    println!("{}", report::cities_table(&rows, dataset.len()));
    Ok(())
}

fn insights(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = DatasetStore::load(&config.dataset_path)?;

    println!("Correlation");
    println!("{}", report::correlation(&dataset.correlation_matrix()));
    println!();
    println!("Top 10 Cities with Most EV Stations");
    println!("{}", report::ranking(&dataset.top_by_station_count(10)));
    Ok(())
}

async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(ev_demand_server::run_server_with(config))
    })
    .await??;
    Ok(())
}
