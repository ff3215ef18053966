//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port, and artifact paths before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Each prompt defaults to the value [`ServerConfig::from_env`] would use,
/// then delegates to [`super::run_server_with`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("EV Demand Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let dataset_path = prompt_path("Dataset CSV", &defaults.dataset_path);
    let model_path = prompt_path("Model artifact", &defaults.model_path);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server_with(ServerConfig {
        bind_addr,
        port,
        dataset_path,
        model_path,
    })
    .await
}

fn prompt_path(prompt: &str, default: &std::path::Path) -> PathBuf {
    let default = default.display().to_string();
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.clone())
        .interact_text()
        .unwrap_or(default);
    PathBuf::from(value)
}
