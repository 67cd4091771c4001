pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    /// Price one product from the configured defaults
    Compute {
        purchase_price: f64,
        edits: Vec<(String, f64)>,
        json: bool,
    },
    /// Solve a JSON pricing request, from a file or stdin
    Solve { input: Option<PathBuf> },
    /// Show the default percentage table
    Defaults,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command_to(command, config_path, &mut out)
}

/// Runs a command, writing its report to `out`.
pub fn run_command_to(
    command: AppCommand,
    config_path: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    info!("Markup starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Compute {
            purchase_price,
            edits,
            json,
        } => cli::compute::run(&config, purchase_price, &edits, json, out),
        AppCommand::Solve { input } => cli::solve::run(&config, input.as_deref(), out),
        AppCommand::Defaults => cli::defaults::run(&config, out),
    }
}
