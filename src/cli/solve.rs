use crate::core::config::AppConfig;
use crate::core::contract::PricingRequest;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Reads a pricing request as JSON and writes the computed response.
pub fn run(config: &AppConfig, input: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pricing request: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read pricing request from stdin")?;
            buf
        }
    };

    let response = solve_str(config, &raw)?;
    out.write_all(response.as_bytes())?;
    writeln!(out)?;
    Ok(())
}

/// Solves a JSON request and returns the JSON response.
pub fn solve_str(config: &AppConfig, raw: &str) -> Result<String> {
    let request: PricingRequest =
        serde_json::from_str(raw).context("Failed to parse pricing request")?;
    debug!(
        purchase_price = request.purchase_price,
        cost_items = request.cost_items.len(),
        sale_items = request.sale_items.len(),
        "Parsed pricing request"
    );

    let response = request
        .solve(&config.solver()?)
        .context("Failed to solve pricing request")?;
    info!(
        sale_price = response.convergence.sale_price,
        iterations = response.convergence.iterations,
        "Pricing request solved"
    );

    serde_json::to_string_pretty(&response).context("Failed to serialize pricing response")
}
