use super::ui;
use crate::core::calculator::Calculator;
use crate::core::config::AppConfig;
use crate::core::contract::PricingResponse;
use crate::core::item::LineItem;
use crate::core::money;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, warn};

/// Parses a `NAME=PERCENTAGE` edit given on the command line.
pub fn parse_edit(s: &str) -> Result<(String, f64), String> {
    let (name, pct) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENTAGE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing row name in '{s}'"));
    }
    let pct = pct
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| format!("invalid percentage in '{s}': {e}"))?;
    Ok((name.to_string(), pct))
}

/// Prices one product from the configured defaults plus the given edits.
pub fn run(
    config: &AppConfig,
    purchase_price: f64,
    edits: &[(String, f64)],
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut calculator = Calculator::new(config.default_table()?, config.solver()?)
        .context("Failed to open calculator")?;

    calculator
        .set_purchase_price(purchase_price)
        .with_context(|| format!("Failed to price purchase price {purchase_price}"))?;
    for (name, pct) in edits {
        debug!(%name, pct, "Applying percentage edit");
        calculator
            .set_percentage(name, *pct)
            .with_context(|| format!("Failed to set '{name}' to {pct}%"))?;
    }

    let convergence = calculator.convergence();
    debug!(
        iterations = convergence.iterations,
        converged = convergence.converged,
        sale_price = convergence.sale_price,
        "Sale price solved"
    );
    if !convergence.converged {
        warn!(
            iterations = convergence.iterations,
            "Sale price did not settle within the iteration cap"
        );
    }

    if json {
        let response = PricingResponse::from(calculator.composition().clone());
        serde_json::to_writer_pretty(&mut *out, &response)
            .context("Failed to serialize pricing result")?;
        writeln!(out)?;
        return Ok(());
    }

    display_results(&calculator, &config.currency, out)
}

fn display_results(calculator: &Calculator, currency: &str, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        ui::style_text("Cost Breakdown", ui::StyleType::Title)
    )?;
    writeln!(out, "{}", breakdown_table(&calculator.cost().rows(), currency))?;

    writeln!(
        out,
        "\n{}",
        ui::style_text("Sale Breakdown", ui::StyleType::Title)
    )?;
    writeln!(out, "{}", breakdown_table(&calculator.sale().rows(), currency))?;

    let convergence = calculator.convergence();
    let sale_price = &calculator.sale().sale_price;
    writeln!(
        out,
        "\n{} {}",
        ui::style_text(&format!("{}:", sale_price.name), ui::StyleType::TotalLabel),
        ui::style_text(
            &money::format_money(sale_price.amount, currency),
            ui::StyleType::TotalValue
        )
    )?;

    let note = format!("solved in {} iteration(s)", convergence.iterations);
    let note = if convergence.converged {
        ui::style_text(&note, ui::StyleType::Subtle)
    } else {
        ui::style_text(&format!("{note}, not converged"), ui::StyleType::Error)
    };
    writeln!(out, "{note}")?;
    Ok(())
}

fn breakdown_table(rows: &[&LineItem], currency: &str) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Item"),
        ui::header_cell("Op"),
        ui::header_cell("Rate"),
        ui::header_cell("Amount"),
    ]);
    for item in rows {
        table.add_row(vec![
            ui::name_cell(item),
            ui::operation_cell(item),
            ui::percentage_cell(item),
            ui::amount_cell(item, currency),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_percentage() {
        assert_eq!(parse_edit("ICMS=18"), Ok(("ICMS".to_string(), 18.0)));
        assert_eq!(
            parse_edit("Margem de Lucro = 22.5%"),
            Ok(("Margem de Lucro".to_string(), 22.5))
        );
        assert!(parse_edit("ICMS").is_err());
        assert!(parse_edit("=5").is_err());
        assert!(parse_edit("ICMS=abc").is_err());
    }

    #[test]
    fn prints_both_breakdowns() {
        let config = AppConfig::default();
        let mut out = Vec::new();
        run(&config, 100.0, &[("IPI".to_string(), 5.0)], false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Cost Breakdown"));
        assert!(text.contains("Sale Breakdown"));
        assert!(text.contains("IPI"));
        assert!(text.contains("Preço de Venda"));
        assert!(text.contains("BRL 105.00"));
        assert!(text.contains("iteration"));
    }

    #[test]
    fn json_output_follows_the_contract() {
        let config = AppConfig::default();
        let mut out = Vec::new();
        run(&config, 100.0, &[], true, &mut out).unwrap();

        let response: PricingResponse = serde_json::from_slice(&out).unwrap();
        assert_eq!(response.purchase_price, 100.0);
        let real_cost = response.cost_items.last().unwrap().amount;
        assert_eq!(real_cost, 100.0);
        let sale_price = response.sale_items.last().unwrap().amount;
        assert!((sale_price - 100.0 / (1.0 - 0.5127)).abs() < 1e-9);
    }

    #[test]
    fn invalid_edit_is_reported_with_context() {
        let config = AppConfig::default();
        let mut out = Vec::new();
        let err = run(
            &config,
            100.0,
            &[("Margem de Lucro".to_string(), 70.0)],
            false,
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Margem de Lucro"));
        assert!(format!("{err:#}").contains("Invalid composition"));
        assert!(out.is_empty());
    }
}
