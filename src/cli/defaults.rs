use super::ui;
use crate::core::config::AppConfig;
use crate::core::money;
use anyhow::Result;
use comfy_table::Cell;
use std::io::Write;

/// Prints the percentages a fresh or reset calculator starts with.
pub fn run(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let table = config.default_table()?;
    let (cost, sale) = table.breakdowns();

    let mut display = ui::new_styled_table();
    display.set_header(vec![
        ui::header_cell("Item"),
        ui::header_cell("Op"),
        ui::header_cell("Default"),
        ui::header_cell("Source"),
    ]);

    for item in cost.rows().into_iter().chain(sale.rows()) {
        if !item.editable {
            continue;
        }
        let source = if config.overrides.contains_key(&item.name) {
            ui::style_text("config", ui::StyleType::TotalLabel)
        } else {
            ui::style_text("built-in", ui::StyleType::Subtle)
        };
        display.add_row(vec![
            ui::name_cell(item),
            ui::operation_cell(item),
            Cell::new(money::format_percentage(item.percentage))
                .set_alignment(comfy_table::CellAlignment::Right),
            Cell::new(source),
        ]);
    }

    writeln!(
        out,
        "\n{}",
        ui::style_text("Default Percentages", ui::StyleType::Title)
    )?;
    writeln!(out, "{display}")?;
    Ok(())
}
