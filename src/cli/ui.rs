use crate::core::item::{LineItem, Operation};
use crate::core::money;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Name cell; subtotals are bold.
pub fn name_cell(item: &LineItem) -> Cell {
    let cell = Cell::new(&item.name);
    if item.operation == Operation::Equals {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

pub fn operation_cell(item: &LineItem) -> Cell {
    let color = match item.operation {
        Operation::Add => Color::Green,
        Operation::Subtract => Color::Red,
        Operation::Equals => Color::DarkGrey,
    };
    Cell::new(item.operation.to_string())
        .fg(color)
        .set_alignment(CellAlignment::Center)
}

/// Percentage of a rate row. Subtotals carry no rate and show a blank cell.
pub fn percentage_cell(item: &LineItem) -> Cell {
    if item.operation == Operation::Equals || !item.editable {
        return Cell::new("");
    }
    Cell::new(money::format_percentage(item.percentage)).set_alignment(CellAlignment::Right)
}

pub fn amount_cell(item: &LineItem, currency: &str) -> Cell {
    let cell = Cell::new(money::format_money(item.amount, currency))
        .set_alignment(CellAlignment::Right);
    if item.operation == Operation::Equals {
        cell.add_attribute(Attribute::Bold).fg(Color::Green)
    } else {
        cell
    }
}
