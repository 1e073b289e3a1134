use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

pub use crate::core::distribution::OTHER_FUND;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Renders an amount with the currency symbol and without trailing zeros.
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{}", amount.normalize())
}

/// Like [`format_money`], with "N/A" for a missing amount.
pub fn format_optional_money(symbol: &str, amount: Option<Decimal>) -> String {
    amount.map_or("N/A".to_string(), |a| format_money(symbol, a))
}

/// Display label for a fund name.
pub fn fund_label(name: &str) -> &str {
    if name == OTHER_FUND { "Other" } else { name }
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

/// Right-aligned money cell. `None` is displayed as a dimmed "N/A".
pub fn money_cell(symbol: &str, amount: Option<Decimal>) -> Cell {
    match amount {
        Some(a) => Cell::new(format_money(symbol, a)).set_alignment(CellAlignment::Right),
        None => Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Bold green money cell for totals, red "N/A" when the total is unknown.
pub fn total_cell(symbol: &str, amount: Option<Decimal>) -> Cell {
    let color = if amount.is_some() {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(format_optional_money(symbol, amount))
        .add_attribute(Attribute::Bold)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
