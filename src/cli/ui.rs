use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Gain,
    Loss,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).yellow().bold(),
        StyleType::Label => style(text).dim(),
        StyleType::Gain => style(text).green().bold(),
        StyleType::Loss => style(text).red().bold(),
    };
    styled.to_string()
}

/// Style for a signed amount: losses red, everything else green.
pub fn style_for_amount(amount: f64) -> StyleType {
    if amount < 0.0 {
        StyleType::Loss
    } else {
        StyleType::Gain
    }
}

/// Formats a percentage, rendering NaN and infinities as "N/A".
pub fn format_pct(pct: f64) -> String {
    if pct.is_finite() {
        format!("{pct:+.2}%")
    } else {
        "N/A".to_string()
    }
}

/// Formats a signed amount with its percentage, e.g. `+12.50 (+3.10%)`.
pub fn format_gain(amount: f64, pct: f64) -> String {
    format!("{amount:+.2} ({})", format_pct(pct))
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

/// Right-aligned cell for a plain number.
pub fn number_cell(value: f64) -> Cell {
    right_cell(format!("{value:.2}"))
}

/// Right-aligned cell for preformatted text.
pub fn right_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Creates a cell for a gain or loss with its percentage, colored by sign.
pub fn gain_cell(amount: f64, pct: f64) -> Cell {
    let color = if amount < 0.0 { Color::Red } else { Color::Green };
    Cell::new(format_gain(amount, pct))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown while remote data is fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
