//! Formatting helpers for table cells.

use super::schema::CellValue;

/// Tree rate column: currency with two decimals.
pub fn format_rate(value: f64) -> String {
    format!("${value:.2}")
}

/// Tree quantity column: blank for zero.
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn format_cell(value: Option<&CellValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
