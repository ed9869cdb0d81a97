//! Supplier-rate shading and delta annotations for the comparison table.

use std::fmt;

use super::schema::{FlatRow, ESTIMATED_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Maps `value` onto a two-segment linear ramp: green at `min`, yellow at the
/// midpoint, red at `max`. Blue is always 0.
///
/// The lower half raises red with green pinned at 255; the upper half drops
/// green with red pinned at 255. A degenerate range is plain yellow.
pub fn heat_color(value: f64, min: f64, max: f64) -> Rgb {
    if max == min {
        return Rgb::YELLOW;
    }

    let ratio = (value - min) / (max - min);
    let (r, g) = if ratio <= 0.5 {
        (channel(255.0 * (ratio / 0.5)), 255)
    } else {
        (255, channel(255.0 * ((1.0 - ratio) / 0.5)))
    };

    Rgb { r, g, b: 0 }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

/// Lowest and highest numeric rate among `supplier_columns` for one row.
///
/// `None` when none of the columns holds a number.
pub fn rate_min_max(row: &FlatRow, supplier_columns: &[String]) -> Option<RateRange> {
    supplier_columns
        .iter()
        .filter_map(|column| row.number(column))
        .fold(None, |range, rate| match range {
            None => Some(RateRange {
                min: rate,
                max: rate,
            }),
            Some(RateRange { min, max }) => Some(RateRange {
                min: min.min(rate),
                max: max.max(rate),
            }),
        })
}

/// Background for one cell: only numeric supplier cells are shaded.
pub fn cell_heat(row: &FlatRow, column: &str, supplier_columns: &[String]) -> Option<Rgb> {
    if !supplier_columns.iter().any(|c| c == column) {
        return None;
    }
    let value = row.number(column)?;
    let range = rate_min_max(row, supplier_columns)?;
    Some(heat_color(value, range.min, range.max))
}

/// Percentage difference of a supplier rate against the row's estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateDelta {
    pub percent: f64,
}

impl RateDelta {
    pub fn arrow(&self) -> &'static str {
        if self.percent > 0.0 {
            "↑"
        } else if self.percent < 0.0 {
            "↓"
        } else {
            ""
        }
    }
}

impl fmt::Display for RateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}%", self.arrow(), self.percent.abs())
    }
}

/// Delta for a numeric supplier cell; `None` without a usable (non-zero) estimate.
pub fn rate_delta(row: &FlatRow, column: &str, supplier_columns: &[String]) -> Option<RateDelta> {
    if !supplier_columns.iter().any(|c| c == column) {
        return None;
    }
    let value = row.number(column)?;
    let estimated = row.number(ESTIMATED_RATE).filter(|e| *e != 0.0)?;
    Some(RateDelta {
        percent: (value - estimated) / estimated * 100.0,
    })
}
