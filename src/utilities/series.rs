// Numeric Series
// Symmetric extension, averaging and bracketed rendering of sample vectors

use crate::errors::{ToolsError, ToolsResult};

/// Magnitudes below this render as `0`, so tiny negatives never print as `-0`
const PRINT_AS_ZERO: f64 = 1e-10;

/// Significant digits used when no precision is given
const DEFAULT_PRECISION: usize = 6;

/// Mirror the series outwards: `before` elements in front, `after` at the end
///
/// When the series is shorter than the requested extension it is mirrored
/// repeatedly, each pass reflecting the already extended series.
/// `[1, 2]` extended by `(3, 3)` becomes `[2, 2, 1, 1, 2, 2, 1, 1]`.
pub fn symm_ext<T: Clone>(values: &mut Vec<T>, before: usize, after: usize) -> ToolsResult<()> {
    if values.is_empty() {
        return Err(ToolsError::EmptySeries);
    }

    let mut remaining = before;
    while remaining > 0 {
        let take = remaining.min(values.len());
        let head: Vec<T> = values[..take].iter().rev().cloned().collect();
        values.splice(0..0, head);
        remaining -= take;
    }

    let mut remaining = after;
    while remaining > 0 {
        let take = remaining.min(values.len());
        let tail: Vec<T> = values[values.len() - take..].iter().rev().cloned().collect();
        values.extend(tail);
        remaining -= take;
    }

    Ok(())
}

/// Arithmetic mean, `None` for an empty series
pub fn average<T: Copy + Into<f64>>(values: &[T]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    Some(sum / values.len() as f64)
}

/// How `format_series` renders each element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesFormat {
    /// Written after `[` and after every element
    pub separator: char,
    /// Significant digits, trailing zeros dropped
    pub precision: Option<usize>,
    /// Exact digits after the decimal point; wins over `precision`
    pub fixed: Option<usize>,
}

impl Default for SeriesFormat {
    fn default() -> Self {
        Self {
            separator: ' ',
            precision: None,
            fixed: None,
        }
    }
}

impl SeriesFormat {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_fixed(mut self, digits: usize) -> Self {
        self.fixed = Some(digits);
        self
    }

    fn render(&self, value: f64) -> String {
        match self.fixed {
            Some(digits) => format!("{:.*}", digits, value),
            None => general(value, self.precision.unwrap_or(DEFAULT_PRECISION)),
        }
    }
}

/// Render as `[<sep>v0<sep>v1<sep>...]`, e.g. `"[ 1.1 2.2 ]"`
pub fn format_series<T: Copy + Into<f64>>(values: &[T], format: &SeriesFormat) -> String {
    let mut out = String::from("[");
    out.push(format.separator);

    for &value in values {
        let mut value: f64 = value.into();
        if value.abs() < PRINT_AS_ZERO {
            value = 0.0;
        }
        out.push_str(&format.render(value));
        out.push(format.separator);
    }

    out.push(']');
    out
}

/// `%g`-style rendering with `precision` significant digits
fn general(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
