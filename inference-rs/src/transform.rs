//! Inverse target transform and price display.

use crate::error::PredictionError;

/// Invert the training-time `log1p` target transform.
///
/// The result is clamped to be non-negative. Non-finite scores, and scores
/// large enough to overflow, are reported instead of returned as a price.
pub fn to_price(log_value: f64) -> Result<f64, PredictionError> {
    if !log_value.is_finite() {
        return Err(PredictionError::NumericAnomaly(log_value));
    }

    let price = log_value.exp_m1();
    if !price.is_finite() {
        return Err(PredictionError::NumericAnomaly(log_value));
    }

    Ok(price.max(0.0))
}

/// Render a price as dollars with thousands separators, e.g. `$22,812.50`.
///
/// Formats from the full `f64` value, so very large estimates keep every
/// digit. Negative input keeps its sign after the currency symbol.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${sign}{grouped}.{fraction}")
}
