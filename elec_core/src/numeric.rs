//! Shared numeric helpers.
//!
//! Engines keep full `f64` precision internally; rounding happens only when a
//! value is prepared for display or export.

/// Tolerance used when comparing appliance ratings for equality.
pub const RATING_EPSILON: f64 = 1e-6;

/// Round to 2 decimal places for display (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fraction from a percentage (35.0 -> 0.35)
pub fn percent(value: f64) -> f64 {
    value / 100.0
}

/// Whole 5% steps for "each kW or major fraction" above a threshold.
///
/// Returns `ceil(value - threshold)` clamped at zero.
pub fn kw_increments_above(value_kw: f64, threshold_kw: f64) -> u32 {
    let steps = (value_kw - threshold_kw).ceil();
    if steps > 0.0 {
        steps as u32
    } else {
        0
    }
}

/// True if every value is within [`RATING_EPSILON`] of the first.
pub fn all_equal(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| (v - first).abs() < RATING_EPSILON),
        None => false,
    }
}
