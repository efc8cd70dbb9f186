//! Canonical text form of numbers.

/// Integral values print without a fraction (`3`, not `3.0`); non-finite
/// values print as `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_owned();
    }
    format!("{value}")
}
