//! Scale and rounding utilities for the scoring pipeline.
//!
//! One rounding rule everywhere: `f64::round` (half away from zero), then
//! clamp. Float-to-int casts saturate in Rust, so adversarial inputs
//! (debt-to-equity of 10000, negative P/E) cannot escape the clamp.

/// Round, then clamp into the inclusive scoring range [0, 100].
pub fn clamp_score(value: f64) -> i64 {
    clamp_round(value, 0, 100)
}

/// Round, then clamp into an arbitrary closed integer range.
pub fn clamp_round(value: f64, lo: i64, hi: i64) -> i64 {
    (value.round() as i64).clamp(lo, hi)
}

/// Mean of a slice; 0.0 for empty input.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-15.0), 0);
        assert_eq!(clamp_score(0.4), 0);
        assert_eq!(clamp_score(50.5), 51);
        assert_eq!(clamp_score(100.0), 100);
        assert_eq!(clamp_score(7_000_000.0), 100);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_clamp_round_range() {
        assert_eq!(clamp_round(-35.0, -20, 20), -20);
        assert_eq!(clamp_round(12.4, -20, 20), 12);
        assert_eq!(clamp_round(19.6, -20, 20), 20);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[0.1, 0.3]) - 0.2).abs() < 1e-12);
    }
}
