//! Stage 2 (§4.5): cross-source price deviation and oracle sanity.

use gk_numerics::EPS_CALC;

/// `|a - b| / max(a, b, eps)`.
pub fn xdev(a: f64, b: f64) -> f64 {
    let denom = a.abs().max(b.abs()).max(EPS_CALC);
    (a - b).abs() / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdev_zero_for_identical_prices() {
        assert_eq!(xdev(100.0, 100.0), 0.0);
    }

    #[test]
    fn xdev_matches_manual_fraction() {
        let d = xdev(100.0, 105.0);
        assert!((d - (5.0 / 105.0)).abs() < 1e-9);
    }

    #[test]
    fn xdev_is_protected_against_both_zero() {
        assert!(xdev(0.0, 0.0).is_finite());
    }
}
