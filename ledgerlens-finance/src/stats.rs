//! Quartiles and IQR outlier bounds.
//!
//! Quantiles use linear interpolation between closest ranks (Hyndman & Fan
//! type 7, the usual data-frame default): for sorted `x` of length `n`,
//! `h = (n - 1) * p`, `q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
//! The method is symmetric, so negating every input mirrors the bounds.

use serde::Serialize;

/// Multiplier applied to the IQR to get the fences.
pub const IQR_FENCE: f64 = 1.5;

/// `p`-quantile of an ascending slice. `None` for empty input.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn from_amounts(amounts: &[f64]) -> Option<Self> {
        let mut sorted = amounts.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_FENCE * iqr,
            upper: q3 + IQR_FENCE * iqr,
        })
    }

    /// Strictly outside the fences.
    pub fn is_outlier(&self, x: f64) -> bool {
        x < self.lower || x > self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&xs, 0.25), Some(1.75));
        assert_eq!(quantile(&xs, 0.5), Some(2.5));
        assert_eq!(quantile(&xs, 0.75), Some(3.25));
        assert_eq!(quantile(&xs, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_edges() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn test_bounds_flag_large_value() {
        let b = IqrBounds::from_amounts(&[10.0, 12.0, 11.0, 13.0, 1000.0]).unwrap();
        assert_eq!(b.q1, 11.0);
        assert_eq!(b.q3, 13.0);
        assert_eq!((b.lower, b.upper), (8.0, 16.0));
        assert!(b.is_outlier(1000.0));
        for x in [10.0, 11.0, 12.0, 13.0] {
            assert!(!b.is_outlier(x));
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let b = IqrBounds::from_amounts(&[0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(!b.is_outlier(0.0));
        assert!(b.is_outlier(0.01));
    }

    #[test]
    fn test_sign_flip_mirrors_bounds() {
        let xs = [-54.2, 2500.0, -12.0, -3.5, -800.0, 40.0, -19.99];
        let neg: Vec<f64> = xs.iter().map(|x| -x).collect();
        let a = IqrBounds::from_amounts(&xs).unwrap();
        let b = IqrBounds::from_amounts(&neg).unwrap();
        assert!((a.q1 + b.q3).abs() < 1e-9);
        assert!((a.q3 + b.q1).abs() < 1e-9);
        assert!((a.lower + b.upper).abs() < 1e-9);
        assert!((a.upper + b.lower).abs() < 1e-9);
    }

    #[test]
    fn test_order_independent() {
        let a = IqrBounds::from_amounts(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        let b = IqrBounds::from_amounts(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(a, b);
    }
}
