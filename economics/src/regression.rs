//! Least-squares difficulty trend fitting
//!
//! The difficulty history logs give noisy `(time, difficulty)` samples;
//! a plain line fit both smooths random variation and, when the
//! difficulty is clearly trending, extrapolates it to the present.

use serde::Serialize;

/// A `(timestamp, difficulty)` observation, unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultySample {
    pub timestamp: f64,
    pub difficulty: f64,
}

/// Result of an ordinary least-squares line fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a line to `(x, y)` pairs. No weighting, no outlier rejection.
///
/// Returns `None` for empty input. Repeated x values would divide by
/// zero in the slope term; that case degrades to a flat line through
/// the mean of y, so a single pair yields `(y, 0)`.
pub fn fit_linear(pairs: &[(f64, f64)]) -> Option<LinearFit> {
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let sx: f64 = pairs.iter().map(|p| p.0).sum();
    let sy: f64 = pairs.iter().map(|p| p.1).sum();
    let sx2: f64 = pairs.iter().map(|p| p.0 * p.0).sum();
    let sxy: f64 = pairs.iter().map(|p| p.0 * p.1).sum();

    let slope = if n * sx2 != sx * sx {
        (n * sxy - sx * sy) / (n * sx2 - sx * sx)
    } else {
        0.0
    };
    let intercept = (sy - slope * sx) / n;

    Some(LinearFit { intercept, slope })
}

/// Extrapolate a smoothed difficulty estimate to `now`.
///
/// Fewer than two samples carry no trend; callers drop the mean
/// difficulty row in that case.
pub fn estimate_difficulty(samples: &[DifficultySample], now: f64) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let pairs: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (s.timestamp, s.difficulty))
        .collect();
    fit_linear(&pairs).map(|fit| fit.at(now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_noiseless_line() {
        let fit = fit_linear(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert_eq!(fit.intercept, 0.0);
        assert_eq!(fit.slope, 1.0);
    }

    #[test]
    fn constant_y_fits_flat_line() {
        let fit = fit_linear(&[(0.0, 7.5), (10.0, 7.5), (20.0, 7.5)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 7.5);
    }

    #[test]
    fn identical_x_degrades_to_mean() {
        let fit = fit_linear(&[(3.0, 1.0), (3.0, 2.0), (3.0, 6.0)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 3.0);
    }

    #[test]
    fn single_pair_returns_y() {
        let fit = fit_linear(&[(42.0, 9.0)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 9.0);
    }

    #[test]
    fn empty_input_has_no_fit() {
        assert!(fit_linear(&[]).is_none());
    }

    #[test]
    fn estimate_needs_two_samples() {
        let one = [DifficultySample {
            timestamp: 100.0,
            difficulty: 5.0,
        }];
        assert!(estimate_difficulty(&one, 200.0).is_none());
    }

    #[test]
    fn estimate_extrapolates_trend() {
        let samples = [
            DifficultySample {
                timestamp: 0.0,
                difficulty: 100.0,
            },
            DifficultySample {
                timestamp: 100.0,
                difficulty: 200.0,
            },
        ];
        let est = estimate_difficulty(&samples, 200.0).unwrap();
        assert!((est - 300.0).abs() < 1e-9);
    }
}
