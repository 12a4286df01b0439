//! Sample statistics for scheduling overhead measurements
//!
//! Mean and standard error of the mean over the populated overhead samples of
//! one mechanism, plus the `mean ± sem` rendering used in the final report.

use serde::Serialize;

use crate::core::error::StatsError;

/// Decimal places kept when reporting
pub const REPORT_DECIMALS: i32 = 3;

pub fn sum(xs: &[f64]) -> f64 {
    xs.iter().fold(0.0, |acc, v| acc + v)
}

/// Arithmetic mean; an empty sample has no mean
pub fn mean(xs: &[f64]) -> Result<f64, StatsError> {
    if xs.is_empty() {
        return Err(StatsError::Empty);
    }
    Ok(sum(xs) / xs.len() as f64)
}

/// Standard error of the mean around `xs_mean`
///
/// `sqrt(sum((v - xs_mean)^2) / (n * (n - 1)))`, undefined for fewer than two
/// samples.
pub fn sem(xs: &[f64], xs_mean: f64) -> Result<f64, StatsError> {
    let n = xs.len();
    if n <= 1 {
        return Err(StatsError::TooFewSamples { n });
    }
    let sq_diffs: Vec<f64> = xs
        .iter()
        .map(|v| {
            let diff = v - xs_mean;
            diff * diff
        })
        .collect();
    Ok((sum(&sq_diffs) / (n * (n - 1)) as f64).sqrt())
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    // -0.0 renders as "-0.000"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Render `"<mean> ± <sem>"`, both rounded to three places
///
/// The standard error is taken around the rounded mean.
pub fn format_mean_pm(xs: &[f64]) -> Result<String, StatsError> {
    let xs_mean = round_to(mean(xs)?, REPORT_DECIMALS);
    let xs_sem = round_to(sem(xs, xs_mean)?, REPORT_DECIMALS);
    Ok(format!(
        "{:.prec$} ± {:.prec$}",
        xs_mean,
        xs_sem,
        prec = REPORT_DECIMALS as usize
    ))
}

/// Descriptive summary of one mechanism's samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub sem: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    pub fn from_samples(xs: &[f64]) -> Result<Self, StatsError> {
        let xs_mean = mean(xs)?;
        let xs_sem = sem(xs, xs_mean)?;
        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            count: xs.len(),
            mean: xs_mean,
            sem: xs_sem,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn sum_of_empty_is_zero() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(sum(&[4.25]), 4.25);
    }

    #[test]
    fn sum_is_order_independent() {
        let forward = [0.1, 2.5, -7.75, 1e3, 3.3];
        let mut backward = forward;
        backward.reverse();
        assert!((sum(&forward) - sum(&backward)).abs() < EPS);
    }

    #[test]
    fn mean_of_repeated_value() {
        assert_eq!(mean(&[2.5]).unwrap(), 2.5);
        assert!((mean(&[2.5, 2.5, 2.5]).unwrap() - 2.5).abs() < EPS);
        assert_eq!(mean(&[]), Err(StatsError::Empty));
    }

    #[test]
    fn sem_of_constant_sequence_is_zero() {
        let xs = [7.0; 5];
        assert_eq!(sem(&xs, mean(&xs).unwrap()).unwrap(), 0.0);
    }

    #[test]
    fn sem_matches_hand_computation() {
        // deviations -1, 0, 1 -> sqrt(2 / 6)
        let xs = [1.0, 2.0, 3.0];
        let expected = (2.0f64 / 6.0).sqrt();
        assert!((sem(&xs, 2.0).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn sem_needs_two_samples() {
        assert_eq!(sem(&[], 0.0), Err(StatsError::TooFewSamples { n: 0 }));
        assert_eq!(sem(&[1.0], 1.0), Err(StatsError::TooFewSamples { n: 1 }));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // exactly representable halves at the third decimal
        assert_eq!(round_to(0.0625, 3), 0.063);
        assert_eq!(round_to(-0.0625, 3), -0.063);
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(-0.0004, 3), 0.0);
        assert!(round_to(-0.0004, 3).is_sign_positive());
        // not an exact half in binary; scaled product still rounds up
        assert_eq!(round_to(1.2345, 3), 1.235);
    }

    #[test]
    fn formats_three_decimals_with_plus_minus() {
        let xs = [1.0, 2.0, 3.0];
        assert_eq!(format_mean_pm(&xs).unwrap(), "2.000 ± 0.577");

        let constant = [0.0625; 4];
        assert_eq!(format_mean_pm(&constant).unwrap(), "0.063 ± 0.000");

        let negative = [-0.0625; 3];
        assert_eq!(format_mean_pm(&negative).unwrap(), "-0.063 ± 0.000");
    }

    #[test]
    fn format_is_pure() {
        let xs = [0.41, 1.93, -0.2, 0.77];
        assert_eq!(format_mean_pm(&xs), format_mean_pm(&xs));
    }

    #[test]
    fn format_reports_undefined_statistics() {
        assert_eq!(format_mean_pm(&[]), Err(StatsError::Empty));
        assert_eq!(format_mean_pm(&[1.0]), Err(StatsError::TooFewSamples { n: 1 }));
    }

    #[test]
    fn summary_tracks_extremes() {
        let summary = SampleSummary::from_samples(&[3.0, -1.0, 4.0, 2.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 4.0);
        assert!((summary.mean - 2.0).abs() < EPS);
    }
}
