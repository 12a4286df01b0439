//! Benchmark parameters
//!
//! The binary always runs with [`BenchmarkConfig::default`]; smaller
//! configurations exist so the harness can be exercised quickly.

use std::time::Duration;

use serde::Serialize;

use crate::core::error::BenchError;

/// Number of trials per run
pub const N: usize = 1000;

/// Upper bound (exclusive) of a trial's random delay, in milliseconds
pub const MAX_DELAY: f64 = 5000.0;

/// Slack added to the longest possible delay before giving up on stragglers
pub const JOIN_GRACE_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkConfig {
    pub trials: usize,
    pub max_delay_ms: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            trials: N,
            max_delay_ms: MAX_DELAY,
        }
    }
}

impl BenchmarkConfig {
    pub fn new(trials: usize, max_delay_ms: f64) -> Result<Self, BenchError> {
        let config = Self { trials, max_delay_ms };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.trials == 0 {
            return Err(BenchError::InvalidConfig("trials must be positive".into()));
        }
        if !self.max_delay_ms.is_finite() || self.max_delay_ms <= 0.0 {
            return Err(BenchError::InvalidConfig(format!(
                "max delay must be a positive number of milliseconds, got {}",
                self.max_delay_ms
            )));
        }
        Ok(())
    }

    /// Delays at or below this run TC first, above it AA first
    pub fn midpoint_ms(&self) -> f64 {
        self.max_delay_ms / 2.0
    }

    /// Longest the reporting step waits for outstanding measurements
    pub fn join_deadline(&self) -> Duration {
        Duration::from_secs_f64((self.max_delay_ms + JOIN_GRACE_MS) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.trials, 1000);
        assert_eq!(config.max_delay_ms, 5000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_trials_and_bad_delays() {
        assert!(matches!(BenchmarkConfig::new(0, 100.0), Err(BenchError::InvalidConfig(_))));
        assert!(matches!(BenchmarkConfig::new(10, 0.0), Err(BenchError::InvalidConfig(_))));
        assert!(matches!(BenchmarkConfig::new(10, f64::NAN), Err(BenchError::InvalidConfig(_))));
        assert!(matches!(BenchmarkConfig::new(10, -5.0), Err(BenchError::InvalidConfig(_))));
    }

    #[test]
    fn derived_values() {
        let config = BenchmarkConfig::new(10, 100.0).unwrap();
        assert_eq!(config.midpoint_ms(), 50.0);
        assert!((config.join_deadline().as_secs_f64() - 0.6).abs() < 1e-9);
    }
}
