//! Error types for the scheduling overhead benchmark

use serde::Serialize;
use thiserror::Error;

/// Failure of a single deferred delay completion
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DelayError {
    #[error("timer for trial {id} was dropped before it fired")]
    Dropped { id: usize },
}

/// Failure to summarise a set of overhead samples
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatsError {
    #[error("no samples")]
    Empty,
    #[error("standard error needs at least 2 samples, got {n}")]
    TooFewSamples { n: usize },
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("measurement task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
