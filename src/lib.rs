//! Async Completion Overhead Benchmark Library
//!
//! Measures how late timer-driven completions are observed when the
//! continuation is chained onto a future versus written with `.await`.

pub mod core;
pub mod stats;
pub mod ui;
pub mod utils;

pub use crate::core::{run_benchmark, BenchmarkConfig};

/// Library version
pub const VERSION: &str = "0.1.0";
