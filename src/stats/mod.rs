//! Statistics and result storage for overhead measurements

pub mod overhead_measurement;
pub mod sample_statistics;

pub use overhead_measurement::OverheadSpans;
pub use sample_statistics::{format_mean_pm, mean, sem, sum, SampleSummary};
