pub mod config;
pub mod delay;
pub mod error;
pub mod mechanism;

use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use rand::Rng;
use serde::Serialize;
use tokio::task::JoinSet;
use tokio::time::{timeout, Duration};

use crate::stats::sample_statistics::{format_mean_pm, SampleSummary};
use crate::stats::OverheadSpans;
use crate::ui::report;

pub use config::BenchmarkConfig;
pub use error::{BenchError, DelayError, StatsError};
pub use mechanism::Mechanism;

// ============================================================================
// TRIALS
// ============================================================================

/// One randomized delay shared by both mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trial {
    pub id: usize,
    pub delay_ms: f64,
}

/// Draw `trials` delays uniformly from `[0, max_delay_ms)`
pub fn draw_trials<R: Rng>(config: &BenchmarkConfig, rng: &mut R) -> Vec<Trial> {
    (0..config.trials)
        .map(|id| Trial {
            id,
            delay_ms: config.max_delay_ms * rng.gen::<f64>(),
        })
        .collect()
}

/// Short delays launch TC first, long delays AA first
pub fn invocation_order(config: &BenchmarkConfig, delay_ms: f64) -> [Mechanism; 2] {
    if delay_ms <= config.midpoint_ms() {
        [Mechanism::Chained, Mechanism::Suspended]
    } else {
        [Mechanism::Suspended, Mechanism::Chained]
    }
}

// ============================================================================
// HARNESS
// ============================================================================

/// Outcome of waiting for the launched measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinOutcome {
    pub completed: usize,
    pub failed: usize,
    pub abandoned: usize,
}

impl JoinOutcome {
    pub fn timed_out(&self) -> bool {
        self.abandoned > 0
    }
}

/// Trials and per-mechanism slots for a single run
pub struct Harness {
    config: BenchmarkConfig,
    trials: Vec<Trial>,
    spans_tc: OverheadSpans,
    spans_aa: OverheadSpans,
}

impl Harness {
    pub fn new<R: Rng>(config: BenchmarkConfig, rng: &mut R) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self::with_trials(config, draw_trials(&config, rng)))
    }

    pub fn with_trials(config: BenchmarkConfig, trials: Vec<Trial>) -> Self {
        Self {
            spans_tc: OverheadSpans::new(trials.len()),
            spans_aa: OverheadSpans::new(trials.len()),
            config,
            trials,
        }
    }

    pub fn spans(&self, mechanism: Mechanism) -> &OverheadSpans {
        match mechanism {
            Mechanism::Chained => &self.spans_tc,
            Mechanism::Suspended => &self.spans_aa,
        }
    }

    /// Start both mechanisms for every trial without waiting on any of them
    pub fn launch(&self) -> JoinSet<()> {
        let mut set = JoinSet::new();
        for trial in &self.trials {
            let order = invocation_order(&self.config, trial.delay_ms);
            debug!(
                "trial {} delay {:.3}ms order {}/{}",
                trial.id,
                trial.delay_ms,
                order[0].label(),
                order[1].label()
            );
            for mechanism in order {
                let measure = mechanism.measure_fn();
                set.spawn(measure(self.spans(mechanism).clone(), trial.id, trial.delay_ms));
            }
        }
        set
    }

    /// Launch every measurement and wait for all of them, bounded by the
    /// configured join deadline
    pub async fn run(&self, progress: &ProgressBar) -> JoinOutcome {
        let set = self.launch();
        join_all(set, self.config.join_deadline(), progress).await
    }

    pub fn report(&self, outcome: JoinOutcome) -> Report {
        Report {
            config: self.config,
            outcome,
            mechanisms: Mechanism::all()
                .iter()
                .map(|&m| MechanismReport::from_spans(m, self.spans(m)))
                .collect(),
        }
    }
}

/// Drain `set`, giving up on whatever is still pending after `deadline`
pub async fn join_all(mut set: JoinSet<()>, deadline: Duration, progress: &ProgressBar) -> JoinOutcome {
    let mut completed = 0;
    let mut failed = 0;

    let drained = timeout(deadline, async {
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(()) => completed += 1,
                Err(e) => {
                    failed += 1;
                    error!("{}", BenchError::from(e));
                }
            }
            progress.inc(1);
        }
    })
    .await;

    let abandoned = set.len();
    if drained.is_err() {
        warn!(
            "{} measurement(s) still pending after {:.0}ms, reporting without them",
            abandoned,
            deadline.as_secs_f64() * 1000.0
        );
        set.abort_all();
    }

    JoinOutcome {
        completed,
        failed,
        abandoned,
    }
}

// ============================================================================
// REPORTING
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MechanismReport {
    pub mechanism: Mechanism,
    pub mean_pm: Result<String, StatsError>,
    pub summary: Option<SampleSummary>,
    pub missing: usize,
}

impl MechanismReport {
    pub fn from_spans(mechanism: Mechanism, spans: &OverheadSpans) -> Self {
        let samples = spans.populated();
        Self {
            mechanism,
            mean_pm: format_mean_pm(&samples),
            summary: SampleSummary::from_samples(&samples).ok(),
            missing: spans.missing(),
        }
    }

    /// `meanSpansTC: <mean> ± <sem>`
    pub fn line(&self) -> String {
        match &self.mean_pm {
            Ok(text) => format!("meanSpans{}: {}", self.mechanism.label(), text),
            Err(e) => format!("meanSpans{}: unavailable ({})", self.mechanism.label(), e),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config: BenchmarkConfig,
    pub outcome: JoinOutcome,
    pub mechanisms: Vec<MechanismReport>,
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        self.mechanisms.iter().map(MechanismReport::line).collect()
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Run one full benchmark and print the result lines to stdout
pub async fn run_benchmark(config: BenchmarkConfig) -> Result<Report, BenchError> {
    let harness = Harness::new(config, &mut rand::thread_rng())?;

    report::print_banner(&config);
    info!(
        "{} trials, delays in [0, {}) ms, {} measurements",
        config.trials,
        config.max_delay_ms,
        config.trials * Mechanism::all().len()
    );

    let progress = report::progress_bar((config.trials * Mechanism::all().len()) as u64);
    let outcome = harness.run(&progress).await;
    progress.finish_with_message("all timers settled");
    info!(
        "{} completed, {} failed, {} abandoned",
        outcome.completed, outcome.failed, outcome.abandoned
    );

    let result = harness.report(outcome);
    for m in &result.mechanisms {
        if let Err(e) = &m.mean_pm {
            error!("no statistics for {}: {}", m.mechanism.label(), e);
        }
    }
    for line in result.lines() {
        println!("{}", line);
    }
    report::print_summary_table(&result);
    match serde_json::to_string(&result) {
        Ok(json) => debug!("summary: {}", json),
        Err(e) => debug!("summary not serializable: {}", e),
    }

    Ok(result)
}
