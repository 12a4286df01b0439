//! The two completion mechanisms under comparison
//!
//! Both take a start timestamp, wait for [`delayed_id`], and store
//! `elapsed - delay` in their trial's slot. They differ only in how the wait
//! and its continuation are written:
//!
//! * TC chains the continuation onto the pending completion with combinators.
//! * AA suspends on `.await` inside an `async` block and resumes in place.
//!
//! Both take the start timestamp and arm the timer when called, not when
//! first polled.
//!
//! Anything else that differs between them skews the comparison.

use std::future::Future;

use futures::future::BoxFuture;
use futures::{FutureExt, TryFutureExt};
use log::{error, warn};
use serde::Serialize;
use tokio::time::Instant;

use crate::core::delay::delayed_id;
use crate::core::error::DelayError;
use crate::stats::OverheadSpans;

/// Shared call shape of both mechanisms
pub type MeasureFn = fn(OverheadSpans, usize, f64) -> BoxFuture<'static, ()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mechanism {
    /// Continuation-chained
    Chained,
    /// Suspend/resume
    Suspended,
}

impl Mechanism {
    pub fn all() -> &'static [Mechanism] {
        &[Mechanism::Chained, Mechanism::Suspended]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mechanism::Chained => "TC",
            Mechanism::Suspended => "AA",
        }
    }

    pub fn measure_fn(&self) -> MeasureFn {
        match self {
            Mechanism::Chained => measure_chained,
            Mechanism::Suspended => measure_suspended,
        }
    }
}

/// Milliseconds past the nominal delay
pub fn overhead_ms(start: Instant, delay_ms: f64) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0 - delay_ms
}

fn store(spans: &OverheadSpans, label: &str, id: usize, start: Instant, delay_ms: f64) {
    if !spans.record(id, overhead_ms(start, delay_ms)) {
        warn!("{label} slot {id} already written or out of range");
    }
}

pub fn measure_chained(spans: OverheadSpans, id: usize, delay_ms: f64) -> BoxFuture<'static, ()> {
    chained(spans, id, delay_ms, move || delayed_id(id, delay_ms))
}

pub fn measure_suspended(spans: OverheadSpans, id: usize, delay_ms: f64) -> BoxFuture<'static, ()> {
    suspended(spans, id, delay_ms, move || delayed_id(id, delay_ms))
}

fn chained<C, F>(spans: OverheadSpans, id: usize, delay_ms: f64, completion: C) -> BoxFuture<'static, ()>
where
    C: FnOnce() -> F,
    F: Future<Output = Result<usize, DelayError>> + Send + 'static,
{
    let start = Instant::now();
    completion()
        .map_ok(move |i| store(&spans, "TC", i, start, delay_ms))
        .unwrap_or_else(move |_| error!("TC error in {id}"))
        .boxed()
}

fn suspended<C, F>(spans: OverheadSpans, id: usize, delay_ms: f64, completion: C) -> BoxFuture<'static, ()>
where
    C: FnOnce() -> F,
    F: Future<Output = Result<usize, DelayError>> + Send + 'static,
{
    let start = Instant::now();
    let pending = completion();
    async move {
        match pending.await {
            Ok(i) => store(&spans, "AA", i, start, delay_ms),
            Err(_) => error!("AA error in {id}"),
        }
    }
    .boxed()
}
