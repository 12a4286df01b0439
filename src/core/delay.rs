//! Timer-backed deferred completion
//!
//! [`delayed_id`] arms a timer at call time and hands back a future that
//! resolves with the trial id once the timer fires. It is the only suspension
//! point the measurement mechanisms wait on.

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::oneshot;
use tokio::time::{sleep_until, Instant};

use crate::core::error::DelayError;

pub fn ms_to_duration(delay_ms: f64) -> Duration {
    Duration::from_secs_f64(delay_ms.max(0.0) / 1000.0)
}

/// Resolve with `id` after `delay_ms` milliseconds, counted from this call
///
/// The timer runs on its own task, so the deadline is fixed here even if the
/// returned future is polled later. Must be called inside a tokio runtime.
pub fn delayed_id(
    id: usize,
    delay_ms: f64,
) -> impl Future<Output = Result<usize, DelayError>> + Send + 'static {
    let deadline = Instant::now() + ms_to_duration(delay_ms);
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        sleep_until(deadline).await;
        // receiver gone means the measurement was abandoned
        let _ = tx.send(id);
    });
    rx.map(move |fired| fired.map_err(|_| DelayError::Dropped { id }))
}
