//! Per-mechanism overhead slots
//!
//! One slot per trial. Each measurement future writes only its own trial's
//! slot, so the lock is never contended for the same index.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Overhead samples for one mechanism, indexed by trial id
#[derive(Debug, Clone)]
pub struct OverheadSpans {
    slots: Arc<Mutex<Vec<Option<f64>>>>,
}

impl OverheadSpans {
    pub fn new(trials: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(vec![None; trials])),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<f64>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the overhead for trial `id`. A slot is written at most once;
    /// a second write or an out-of-range id is ignored and reported as `false`.
    pub fn record(&self, id: usize, overhead_ms: f64) -> bool {
        let mut slots = self.lock();
        match slots.get_mut(id) {
            Some(slot) if slot.is_none() => {
                *slot = Some(overhead_ms);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: usize) -> Option<f64> {
        self.lock().get(id).copied().flatten()
    }

    /// Populated samples in trial order; unset slots are skipped
    pub fn populated(&self) -> Vec<f64> {
        self.lock().iter().flatten().copied().collect()
    }

    pub fn missing(&self) -> usize {
        self.lock().iter().filter(|slot| slot.is_none()).count()
    }
}
