//! Latest-result publication
//!
//! Pipeline runs are not cancelled when a newer one starts, so an older run
//! can finish after a newer one. Every run takes a [`Generation`] before it
//! starts and the store only accepts a result whose generation is newer than
//! the one it holds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::pipeline::PipelineRun;

/// Monotonic id of a pipeline run, taken when the run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A published run and the generation it was started with
#[derive(Debug, Clone)]
pub struct Published {
    pub generation: Generation,
    pub run: Arc<PipelineRun>,
}

/// Holds the most recently started run that has finished
#[derive(Debug, Default)]
pub struct ResultStore {
    next: AtomicU64,
    latest: Mutex<Option<Published>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the generation for a run that is about to start
    pub fn begin(&self) -> Generation {
        Generation(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the stored run unless a newer generation is already stored
    ///
    /// Returns whether the run was accepted.
    pub fn publish(&self, generation: Generation, run: PipelineRun) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = latest.as_ref() {
            if current.generation >= generation {
                tracing::debug!(
                    stale = generation.value(),
                    current = current.generation.value(),
                    "dropping stale pipeline result"
                );
                return false;
            }
        }

        *latest = Some(Published {
            generation,
            run: Arc::new(run),
        });
        true
    }

    /// The currently published run, if any
    pub fn latest(&self) -> Option<Published> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
