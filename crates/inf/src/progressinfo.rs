use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Error, Result};

/// Verdict of a progress callback, checked after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationStatus {
    Continue,
    Cancel,
}

/// Progress reporting for long running computations.
///
/// Implementations need to be usable from worker threads, so progress state
/// is updated through shared references.
pub trait ProgressNotification: Send + Sync {
    /// Restart progress tracking for a computation with `total` work items.
    fn reset(&self, total: u64);
    /// Report one completed work item.
    ///
    /// Returns `Error::Cancelled` when the computation should be aborted.
    fn tick(&self) -> Result<()>;
}

/// Progress sink that ignores all updates and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyProgress;

impl ProgressNotification for DummyProgress {
    fn reset(&self, _total: u64) {}

    fn tick(&self) -> Result<()> {
        Ok(())
    }
}

/// Forwards the completed fraction to a callback which decides whether the
/// computation continues. An optional payload can be attached to a tick for
/// callbacks that want to display what is being processed.
pub struct CallbackProgress<T, F> {
    current: AtomicU64,
    total: AtomicU64,
    callback: F,
    phantom: PhantomData<fn(T)>,
}

impl<T, F> CallbackProgress<T, F>
where
    F: Fn(f64, Option<&T>) -> ComputationStatus + Send + Sync,
{
    pub fn with_cb(callback: F) -> Self {
        Self {
            current: AtomicU64::new(0),
            total: AtomicU64::new(1),
            callback,
            phantom: PhantomData,
        }
    }

    pub fn tick_with_payload(&self, payload: &T) -> Result<()> {
        self.advance(Some(payload))
    }

    fn advance(&self, payload: Option<&T>) -> Result<()> {
        let done = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed).max(1);
        match (self.callback)(done as f64 / total as f64, payload) {
            ComputationStatus::Continue => Ok(()),
            ComputationStatus::Cancel => Err(Error::Cancelled),
        }
    }
}

impl<T, F> ProgressNotification for CallbackProgress<T, F>
where
    F: Fn(f64, Option<&T>) -> ComputationStatus + Send + Sync,
{
    fn reset(&self, total: u64) {
        self.total.store(total.max(1), Ordering::Relaxed);
        self.current.store(0, Ordering::Relaxed);
    }

    fn tick(&self) -> Result<()> {
        self.advance(None)
    }
}
