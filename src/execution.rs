//! Parallel execution threshold
//!
//! Per-throat kernels run through [`map_elements`], which hands the work to
//! Rayon when the crate is built with the `parallel` feature and the element
//! count exceeds [`parallel_threshold`]. The threshold is a runtime setting;
//! results do not depend on it.

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::DVector;

/// Default number of elements above which per-throat kernels switch to
/// parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Kernels iterate sequentially over fewer elements than this value and
/// switch to Rayon above it, but only when the crate is compiled with the
/// `parallel` feature.
///
/// # Example
///
/// ```rust
/// use pnm_rs::execution::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use pnm_rs::execution::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Evaluate `kernel(i)` for every `i in 0..count` into a vector.
pub(crate) fn map_elements<F>(count: usize, kernel: F) -> DVector<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if count > parallel_threshold() {
        use rayon::prelude::*;

        let values: Vec<f64> = (0..count).into_par_iter().map(&kernel).collect();
        return DVector::from_vec(values);
    }
    DVector::from_fn(count, |i, _| kernel(i))
}

/// Serializes threshold changes made by concurrently running unit tests
#[cfg(test)]
static GUARD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Test builds only.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = GUARD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}
