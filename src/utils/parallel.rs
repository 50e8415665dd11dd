//! Process-wide switch for the rayon code paths.
//!
//! Every parallel site checks [`parallelism_enabled`] and falls back to the
//! sequential loop when it is off.  Both paths produce identical results, so
//! the switch only affects scheduling.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

/// Smallest batch handed to one rayon task.
const MIN_CHUNK_SIZE: usize = 64;
/// Tasks scheduled per worker thread.
const TASKS_PER_WORKER: usize = 4;

/// Minimum number of items per parallel task for a job of `total_items`.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    let spread = total_items / (worker_count() * TASKS_PER_WORKER);
    spread.max(MIN_CHUNK_SIZE).min(total_items.max(1))
}

#[cfg(feature = "parallel")]
fn worker_count() -> usize {
    rayon::current_num_threads().max(1)
}

#[cfg(not(feature = "parallel"))]
fn worker_count() -> usize {
    1
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Turns the parallel code paths on or off until the returned guard drops.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous parallelism setting on drop.
#[must_use = "the setting is reverted as soon as the guard is dropped"]
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}
