//! Utility helpers shared across the crate.

mod parallel;

pub use parallel::{parallelism_enabled, preferred_chunk_size, set_parallelism, ParallelismGuard};
