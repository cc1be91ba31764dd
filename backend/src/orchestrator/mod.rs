//! Orchestrator - spawns, times and joins the duty-cycle workers
//!
//! See `engine.rs` for the run sequence and `worker.rs` for the per-thread loop.

pub mod engine;
pub mod worker;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{
    BurnConfig, BurnError, Orchestrator, DEFAULT_BATCH_SIZE, DEFAULT_DURATION_SECS,
    DEFAULT_FREQUENCY_HZ, DEFAULT_THREADS, DEFAULT_UTILIZATION, MAX_THREADS,
};
pub use worker::Worker;
