//! CPU Burner Core
//!
//! Multi-threaded synthetic CPU load generator with a fixed duty cycle.
//!
//! # Architecture
//!
//! - **rng**: MT19937 generators, one owned by each worker
//! - **core**: Duty-cycle timing (busy/idle budgets)
//! - **orchestrator**: Worker loop, spawning, stop flag, aggregation
//! - **models**: Run report and its text form
//!
//! # Critical Invariants
//!
//! 1. Generator state is never shared between threads
//! 2. The only cross-thread mutable state is the stop flag
//! 3. Per-worker counters are read only after the worker has joined

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use self::core::time::DutyCycle;
pub use models::{BurnSummary, ReportError, RunReport, ThreadStat};
pub use orchestrator::{BurnConfig, BurnError, Orchestrator, Worker, MAX_THREADS};
pub use rng::{GeneratorBank, GeneratorSnapshot, Mt19937, RngError};
