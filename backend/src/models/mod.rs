//! Result models for a burn

pub mod report;

// Re-exports
pub use report::{BurnSummary, ReportError, RunReport, ThreadStat};
