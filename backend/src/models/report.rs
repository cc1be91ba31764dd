//! Run report
//!
//! Result of one burn and its text form. The text layout is stable so that
//! downstream tooling can scrape it:
//!
//! ```text
//! Starting CPU burner for 2 seconds, 2 core(s), with 50% CPU utilization
//! Stat[0] = 1234
//! Stat[1] = 1229
//! Total time passed: 2.000211 s
//! Total: 2463 cycles, 1.231370 Kcycles/s
//! ```
//!
//! [`BurnSummary::parse`] reads the last two lines back.

use crate::orchestrator::engine::BurnConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors reading a rendered report
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("Report has no '{0}' line")]
    MissingLine(&'static str),

    #[error("Malformed report line: {line}")]
    Malformed { line: String },
}

/// Completed-burst count of one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStat {
    /// Bank index of the worker
    pub index: usize,
    /// Completed bursts
    pub bursts: u64,
}

/// Aggregated result of one burn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub duration_secs: u64,
    pub utilization: u32,
    pub threads: usize,

    /// Per-worker counters, in bank index order
    pub thread_stats: Vec<ThreadStat>,

    /// Wall-clock time from first spawn to last join (µs)
    pub elapsed_us: u64,

    /// Sum of all per-worker counters
    pub total_bursts: u64,

    /// Thousands of completed bursts per second
    pub throughput_kbursts_per_sec: f64,
}

impl RunReport {
    /// Aggregate per-worker counters into a report
    ///
    /// # Example
    /// ```
    /// use cpuburn_core::{BurnConfig, RunReport, ThreadStat};
    ///
    /// let stats = vec![
    ///     ThreadStat { index: 0, bursts: 600 },
    ///     ThreadStat { index: 1, bursts: 400 },
    /// ];
    /// let report = RunReport::new(&BurnConfig::default(), stats, 2_000_000);
    /// assert_eq!(report.total_bursts, 1000);
    /// assert_eq!(report.throughput_kbursts_per_sec, 0.5);
    /// ```
    pub fn new(config: &BurnConfig, thread_stats: Vec<ThreadStat>, elapsed_us: u64) -> Self {
        let total_bursts: u64 = thread_stats.iter().map(|stat| stat.bursts).sum();

        Self {
            duration_secs: config.duration_secs,
            utilization: config.utilization,
            threads: config.threads,
            thread_stats,
            elapsed_us,
            total_bursts,
            throughput_kbursts_per_sec: throughput_kbursts(total_bursts, elapsed_us),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us)
    }

    /// Elapsed wall-clock time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_us as f64 / 1_000_000.0
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Per-thread lines followed by the two summary lines
impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stat in &self.thread_stats {
            writeln!(f, "Stat[{}] = {}", stat.index, stat.bursts)?;
        }
        writeln!(f, "Total time passed: {:.6} s", self.elapsed_secs())?;
        write!(
            f,
            "Total: {} cycles, {:.6} Kcycles/s",
            self.total_bursts, self.throughput_kbursts_per_sec
        )
    }
}

/// Banner printed before a burn starts
///
/// # Example
/// ```
/// use cpuburn_core::models::report::startup_line;
///
/// assert_eq!(
///     startup_line(2, 4, 50),
///     "Starting CPU burner for 2 seconds, 4 core(s), with 50% CPU utilization"
/// );
/// ```
pub fn startup_line(duration_secs: u64, threads: usize, utilization: u32) -> String {
    format!(
        "Starting CPU burner for {} seconds, {} core(s), with {}% CPU utilization",
        duration_secs, threads, utilization
    )
}

/// `total * 1000 / elapsed_us`, or zero for an empty interval
fn throughput_kbursts(total_bursts: u64, elapsed_us: u64) -> f64 {
    if elapsed_us == 0 {
        return 0.0;
    }
    total_bursts as f64 * 1000.0 / elapsed_us as f64
}

// ============================================================================
// Parsing
// ============================================================================

const TIME_PREFIX: &str = "Total time passed: ";
const TOTAL_PREFIX: &str = "Total: ";

/// Elapsed time and total count scraped from a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnSummary {
    /// Elapsed seconds
    pub time_secs: f64,
    /// Total completed bursts
    pub cycles: u64,
}

impl BurnSummary {
    /// Read the summary lines out of report text
    ///
    /// The last matching line wins, so output with leading noise (or several
    /// concatenated reports) resolves to the final run.
    ///
    /// # Errors
    /// [`ReportError::MissingLine`] if either summary line is absent,
    /// [`ReportError::Malformed`] if one is present but unparseable.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        let time_line = text
            .lines()
            .rev()
            .find(|line| line.starts_with(TIME_PREFIX))
            .ok_or(ReportError::MissingLine("Total time passed"))?;
        let total_line = text
            .lines()
            .rev()
            .find(|line| line.starts_with(TOTAL_PREFIX))
            .ok_or(ReportError::MissingLine("Total"))?;

        let malformed = |line: &str| ReportError::Malformed {
            line: line.to_string(),
        };

        let time_secs = time_line
            .strip_prefix(TIME_PREFIX)
            .and_then(|rest| rest.trim_end().strip_suffix(" s"))
            .and_then(|secs| secs.parse::<f64>().ok())
            .ok_or_else(|| malformed(time_line))?;

        let cycles = total_line
            .strip_prefix(TOTAL_PREFIX)
            .and_then(|rest| rest.split_once(" cycles"))
            .and_then(|(count, _)| count.parse::<u64>().ok())
            .ok_or_else(|| malformed(total_line))?;

        Ok(Self { time_secs, cycles })
    }

    /// Thousands of cycles per second
    pub fn kcycles_per_sec(&self) -> f64 {
        if self.time_secs <= 0.0 {
            return 0.0;
        }
        self.cycles as f64 / self.time_secs / 1000.0
    }
}
