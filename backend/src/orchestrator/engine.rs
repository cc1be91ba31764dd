//! Orchestrator Engine
//!
//! Runs a complete burn:
//!
//! ```text
//! 1. Validate configuration (before any thread exists)
//! 2. Seed one generator per worker from the key
//! 3. Spawn workers, each owning its generator
//! 4. Sleep for the configured duration
//! 5. Raise the stop flag
//! 6. Join workers and collect their counters
//! 7. Build the run report
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cpuburn_core::{BurnConfig, Orchestrator};
//!
//! let config = BurnConfig {
//!     duration_secs: 2,
//!     utilization: 50,
//!     threads: 2,
//!     ..Default::default()
//! };
//!
//! let report = Orchestrator::new(config).unwrap().run().unwrap();
//! println!("{}", report);
//! ```

use crate::core::time::{micros_between, DutyCycle};
use crate::models::report::{RunReport, ThreadStat};
use crate::orchestrator::worker::Worker;
use crate::rng::{GeneratorBank, DEFAULT_KEY};
use log::info;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Upper bound on worker threads
pub const MAX_THREADS: usize = 32;

/// Generator calls per batch
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;

/// Control periods per second
pub const DEFAULT_FREQUENCY_HZ: u64 = 10;

pub const DEFAULT_DURATION_SECS: u64 = 10;
pub const DEFAULT_UTILIZATION: u32 = 100;
pub const DEFAULT_THREADS: usize = 1;

/// Complete burn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnConfig {
    /// Wall-clock run time in seconds (>= 1)
    pub duration_secs: u64,

    /// Target utilization percentage per worker (0..=100)
    pub utilization: u32,

    /// Number of worker threads (1..=MAX_THREADS)
    pub threads: usize,

    /// Key every worker's generator is seeded with
    pub seed_key: Vec<u32>,

    /// Generator calls between elapsed-time checks (>= 1)
    pub batch_size: u64,

    /// Control frequency in Hz (1..=1_000_000)
    pub frequency_hz: u64,
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            utilization: DEFAULT_UTILIZATION,
            threads: DEFAULT_THREADS,
            seed_key: DEFAULT_KEY.to_vec(),
            batch_size: DEFAULT_BATCH_SIZE,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

/// Burn error types
#[derive(Debug, Error)]
pub enum BurnError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// OS refused to create a worker thread
    #[error("Failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    /// A worker thread panicked before reporting its counter
    #[error("Worker {index} panicked")]
    WorkerPanicked { index: usize },
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Spawns, times, stops and joins the workers of one burn
#[derive(Debug)]
pub struct Orchestrator {
    config: BurnConfig,
    schedule: DutyCycle,
    stop: Arc<AtomicBool>,
}

impl Orchestrator {
    /// Create new orchestrator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Configuration is valid
    /// * `Err(BurnError::InvalidConfig)` - Configuration validation failed
    ///
    /// # Example
    ///
    /// ```rust
    /// use cpuburn_core::{BurnConfig, Orchestrator, MAX_THREADS};
    ///
    /// let config = BurnConfig { threads: MAX_THREADS + 1, ..Default::default() };
    /// assert!(Orchestrator::new(config).is_err());
    /// ```
    pub fn new(config: BurnConfig) -> Result<Self, BurnError> {
        Self::validate_config(&config)?;

        let schedule = DutyCycle::new(config.frequency_hz, config.utilization);

        Ok(Self {
            config,
            schedule,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Validate configuration
    fn validate_config(config: &BurnConfig) -> Result<(), BurnError> {
        if config.duration_secs < 1 {
            return Err(BurnError::InvalidConfig(
                "Positive time is required".to_string(),
            ));
        }

        if config.utilization > 100 {
            return Err(BurnError::InvalidConfig(format!(
                "invalid CPU utilization value: {}",
                config.utilization
            )));
        }

        if config.threads == 0 {
            return Err(BurnError::InvalidConfig(
                "at least one thread is required".to_string(),
            ));
        }

        if config.threads > MAX_THREADS {
            return Err(BurnError::InvalidConfig(format!(
                "no more than {} threads supported",
                MAX_THREADS
            )));
        }

        if config.batch_size == 0 {
            return Err(BurnError::InvalidConfig(
                "batch_size must be > 0".to_string(),
            ));
        }

        if !(1..=1_000_000).contains(&config.frequency_hz) {
            return Err(BurnError::InvalidConfig(format!(
                "frequency_hz must be in 1..=1000000, got {}",
                config.frequency_hz
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &BurnConfig {
        &self.config
    }

    /// Busy/idle budgets every worker runs with
    pub fn schedule(&self) -> DutyCycle {
        self.schedule
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run the burn for the configured duration and report the counters
    ///
    /// Blocks the calling thread for the whole run.
    ///
    /// # Errors
    ///
    /// * `BurnError::Spawn` - a worker thread could not be created; no report
    ///   is produced
    /// * `BurnError::WorkerPanicked` - a worker died before joining
    pub fn run(self) -> Result<RunReport, BurnError> {
        let duration = Duration::from_secs(self.config.duration_secs);

        info!(
            "starting burn: {} thread(s), {}% for {}s (busy {}us / idle {}us)",
            self.config.threads,
            self.config.utilization,
            self.config.duration_secs,
            self.schedule.busy_us(),
            self.schedule.idle_us()
        );

        let start = Instant::now();
        let handles = self.spawn_workers()?;

        thread::sleep(duration);
        self.stop.store(true, Ordering::Relaxed);

        let thread_stats = Self::join_workers(handles)?;
        let elapsed_us = micros_between(start, Instant::now());

        let report = RunReport::new(&self.config, thread_stats, elapsed_us);
        info!(
            "burn finished: {} bursts in {:.6}s",
            report.total_bursts,
            report.elapsed_secs()
        );

        Ok(report)
    }

    /// Spawn one worker per generator slot
    fn spawn_workers(&self) -> Result<Vec<JoinHandle<u64>>, BurnError> {
        let generators =
            GeneratorBank::seeded(self.config.threads, &self.config.seed_key).into_generators();

        let mut handles = Vec::with_capacity(generators.len());
        for (index, rng) in generators.into_iter().enumerate() {
            let worker = Worker::new(index, rng, self.schedule, self.config.batch_size);
            let stop = Arc::clone(&self.stop);

            let spawned = thread::Builder::new()
                .name(format!("cpuburn-worker-{}", index))
                .spawn(move || worker.run(&stop));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    // Already-running workers wind down on their own; nothing is joined
                    self.stop.store(true, Ordering::Relaxed);
                    return Err(BurnError::Spawn { index, source });
                }
            }
        }

        Ok(handles)
    }

    /// Join every worker in slot order and collect its counter
    fn join_workers(handles: Vec<JoinHandle<u64>>) -> Result<Vec<ThreadStat>, BurnError> {
        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                handle
                    .join()
                    .map(|bursts| ThreadStat { index, bursts })
                    .map_err(|_| BurnError::WorkerPanicked { index })
            })
            .collect()
    }
}
