//! Duty-cycle worker loop
//!
//! A worker alternates between a burst of generator work and an idle sleep.
//! Elapsed time is checked once per batch rather than once per generator call,
//! so timestamp queries stay negligible next to the work itself. The batch
//! count is not fixed up front because refills make generator cost uneven.
//!
//! ```text
//! while !stop:
//!     start = now
//!     loop:
//!         run one batch, bursts += 1
//!         if now - start >= busy budget: break
//!     sleep idle budget (skipped when zero)
//! ```

use crate::core::time::{micros_between, DutyCycle};
use crate::rng::Mt19937;
use log::debug;
use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

/// Per-thread runtime: one generator, one counter, shared schedule
///
/// # Example
/// ```
/// use cpuburn_core::{DutyCycle, Mt19937, Worker};
///
/// let mut worker = Worker::new(0, Mt19937::new(1), DutyCycle::new(10, 0), 100);
/// assert_eq!(worker.run_burst(), 1); // zero busy budget: one batch only
/// assert_eq!(worker.bursts(), 1);
/// ```
#[derive(Debug)]
pub struct Worker {
    index: usize,
    rng: Mt19937,
    schedule: DutyCycle,
    batch_size: u64,
    bursts: u64,
}

impl Worker {
    /// Create a worker that owns `rng` for its whole lifetime
    ///
    /// # Panics
    /// Panics if `batch_size` is zero.
    pub fn new(index: usize, rng: Mt19937, schedule: DutyCycle, batch_size: u64) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        Self {
            index,
            rng,
            schedule,
            batch_size,
            bursts: 0,
        }
    }

    /// Completed batches so far
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    /// Run one batch of generator calls
    ///
    /// Outputs are folded into a sink passed through [`black_box`] so the
    /// work cannot be optimized away.
    #[inline]
    pub fn run_batch(&mut self) {
        let mut sink = 0u32;
        for _ in 0..self.batch_size {
            sink ^= self.rng.next_u32();
        }
        black_box(sink);
        self.bursts += 1;
    }

    /// Run batches until the busy budget is used up
    ///
    /// Always runs at least one batch. Returns the number of batches run.
    pub fn run_burst(&mut self) -> u64 {
        let budget = self.schedule.busy_us();
        let start = Instant::now();
        let mut batches = 0;

        loop {
            self.run_batch();
            batches += 1;

            if micros_between(start, Instant::now()) >= budget {
                return batches;
            }
        }
    }

    /// Burst/sleep until `stop` is observed, returning the completed count
    ///
    /// The flag is only checked between bursts; a worker finishes its
    /// current burst and sleep before exiting.
    pub fn run(mut self, stop: &AtomicBool) -> u64 {
        debug!(
            "worker {} starting: busy {}us, idle {}us, batch {}",
            self.index,
            self.schedule.busy_us(),
            self.schedule.idle_us(),
            self.batch_size
        );

        let idle = self.schedule.idle_sleep();
        while !stop.load(Ordering::Relaxed) {
            self.run_burst();
            if let Some(idle) = idle {
                thread::sleep(idle);
            }
        }

        debug!("worker {} stopping after {} bursts", self.index, self.bursts);
        self.bursts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_batch_advances_generator() {
        let mut worker = Worker::new(0, Mt19937::new(5), DutyCycle::new(10, 50), 10);
        worker.run_batch();

        let mut expected = Mt19937::new(5);
        for _ in 0..10 {
            expected.next_u32();
        }
        assert_eq!(worker.rng, expected);
        assert_eq!(worker.bursts(), 1);
    }

    #[test]
    fn test_zero_busy_budget_runs_single_batch() {
        let mut worker = Worker::new(3, Mt19937::new(1), DutyCycle::new(10, 0), 1_000);
        for _ in 0..5 {
            assert_eq!(worker.run_burst(), 1);
        }
        assert_eq!(worker.bursts(), 5);
    }

    #[test]
    fn test_burst_lasts_at_least_busy_budget() {
        // 100 Hz at 50% = 5ms busy
        let mut worker = Worker::new(0, Mt19937::new(1), DutyCycle::new(100, 50), 100);
        let start = Instant::now();
        let batches = worker.run_burst();
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(batches >= 1);
    }

    #[test]
    fn test_preset_stop_runs_nothing() {
        let stop = AtomicBool::new(true);
        let worker = Worker::new(0, Mt19937::new(1), DutyCycle::new(10, 100), 100);
        assert_eq!(worker.run(&stop), 0);
    }

    #[test]
    #[should_panic(expected = "batch_size must be positive")]
    fn test_zero_batch_size_panics() {
        Worker::new(0, Mt19937::new(1), DutyCycle::new(10, 50), 0);
    }
}
