//! Duty-cycle timing
//!
//! Workers run on a fixed control period. Each period is split into a busy
//! budget (burst of generator work) and an idle budget (sleep), sized from the
//! target utilization. All arithmetic is in whole microseconds.

use std::time::{Duration, Instant};

/// Microseconds in one second
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Busy/idle split of one control period
///
/// # Example
/// ```
/// use cpuburn_core::DutyCycle;
///
/// let cycle = DutyCycle::new(10, 25); // 10 Hz, 25% busy
/// assert_eq!(cycle.period_us(), 100_000);
/// assert_eq!(cycle.busy_us(), 25_000);
/// assert_eq!(cycle.idle_us(), 75_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyCycle {
    /// Length of one control period (µs)
    period_us: u64,
    /// Portion of the period spent generating (µs)
    busy_us: u64,
}

impl DutyCycle {
    /// Derive the budgets for a control frequency and utilization percentage
    ///
    /// # Arguments
    /// * `frequency_hz` - Control periods per second (must be in 1..=1_000_000)
    /// * `utilization` - Target busy percentage (must be in 0..=100)
    ///
    /// # Panics
    /// Panics if either argument is out of range. Configuration is validated
    /// before a schedule is ever built.
    pub fn new(frequency_hz: u64, utilization: u32) -> Self {
        assert!(
            (1..=MICROS_PER_SEC).contains(&frequency_hz),
            "frequency_hz must be in 1..=1000000"
        );
        assert!(utilization <= 100, "utilization must be at most 100");

        let period_us = MICROS_PER_SEC / frequency_hz;
        let busy_us = period_us * u64::from(utilization) / 100;
        Self { period_us, busy_us }
    }

    /// Control period length in microseconds
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Busy budget in microseconds
    pub fn busy_us(&self) -> u64 {
        self.busy_us
    }

    /// Idle budget in microseconds
    pub fn idle_us(&self) -> u64 {
        self.period_us - self.busy_us
    }

    pub fn period(&self) -> Duration {
        Duration::from_micros(self.period_us)
    }

    pub fn busy_budget(&self) -> Duration {
        Duration::from_micros(self.busy_us)
    }

    pub fn idle_budget(&self) -> Duration {
        Duration::from_micros(self.idle_us())
    }

    /// Sleep to take after a burst, or `None` when the schedule never idles
    ///
    /// # Example
    /// ```
    /// use cpuburn_core::DutyCycle;
    ///
    /// assert!(DutyCycle::new(10, 100).idle_sleep().is_none());
    /// assert!(DutyCycle::new(10, 99).idle_sleep().is_some());
    /// ```
    pub fn idle_sleep(&self) -> Option<Duration> {
        match self.idle_us() {
            0 => None,
            us => Some(Duration::from_micros(us)),
        }
    }
}

/// Whole microseconds from `start` to `end`, zero if `end` is earlier
pub fn micros_between(start: Instant, end: Instant) -> u64 {
    let micros = end.saturating_duration_since(start).as_micros();
    u64::try_from(micros).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "utilization must be at most 100")]
    fn test_utilization_over_100_panics() {
        DutyCycle::new(10, 101);
    }

    #[test]
    #[should_panic(expected = "frequency_hz must be in 1..=1000000")]
    fn test_zero_frequency_panics() {
        DutyCycle::new(0, 50);
    }

    #[test]
    fn test_micros_between_saturates() {
        let later = Instant::now();
        let earlier = later - Duration::from_millis(5);
        assert_eq!(micros_between(later, earlier), 0);
        assert_eq!(micros_between(earlier, later), 5_000);
    }
}
