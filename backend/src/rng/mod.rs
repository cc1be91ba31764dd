//! Deterministic random number generation
//!
//! Uses the MT19937 Mersenne Twister as the synthetic workload.
//! Every worker owns exactly one generator; nothing in this module is shared
//! between threads.

mod bank;
mod mt19937;

pub use bank::GeneratorBank;
pub use mt19937::{GeneratorSnapshot, Mt19937, RngError, DEFAULT_KEY, DEFAULT_SEED, STATE_WORDS};
