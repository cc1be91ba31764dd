//! Generator bank
//!
//! One independent [`Mt19937`] per worker slot. The bank exists only until
//! the workers start: [`GeneratorBank::into_generators`] moves each generator
//! into its worker so no shared table survives the spawn.

use super::Mt19937;

/// Independent generators indexed by worker slot
///
/// # Example
/// ```
/// use cpuburn_core::rng::GeneratorBank;
///
/// let mut bank = GeneratorBank::seeded(2, &[0x123, 0x234, 0x345, 0x456]);
/// let a = bank.next_u32(0);
/// let b = bank.next_u32(1);
/// assert_eq!(a, b); // same key, separate state
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorBank {
    generators: Vec<Mt19937>,
}

impl GeneratorBank {
    /// Create `count` generators that seed lazily with the default seed
    pub fn unseeded(count: usize) -> Self {
        Self {
            generators: vec![Mt19937::unseeded(); count],
        }
    }

    /// Create `count` generators, each seeded with `key`
    pub fn seeded(count: usize, key: &[u32]) -> Self {
        let mut bank = Self::unseeded(count);
        for index in 0..count {
            bank.seed_with_array(index, key);
        }
        bank
    }

    /// Number of slots in the bank
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Reseed one slot from an array key
    ///
    /// # Panics
    /// Panics if `bank_index` is out of range.
    pub fn seed_with_array(&mut self, bank_index: usize, key: &[u32]) {
        self.generators[bank_index].seed_with_array(key);
    }

    /// Next value from one slot
    ///
    /// # Panics
    /// Panics if `bank_index` is out of range.
    pub fn next_u32(&mut self, bank_index: usize) -> u32 {
        self.generators[bank_index].next_u32()
    }

    /// Hand every generator over to its owner, in slot order
    pub fn into_generators(self) -> Vec<Mt19937> {
        self.generators
    }
}
