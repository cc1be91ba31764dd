//! MT19937 Mersenne Twister
//!
//! 32-bit Mersenne Twister (Matsumoto & Nishimura, 1997/2002) with the
//! `init_by_array` key schedule. Output is bit-exact with the reference
//! `mt19937ar` distribution, so published test vectors apply directly.
//!
//! # Lifecycle
//!
//! A generator starts unseeded. It is seeded once, either explicitly with
//! [`Mt19937::seed_with_array`] / [`Mt19937::seed`] or lazily with
//! [`DEFAULT_SEED`] on the first call to [`Mt19937::next_u32`]. After that the
//! 624-word state vector is refilled in place every 624 outputs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of 32-bit words in the state vector
pub const STATE_WORDS: usize = 624;

/// Tap distance of the twist recurrence
const TAP: usize = 397;

const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// `MAG01[x] = x * MATRIX_A` for x in {0, 1}
const MAG01: [u32; 2] = [0, MATRIX_A];

/// Index value meaning "state vector never initialized"
const UNSEEDED: usize = STATE_WORDS + 1;

/// Seed used when `next_u32` is called on an unseeded generator
pub const DEFAULT_SEED: u32 = 5489;

/// Scalar seed applied before mixing in an array key
const ARRAY_BASE_SEED: u32 = 19_650_218;

/// Key every worker is seeded with unless the operator supplies one
pub const DEFAULT_KEY: [u32; 4] = [0x123, 0x234, 0x345, 0x456];

/// Errors restoring a generator from a snapshot
#[derive(Debug, Error, PartialEq)]
pub enum RngError {
    #[error("State vector must hold {expected} words, got {actual}")]
    StateLength { expected: usize, actual: usize },

    #[error("State index {index} out of range (max {max})")]
    Index { index: usize, max: usize },
}

/// Serializable copy of a generator's full state
///
/// Restoring a snapshot with [`Mt19937::from_snapshot`] continues the stream
/// exactly where it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    /// The 624-word state vector
    pub state: Vec<u32>,
    /// Next word to emit (624 = refill pending, 625 = unseeded)
    pub index: usize,
}

/// Mersenne Twister generator state
///
/// # Example
/// ```
/// use cpuburn_core::Mt19937;
///
/// let mut rng = Mt19937::from_key(&[0x123, 0x234, 0x345, 0x456]);
/// assert_eq!(rng.next_u32(), 1067595299);
/// assert_eq!(rng.next_u32(), 955945823);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mt19937 {
    /// State vector
    mt: [u32; STATE_WORDS],
    /// Next word to emit
    index: usize,
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::unseeded()
    }
}

impl Mt19937 {
    /// Create a generator that will seed itself with [`DEFAULT_SEED`] on first use
    ///
    /// # Example
    /// ```
    /// use cpuburn_core::Mt19937;
    ///
    /// let mut rng = Mt19937::unseeded();
    /// assert!(!rng.is_seeded());
    /// assert_eq!(rng.next_u32(), 3499211612);
    /// assert!(rng.is_seeded());
    /// ```
    pub fn unseeded() -> Self {
        Self {
            mt: [0; STATE_WORDS],
            index: UNSEEDED,
        }
    }

    /// Create a generator seeded with a scalar seed
    pub fn new(seed: u32) -> Self {
        let mut rng = Self::unseeded();
        rng.seed(seed);
        rng
    }

    /// Create a generator seeded from an array key
    pub fn from_key(key: &[u32]) -> Self {
        let mut rng = Self::unseeded();
        rng.seed_with_array(key);
        rng
    }

    /// Whether the state vector has been initialized
    pub fn is_seeded(&self) -> bool {
        self.index != UNSEEDED
    }

    /// Initialize the state vector from a scalar seed
    ///
    /// Leaves the generator at the refill boundary, so the next call to
    /// [`next_u32`](Self::next_u32) twists the whole vector first.
    pub fn seed(&mut self, seed: u32) {
        self.mt[0] = seed;
        for i in 1..STATE_WORDS {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = STATE_WORDS;
    }

    /// Initialize the state vector from an arbitrary-length key
    ///
    /// An empty key behaves like the single-word key `[0]`.
    ///
    /// # Example
    /// ```
    /// use cpuburn_core::Mt19937;
    ///
    /// let mut a = Mt19937::unseeded();
    /// a.seed_with_array(&[1, 2, 3]);
    /// let mut b = Mt19937::from_key(&[1, 2, 3]);
    /// assert_eq!(a.next_u32(), b.next_u32());
    /// ```
    pub fn seed_with_array(&mut self, key: &[u32]) {
        let key: &[u32] = if key.is_empty() { &[0] } else { key };

        self.seed(ARRAY_BASE_SEED);

        let mut i = 1;
        let mut j = 0;
        for _ in 0..STATE_WORDS.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= STATE_WORDS {
                self.mt[0] = self.mt[STATE_WORDS - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..STATE_WORDS - 1 {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= STATE_WORDS {
                self.mt[0] = self.mt[STATE_WORDS - 1];
                i = 1;
            }
        }

        // MSB is 1; assures a non-zero initial vector
        self.mt[0] = UPPER_MASK;
        self.index = STATE_WORDS;
    }

    /// Generate the next tempered 32-bit value
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= STATE_WORDS {
            if self.index == UNSEEDED {
                self.seed(DEFAULT_SEED);
            }
            self.refill();
        }

        let mut y = self.mt[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Regenerate all 624 words of the state vector
    fn refill(&mut self) {
        let mt = &mut self.mt;

        for kk in 0..STATE_WORDS - TAP {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + TAP] ^ (y >> 1) ^ MAG01[(y & 1) as usize];
        }
        for kk in STATE_WORDS - TAP..STATE_WORDS - 1 {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + TAP - STATE_WORDS] ^ (y >> 1) ^ MAG01[(y & 1) as usize];
        }
        let y = (mt[STATE_WORDS - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
        mt[STATE_WORDS - 1] = mt[TAP - 1] ^ (y >> 1) ^ MAG01[(y & 1) as usize];

        self.index = 0;
    }

    /// Capture the current state for later replay
    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot {
            state: self.mt.to_vec(),
            index: self.index,
        }
    }

    /// Rebuild a generator from a snapshot
    ///
    /// # Errors
    /// Returns [`RngError`] if the vector is not 624 words long or the index
    /// is past the unseeded sentinel.
    ///
    /// # Example
    /// ```
    /// use cpuburn_core::Mt19937;
    ///
    /// let mut rng = Mt19937::new(42);
    /// rng.next_u32();
    /// let snapshot = rng.snapshot();
    ///
    /// let mut replay = Mt19937::from_snapshot(&snapshot).unwrap();
    /// assert_eq!(rng.next_u32(), replay.next_u32());
    /// ```
    pub fn from_snapshot(snapshot: &GeneratorSnapshot) -> Result<Self, RngError> {
        let mt: [u32; STATE_WORDS] =
            snapshot
                .state
                .as_slice()
                .try_into()
                .map_err(|_| RngError::StateLength {
                    expected: STATE_WORDS,
                    actual: snapshot.state.len(),
                })?;

        if snapshot.index > UNSEEDED {
            return Err(RngError::Index {
                index: snapshot.index,
                max: UNSEEDED,
            });
        }

        Ok(Self {
            mt,
            index: snapshot.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_leaves_refill_pending() {
        let rng = Mt19937::new(1);
        assert!(rng.is_seeded());
        assert_eq!(rng.index, STATE_WORDS);
    }

    #[test]
    fn test_array_seed_forces_msb() {
        let rng = Mt19937::from_key(&DEFAULT_KEY);
        assert_eq!(rng.mt[0], 0x8000_0000);
    }

    #[test]
    fn test_empty_key_matches_zero_key() {
        let mut empty = Mt19937::from_key(&[]);
        let mut zero = Mt19937::from_key(&[0]);
        for _ in 0..1000 {
            assert_eq!(empty.next_u32(), zero.next_u32());
        }
    }

    #[test]
    fn test_refill_every_624_words() {
        let mut rng = Mt19937::new(7);
        rng.next_u32();
        assert_eq!(rng.index, 1);
        for _ in 1..STATE_WORDS {
            rng.next_u32();
        }
        assert_eq!(rng.index, STATE_WORDS);
        rng.next_u32();
        assert_eq!(rng.index, 1);
    }

    #[test]
    fn test_snapshot_rejects_short_state() {
        let snapshot = GeneratorSnapshot {
            state: vec![0; 10],
            index: 0,
        };
        assert_eq!(
            Mt19937::from_snapshot(&snapshot),
            Err(RngError::StateLength {
                expected: STATE_WORDS,
                actual: 10
            })
        );
    }

    #[test]
    fn test_snapshot_rejects_bad_index() {
        let snapshot = GeneratorSnapshot {
            state: vec![0; STATE_WORDS],
            index: UNSEEDED + 1,
        };
        assert!(matches!(
            Mt19937::from_snapshot(&snapshot),
            Err(RngError::Index { .. })
        ));
    }

    #[test]
    fn test_unseeded_snapshot_stays_lazy() {
        let snapshot = Mt19937::unseeded().snapshot();
        let mut restored = Mt19937::from_snapshot(&snapshot).unwrap();
        assert!(!restored.is_seeded());
        assert_eq!(restored.next_u32(), Mt19937::new(DEFAULT_SEED).next_u32());
    }
}
