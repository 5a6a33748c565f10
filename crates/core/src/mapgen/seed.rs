//! Deterministic seed mixing and the pseudo-random stream threaded through generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::types::Biome;

/// The single random stream owned by one generation run.
///
/// Every carve, link and sampling decision draws from here, so a seed fully
/// determines the produced level.
#[derive(Clone)]
pub struct GenRng {
    inner: ChaCha8Rng,
}

impl GenRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform value in `min..=max`.
    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let offset = match ((max_value - min_value) as u64).checked_add(1) {
            Some(range_size) => self.next_u64() % range_size,
            None => self.next_u64(),
        };
        min_value + offset as usize
    }

    /// Uniform value in `min..=max`.
    pub fn range_i32(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let range_size = (i64::from(max_value) - i64::from(min_value)) as u64 + 1;
        (i64::from(min_value) + (self.next_u64() % range_size) as i64) as i32
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }

    /// Uniform value in `[low, high)`.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit_f32()
    }
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for one level of a run, independent per level index and biome.
pub fn derive_level_seed(run_seed: u64, level_index: u32, biome: Biome) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level_index).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mix_seed_stream(biome.code(), 0x51).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
