//! SplitMix64, a 64-bit counter passed through a mixing function.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{impl_rng_core, os_seed_u64, Generator};
use crate::error::CryptoError;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64. Every seed, including zero, is valid.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Same as [`SplitMix64::new`]; present for parity with the other generators.
    #[must_use]
    pub const fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }

    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the OS entropy source fails.
    pub fn from_entropy() -> Result<Self, CryptoError> {
        Ok(Self::new(os_seed_u64()?))
    }
}

impl Generator for SplitMix64 {
    fn algorithm_name(&self) -> String {
        "SplitMix64".to_owned()
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn reseed(&mut self) -> Result<(), CryptoError> {
        self.state = os_seed_u64()?;
        tracing::debug!(algorithm = "SplitMix64", "reseeded from OS entropy");
        Ok(())
    }
}

impl_rng_core!(SplitMix64);

impl fmt::Debug for SplitMix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitMix64").finish_non_exhaustive()
    }
}
