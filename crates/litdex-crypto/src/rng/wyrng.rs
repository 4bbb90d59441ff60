//! wyrand: a Weyl sequence folded through a 64x64->128 multiply.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{impl_rng_core, os_seed_u64, Generator};
use crate::error::CryptoError;

const WY_P0: u64 = 0xa076_1d64_78bd_642f;
const WY_P1: u64 = 0xe703_7ed1_a0b4_28db;

/// WyRng. Any seed is accepted; zero is a valid starting point.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    /// Start from `seed` as the raw state word.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Same as [`WyRng::new`]; any `u64`, zero included, is a valid state.
    #[must_use]
    pub const fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }

    /// Seed from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the OS entropy source fails.
    pub fn from_entropy() -> Result<Self, CryptoError> {
        Ok(Self::new(os_seed_u64()?))
    }
}

impl Generator for WyRng {
    fn algorithm_name(&self) -> String {
        "WyRng".to_owned()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(WY_P0);
        let product = u128::from(self.state ^ WY_P1).wrapping_mul(u128::from(self.state));
        ((product >> 64) as u64) ^ (product as u64)
    }

    fn reseed(&mut self) -> Result<(), CryptoError> {
        self.state = os_seed_u64()?;
        tracing::debug!(algorithm = "WyRng", "reseeded from OS entropy");
        Ok(())
    }
}

impl_rng_core!(WyRng);

impl fmt::Debug for WyRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WyRng").finish_non_exhaustive()
    }
}
