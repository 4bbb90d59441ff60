//! Pseudo-random generators behind one interface.
//!
//! This module provides:
//! - [`Generator`] — the common surface (`next_u64`, floats, bytes, reseed)
//! - [`SplitMix64`] and [`WyRng`] — single-word generators
//! - the xoroshiro128 and xoshiro256 families, with `jump()`
//! - [`OsGenerator`] — the operating-system CSPRNG
//!
//! Only [`OsGenerator`] is suitable for keys and nonces. Every generator
//! also implements [`rand::RngCore`], so `rand`'s distributions can drive
//! them.

use rand::rngs::OsRng;

use crate::error::CryptoError;

mod os;
mod splitmix;
mod wyrng;
mod xoroshiro;
mod xoshiro;

pub use os::OsGenerator;
pub use splitmix::SplitMix64;
pub use wyrng::WyRng;
pub use xoroshiro::{Xoroshiro128Plus, Xoroshiro128PlusPlus, Xoroshiro128StarStar};
pub use xoshiro::{Xoshiro256Plus, Xoshiro256PlusPlus, Xoshiro256StarStar};

/// 2^-53, the spacing of `f64` values in `[0, 1)` built from 53 bits.
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Common surface of every generator.
pub trait Generator {
    /// Human-readable identifier.
    fn algorithm_name(&self) -> String;

    /// Next 64 random bits.
    fn next_u64(&mut self) -> u64;

    /// Next 32 random bits, taken from the high half of [`Generator::next_u64`].
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// A fair coin flip from the top bit.
    fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Uniform `f64` in `[0, 1)` with 53 bits of precision.
    #[allow(clippy::cast_precision_loss)]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * F64_UNIT
    }

    /// Fill `dest` with little-endian 64-bit outputs. A trailing partial
    /// word uses its low bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    /// `len` random bytes.
    fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.fill_bytes(&mut out);
        out
    }

    /// Replace the state with fresh entropy from the OS.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the OS entropy source fails.
    fn reseed(&mut self) -> Result<(), CryptoError>;
}

/// Draw a `u64` seed word from the OS CSPRNG.
pub(crate) fn os_seed_u64() -> Result<u64, CryptoError> {
    let mut bytes = [0u8; 8];
    rand::RngCore::try_fill_bytes(&mut OsRng, &mut bytes)
        .map_err(|e| CryptoError::Rng(format!("CSPRNG fill failed: {e}")))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Draw a non-zero `N`-word state from the OS CSPRNG.
pub(crate) fn os_seed_words<const N: usize>() -> Result<[u64; N], CryptoError> {
    loop {
        let mut words = [0u64; N];
        for word in &mut words {
            *word = os_seed_u64()?;
        }
        if words.iter().any(|&w| w != 0) {
            return Ok(words);
        }
    }
}

/// Expand one `u64` into `N` state words with [`SplitMix64`].
pub(crate) fn expand_seed<const N: usize>(seed: u64) -> [u64; N] {
    let mut mixer = SplitMix64::new(seed);
    let mut words = [0u64; N];
    for word in &mut words {
        *word = Generator::next_u64(&mut mixer);
    }
    words
}

/// Reject the all-zero state, a fixed point of the xor-shift family.
pub(crate) fn check_nonzero_state(words: &[u64], algorithm: &str) -> Result<(), CryptoError> {
    if words.iter().all(|&w| w == 0) {
        return Err(CryptoError::Configuration(format!(
            "{algorithm} state must not be all zero"
        )));
    }
    Ok(())
}

/// Forward `rand::RngCore` to [`Generator`].
macro_rules! impl_rng_core {
    ($($ty:ty),+ $(,)?) => {$(
        impl rand::RngCore for $ty {
            fn next_u32(&mut self) -> u32 {
                $crate::rng::Generator::next_u32(self)
            }

            fn next_u64(&mut self) -> u64 {
                $crate::rng::Generator::next_u64(self)
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                $crate::rng::Generator::fill_bytes(self, dest);
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                $crate::rng::Generator::fill_bytes(self, dest);
                Ok(())
            }
        }
    )+};
}

pub(crate) use impl_rng_core;
