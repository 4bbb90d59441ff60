//! Generator facade over the OS entropy source.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::Generator;
use crate::error::CryptoError;

/// The operating-system CSPRNG. Stateless; `reseed` is a no-op.
///
/// `next_u64` and `fill_bytes` panic if the OS source fails. Use
/// [`OsGenerator::try_fill`] where that failure must be handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsGenerator;

impl OsGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fill `dest` from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Rng` if the OS entropy source fails.
    pub fn try_fill(dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Rng(format!("CSPRNG fill failed: {e}")))
    }
}

impl Generator for OsGenerator {
    fn algorithm_name(&self) -> String {
        "OsRng".to_owned()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }

    fn reseed(&mut self) -> Result<(), CryptoError> {
        Ok(())
    }
}

impl RngCore for OsGenerator {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for OsGenerator {}
