//! Keccak with the original (pre-FIPS 202) padding: no domain-separation
//! suffix before pad10*1.

use super::sponge::{self, Sponge, STATE_BITS};
use super::{check_output_len, Digest};
use crate::error::CryptoError;

/// Output lengths accepted by [`Keccak::new`].
pub const KECCAK_BIT_LENGTHS: [usize; 6] = [128, 224, 256, 288, 384, 512];

/// Keccak-N fixed-output hash.
#[derive(Clone, Debug)]
pub struct Keccak {
    sponge: Sponge,
    bit_length: usize,
}

impl Keccak {
    /// Create a Keccak instance with a `bit_length`-bit digest.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Configuration` unless `bit_length` is one of
    /// [`KECCAK_BIT_LENGTHS`].
    pub fn new(bit_length: usize) -> Result<Self, CryptoError> {
        if !KECCAK_BIT_LENGTHS.contains(&bit_length) {
            return Err(CryptoError::Configuration(format!(
                "unsupported Keccak bit length: {bit_length}"
            )));
        }
        Ok(Self::with_bit_length(bit_length))
    }

    // `bit_length` must be one of KECCAK_BIT_LENGTHS.
    const fn with_bit_length(bit_length: usize) -> Self {
        Self {
            sponge: Sponge::with_rate(STATE_BITS.wrapping_sub(bit_length.wrapping_mul(2))),
            bit_length,
        }
    }

    /// Keccak-224.
    #[must_use]
    pub const fn keccak_224() -> Self {
        Self::with_bit_length(224)
    }

    /// Keccak-256, the variant Ethereum uses.
    #[must_use]
    pub const fn keccak_256() -> Self {
        Self::with_bit_length(256)
    }

    /// Keccak-384.
    #[must_use]
    pub const fn keccak_384() -> Self {
        Self::with_bit_length(384)
    }

    /// Keccak-512.
    #[must_use]
    pub const fn keccak_512() -> Self {
        Self::with_bit_length(512)
    }
}

impl Digest for Keccak {
    fn algorithm_name(&self) -> String {
        format!("Keccak-{}", self.bit_length)
    }

    fn digest_length(&self) -> usize {
        self.bit_length / 8
    }

    fn block_size(&self) -> usize {
        self.sponge.rate_bytes()
    }

    fn reset(&mut self) {
        self.sponge.reset();
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.sponge.absorb(data)
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        let length = self.digest_length();
        check_output_len(out, length)?;
        sponge::finish_fixed(&mut self.sponge, None, &mut out[..length])?;
        Ok(length)
    }
}
