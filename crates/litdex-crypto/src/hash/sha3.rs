//! SHA3-224/256/384/512 (FIPS 202).

use super::sponge::{self, Sponge, STATE_BITS};
use super::{check_output_len, Digest};
use crate::error::CryptoError;

/// Output lengths accepted by [`Sha3::new`].
pub const SHA3_BIT_LENGTHS: [usize; 4] = [224, 256, 384, 512];

/// `01` appended LSB-first before padding.
const SHA3_SUFFIX: (u8, u32) = (0x02, 2);

/// A SHA-3 fixed-output hash.
#[derive(Clone, Debug)]
pub struct Sha3 {
    sponge: Sponge,
    bit_length: usize,
}

impl Sha3 {
    /// Create a SHA3 instance with a `bit_length`-bit digest.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Configuration` unless `bit_length` is one of
    /// [`SHA3_BIT_LENGTHS`].
    pub fn new(bit_length: usize) -> Result<Self, CryptoError> {
        if !SHA3_BIT_LENGTHS.contains(&bit_length) {
            return Err(CryptoError::Configuration(format!(
                "unsupported SHA-3 bit length: {bit_length}"
            )));
        }
        Ok(Self::with_bit_length(bit_length))
    }

    const fn with_bit_length(bit_length: usize) -> Self {
        Self {
            sponge: Sponge::with_rate(STATE_BITS.wrapping_sub(bit_length.wrapping_mul(2))),
            bit_length,
        }
    }

    /// SHA3-224.
    #[must_use]
    pub const fn sha3_224() -> Self {
        Self::with_bit_length(224)
    }

    /// SHA3-256.
    #[must_use]
    pub const fn sha3_256() -> Self {
        Self::with_bit_length(256)
    }

    /// SHA3-384.
    #[must_use]
    pub const fn sha3_384() -> Self {
        Self::with_bit_length(384)
    }

    /// SHA3-512.
    #[must_use]
    pub const fn sha3_512() -> Self {
        Self::with_bit_length(512)
    }
}

impl Default for Sha3 {
    fn default() -> Self {
        Self::sha3_256()
    }
}

impl Digest for Sha3 {
    fn algorithm_name(&self) -> String {
        format!("SHA3-{}", self.bit_length)
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
        sponge::finish_fixed(&mut self.sponge, Some(SHA3_SUFFIX), &mut out[..length])?;
        Ok(length)
    }
}
