//! SHAKE128/SHAKE256 extendable-output functions (FIPS 202).
//!
//! Through [`Digest`] a SHAKE instance behaves like a fixed-output hash whose
//! digest is `strength / 8` bytes. [`Shake::finalize_xof`] and
//! [`Shake::squeeze`] give access to arbitrary-length output.

use super::sponge::{Sponge, STATE_BITS};
use super::Digest;
use crate::error::CryptoError;

/// Security strengths accepted by [`Shake::new`].
pub const SHAKE_STRENGTHS: [usize; 2] = [128, 256];

/// `1111` appended LSB-first before padding.
const SHAKE_SUFFIX: (u8, u32) = (0x0F, 4);

/// A SHAKE extendable-output function.
#[derive(Clone, Debug)]
pub struct Shake {
    sponge: Sponge,
    strength: usize,
}

impl Shake {
    /// Create a SHAKE instance with the given security strength.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Configuration` unless `strength` is 128 or 256.
    pub fn new(strength: usize) -> Result<Self, CryptoError> {
        if !SHAKE_STRENGTHS.contains(&strength) {
            return Err(CryptoError::Configuration(format!(
                "unsupported SHAKE strength: {strength}"
            )));
        }
        Ok(Self::with_strength(strength))
    }

    const fn with_strength(strength: usize) -> Self {
        Self {
            sponge: Sponge::with_rate(STATE_BITS.wrapping_sub(strength.wrapping_mul(2))),
            strength,
        }
    }

    /// SHAKE128.
    #[must_use]
    pub const fn shake128() -> Self {
        Self::with_strength(128)
    }

    /// SHAKE256.
    #[must_use]
    pub const fn shake256() -> Self {
        Self::with_strength(256)
    }

    /// Security strength in bits.
    #[must_use]
    pub const fn strength(&self) -> usize {
        self.strength
    }

    /// Fill all of `out` with output, then reset.
    ///
    /// If [`Shake::squeeze`] has already started the output stream, `out`
    /// receives the bytes that follow it.
    ///
    /// # Errors
    ///
    /// Propagates sponge errors from closing the input.
    pub fn finalize_xof(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        self.squeeze(out)?;
        self.sponge.reset();
        Ok(out.len())
    }

    /// Stream the next `out.len()` bytes of output without resetting.
    ///
    /// The first call closes the input. Later calls continue where the
    /// previous one stopped.
    ///
    /// # Errors
    ///
    /// Propagates `CryptoError::ProtocolViolation` from the sponge if the
    /// suffix cannot be absorbed.
    pub fn squeeze(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if !self.sponge.is_squeezing() {
            let (bits, count) = SHAKE_SUFFIX;
            self.sponge.absorb_bits(bits, count)?;
        }
        self.sponge.squeeze(out);
        Ok(())
    }

    /// One-shot `len`-byte output for `data`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::ProtocolViolation` if this instance is midway
    /// through a [`Shake::squeeze`] stream.
    pub fn compute_xof(&mut self, data: &[u8], len: usize) -> Result<Vec<u8>, CryptoError> {
        self.sponge.absorb(data)?;
        let mut out = vec![0u8; len];
        self.finalize_xof(&mut out)?;
        Ok(out)
    }
}

impl Digest for Shake {
    fn algorithm_name(&self) -> String {
        format!("SHAKE-{}", self.strength)
    }

    fn digest_length(&self) -> usize {
        self.strength / 8
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
        super::check_output_len(out, length)?;
        self.finalize_xof(&mut out[..length])
    }
}
