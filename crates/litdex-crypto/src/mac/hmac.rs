//! HMAC (RFC 2104) over any [`Digest`].

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hash::{check_output_len, Digest, HashAlgorithm};
use crate::memory::constant_time_eq;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Keyed HMAC context.
///
/// After [`Hmac::finalize`] the context is back in its keyed initial state
/// and can authenticate the next message under the same key.
pub struct Hmac<D: Digest> {
    digest: D,
    inner_pad: Zeroizing<Vec<u8>>,
    outer_pad: Zeroizing<Vec<u8>>,
}

impl<D: Digest> Hmac<D> {
    /// Create an HMAC context keyed with `key`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying digest while pre-hashing a
    /// long key.
    pub fn new(digest: D, key: &[u8]) -> Result<Self, CryptoError> {
        let mut hmac = Self::unkeyed(digest);
        hmac.set_key(key)?;
        Ok(hmac)
    }

    /// Context with empty pads; callers must `set_key` before use.
    pub(crate) fn unkeyed(digest: D) -> Self {
        Self {
            digest,
            inner_pad: Zeroizing::new(Vec::new()),
            outer_pad: Zeroizing::new(Vec::new()),
        }
    }

    /// Replace the key and discard any message absorbed so far.
    ///
    /// Keys longer than the block size are hashed first; shorter keys are
    /// zero-padded.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.digest.reset();
        let block_size = self.digest.block_size();

        let mut block = Zeroizing::new(vec![0u8; block_size]);
        if key.len() > block_size {
            tracing::trace!(
                algorithm = %self.digest.algorithm_name(),
                key_len = key.len(),
                block_size,
                "pre-hashing long HMAC key"
            );
            self.digest.update(key)?;
            self.digest.finalize(&mut block)?;
        } else {
            block[..key.len()].copy_from_slice(key);
        }

        self.inner_pad = Zeroizing::new(block.iter().map(|b| b ^ IPAD).collect());
        self.outer_pad = Zeroizing::new(block.iter().map(|b| b ^ OPAD).collect());

        self.digest.update(&self.inner_pad)
    }

    /// `"HMAC-"` followed by the underlying digest's name.
    #[must_use]
    pub fn algorithm_name(&self) -> String {
        format!("HMAC-{}", self.digest.algorithm_name())
    }

    /// Tag length in bytes (the digest length).
    #[must_use]
    pub fn mac_length(&self) -> usize {
        self.digest.digest_length()
    }

    /// Discard any absorbed message, keeping the key.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn reset(&mut self) -> Result<(), CryptoError> {
        self.digest.reset();
        self.digest.update(&self.inner_pad)
    }

    /// Absorb message bytes.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.digest.update(data)
    }

    /// Absorb one message byte.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn update_byte(&mut self, byte: u8) -> Result<(), CryptoError> {
        self.digest.update_byte(byte)
    }

    /// Write the tag to the front of `out` and return its length.
    ///
    /// # Errors
    ///
    /// `CryptoError::Length` if `out` is shorter than [`Hmac::mac_length`].
    pub fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        let length = self.mac_length();
        check_output_len(out, length)?;

        let mut inner = Zeroizing::new(vec![0u8; length]);
        self.digest.finalize(&mut inner)?;

        self.digest.update(&self.outer_pad)?;
        self.digest.update(&inner)?;
        self.digest.finalize(&mut out[..length])?;

        self.digest.update(&self.inner_pad)?;
        Ok(length)
    }

    /// Authenticate `data` and return an owned tag.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn compute(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut tag = vec![0u8; self.mac_length()];
        self.update(data)?;
        self.finalize(&mut tag)?;
        Ok(tag)
    }

    /// Recompute the tag over `data` and compare it to `tag` in constant
    /// time.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn verify(&mut self, data: &[u8], tag: &[u8]) -> Result<bool, CryptoError> {
        let expected = Zeroizing::new(self.compute(data)?);
        Ok(constant_time_eq(&expected, tag))
    }
}

impl<D: Digest> std::fmt::Debug for Hmac<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hmac")
            .field("algorithm", &self.algorithm_name())
            .finish_non_exhaustive()
    }
}

/// One-shot HMAC under a fixed-output hash.
///
/// # Errors
///
/// Errors from the underlying digest.
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Hmac::new(algorithm.hasher(), key)?.compute(data)
}
