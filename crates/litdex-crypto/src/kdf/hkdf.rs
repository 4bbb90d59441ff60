//! HKDF extract-and-expand (RFC 5869).

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hash::{Digest, Sha1};
use crate::mac::Hmac;
use crate::memory::SecretBuffer;

/// Maximum number of expand blocks (the counter is a single byte).
const MAX_BLOCKS: usize = 255;

/// HKDF over the HMAC of `D`.
#[derive(Debug)]
pub struct Hkdf<D: Digest> {
    hmac: Hmac<D>,
}

impl<D: Digest> Hkdf<D> {
    /// Wrap `digest`. Its state is discarded.
    pub fn new(digest: D) -> Self {
        Self {
            hmac: Hmac::unkeyed(digest),
        }
    }

    /// `"HKDF-"` followed by the underlying digest's name.
    #[must_use]
    pub fn algorithm_name(&self) -> String {
        // Hmac's name is "HMAC-<digest>".
        let name = self.hmac.algorithm_name();
        format!("HKDF-{}", name.trim_start_matches("HMAC-"))
    }

    /// `HashLen`: the PRK length and the size of each expand block.
    #[must_use]
    pub fn hash_length(&self) -> usize {
        self.hmac.mac_length()
    }

    /// `PRK = HMAC(salt, ikm)`. An absent salt is `HashLen` zero bytes.
    ///
    /// # Errors
    ///
    /// Errors from the underlying digest.
    pub fn extract(
        &mut self,
        salt: Option<&[u8]>,
        ikm: &[u8],
    ) -> Result<SecretBuffer, CryptoError> {
        let zero_salt;
        let salt = match salt {
            Some(salt) => salt,
            None => {
                zero_salt = vec![0u8; self.hash_length()];
                &zero_salt
            }
        };

        self.hmac.set_key(salt)?;
        self.hmac.update(ikm)?;
        let mut prk = vec![0u8; self.hash_length()];
        self.hmac.finalize(&mut prk)?;
        tracing::debug!(algorithm = %self.algorithm_name(), "HKDF extract");
        Ok(SecretBuffer::from_vec(prk))
    }

    /// Expand `prk` into `len` bytes of output keying material bound to
    /// `info`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidKeyMaterial` if `prk` is shorter than
    ///   `HashLen`
    /// - `CryptoError::Length` if `len > 255 * HashLen`
    pub fn expand(
        &mut self,
        prk: &[u8],
        info: &[u8],
        len: usize,
    ) -> Result<SecretBuffer, CryptoError> {
        let hash_len = self.hash_length();
        if prk.len() < hash_len {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "PRK is {} bytes, HKDF requires at least {hash_len}",
                prk.len()
            )));
        }
        let max_len = hash_len.saturating_mul(MAX_BLOCKS);
        if len > max_len {
            return Err(CryptoError::Length(format!(
                "HKDF output of {len} bytes exceeds the {max_len}-byte limit"
            )));
        }

        let mut okm = vec![0u8; len];
        if len == 0 {
            return Ok(SecretBuffer::from_vec(okm));
        }

        self.hmac.set_key(prk)?;
        let mut block = Zeroizing::new(vec![0u8; hash_len]);
        let mut previous_len = 0usize;
        for (counter, chunk) in (1u8..=u8::MAX).zip(okm.chunks_mut(hash_len)) {
            self.hmac.update(&block[..previous_len])?;
            self.hmac.update(info)?;
            self.hmac.update_byte(counter)?;
            self.hmac.finalize(&mut block)?;
            chunk.copy_from_slice(&block[..chunk.len()]);
            previous_len = hash_len;
        }

        tracing::debug!(algorithm = %self.algorithm_name(), len, "HKDF expand");
        Ok(SecretBuffer::from_vec(okm))
    }

    /// Extract then expand in one call.
    ///
    /// # Errors
    ///
    /// Same as [`Hkdf::expand`].
    pub fn derive(
        &mut self,
        ikm: &[u8],
        salt: Option<&[u8]>,
        info: &[u8],
        len: usize,
    ) -> Result<SecretBuffer, CryptoError> {
        let prk = self.extract(salt, ikm)?;
        self.expand(prk.expose(), info, len)
    }
}

impl Default for Hkdf<Sha1> {
    fn default() -> Self {
        Self::new(Sha1::new())
    }
}
