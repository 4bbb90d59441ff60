//! Hash functions behind a single streaming interface.
//!
//! Two constructions live here:
//! - the Keccak sponge ([`keccak_f`] + [`sponge`]) and its adapters
//!   [`Keccak`], [`Sha3`], and [`Shake`]
//! - the Merkle–Damgård family [`Sha1`], [`Sha256`], and [`Sha512`]
//!
//! Every type implements [`Digest`]: feed bytes with `update` in any
//! chunking, then `finalize` to get the digest. `finalize` always resets the
//! instance so it can hash the next, independent message.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

pub mod keccak_f;
pub mod sponge;

mod keccak;
mod sha1;
mod sha256;
mod sha3;
mod sha512;
mod shake;

pub use keccak::Keccak;
pub use sha1::Sha1;
pub use sha256::Sha256;
pub use sha3::Sha3;
pub use sha512::Sha512;
pub use shake::Shake;

/// Uniform streaming surface shared by every hash in the crate.
///
/// Consumed by [`crate::mac::Hmac`] and the KDFs, which only need the digest
/// length and the block size to size their pads.
pub trait Digest {
    /// Human-readable identifier, e.g. `"SHA3-256"`.
    fn algorithm_name(&self) -> String;

    /// Digest length in bytes.
    fn digest_length(&self) -> usize;

    /// Rate in bytes for sponge types, compression block size for
    /// Merkle–Damgård types.
    fn block_size(&self) -> usize;

    /// Return to the freshly-constructed state.
    fn reset(&mut self);

    /// Absorb `data`.
    ///
    /// # Errors
    ///
    /// Sponge types return `CryptoError::ProtocolViolation` if output has
    /// already been squeezed without an intervening reset.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Absorb a single byte.
    ///
    /// # Errors
    ///
    /// Same as [`Digest::update`].
    fn update_byte(&mut self, byte: u8) -> Result<(), CryptoError> {
        self.update(&[byte])
    }

    /// Write the digest to the front of `out`, reset, and return the number
    /// of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Length` if `out` is shorter than
    /// [`Digest::digest_length`].
    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError>;

    /// One-shot convenience: absorb `data` and return an owned digest.
    ///
    /// # Errors
    ///
    /// Same as [`Digest::update`].
    fn compute(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0u8; self.digest_length()];
        self.update(data)?;
        self.finalize(&mut out)?;
        Ok(out)
    }
}

impl<D: Digest + ?Sized> Digest for Box<D> {
    fn algorithm_name(&self) -> String {
        (**self).algorithm_name()
    }

    fn digest_length(&self) -> usize {
        (**self).digest_length()
    }

    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        (**self).update(data)
    }

    fn update_byte(&mut self, byte: u8) -> Result<(), CryptoError> {
        (**self).update_byte(byte)
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        (**self).finalize(out)
    }
}

/// Reject output buffers that cannot hold a full digest.
pub(crate) fn check_output_len(out: &[u8], digest_length: usize) -> Result<(), CryptoError> {
    if out.len() < digest_length {
        return Err(CryptoError::Length(format!(
            "output buffer too short: {} bytes (digest is {digest_length})",
            out.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Algorithm selector
// ---------------------------------------------------------------------------

/// Fixed-output hash selector, serializable for persisted parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    /// SHA-1 (legacy; still required by RFC 4226 HOTP).
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
    /// SHA3-224.
    #[serde(rename = "sha3-224")]
    Sha3_224,
    /// SHA3-256.
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// SHA3-384.
    #[serde(rename = "sha3-384")]
    Sha3_384,
    /// SHA3-512.
    #[serde(rename = "sha3-512")]
    Sha3_512,
    /// Keccak-224 (pre-NIST padding).
    Keccak224,
    /// Keccak-256 (pre-NIST padding).
    Keccak256,
    /// Keccak-384 (pre-NIST padding).
    Keccak384,
    /// Keccak-512 (pre-NIST padding).
    Keccak512,
}

impl HashAlgorithm {
    /// Every selectable algorithm, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Sha1,
        Self::Sha256,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Keccak224,
        Self::Keccak256,
        Self::Keccak384,
        Self::Keccak512,
    ];

    /// Digest length in bytes.
    #[must_use]
    pub const fn digest_length(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha3_224 | Self::Keccak224 => 28,
            Self::Sha256 | Self::Sha3_256 | Self::Keccak256 => 32,
            Self::Sha3_384 | Self::Keccak384 => 48,
            Self::Sha512 | Self::Sha3_512 | Self::Keccak512 => 64,
        }
    }

    /// Build a fresh hasher for this algorithm.
    #[must_use]
    pub fn hasher(self) -> Box<dyn Digest> {
        match self {
            Self::Sha1 => Box::new(Sha1::new()),
            Self::Sha256 => Box::new(Sha256::new()),
            Self::Sha512 => Box::new(Sha512::new()),
            Self::Sha3_224 => Box::new(Sha3::sha3_224()),
            Self::Sha3_256 => Box::new(Sha3::sha3_256()),
            Self::Sha3_384 => Box::new(Sha3::sha3_384()),
            Self::Sha3_512 => Box::new(Sha3::sha3_512()),
            Self::Keccak224 => Box::new(Keccak::keccak_224()),
            Self::Keccak256 => Box::new(Keccak::keccak_256()),
            Self::Keccak384 => Box::new(Keccak::keccak_384()),
            Self::Keccak512 => Box::new(Keccak::keccak_512()),
        }
    }

    /// One-shot digest of `data`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Digest::compute`].
    pub fn digest(self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.hasher().compute(data)
    }
}
