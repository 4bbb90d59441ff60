//! Owned secret bytes and tag comparison.
//!
//! Derived keys (HKDF, PBKDF2) and OTP shared secrets travel as
//! [`SecretBuffer`]; MAC tags and OTP codes are compared with
//! [`constant_time_eq`].

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Compare two byte strings without branching on their contents.
///
/// Lengths are not secret (tag sizes and code widths are public
/// parameters), so a length mismatch returns early.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Heap-allocated secret, wiped when dropped.
///
/// Backed by [`SecretSlice<u8>`]; `Debug` and `Display` both render as
/// `SecretBuffer(***)`.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a new secret allocation.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Adopt `data` as the secret's backing storage.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: data.into() }
    }

    /// `len` bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// `CryptoError::Rng` if the entropy source fails.
    pub fn random(len: usize) -> Result<Self, CryptoError> {
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Rng(format!("OS entropy source failed: {e}")))?;
        Ok(Self::new(&bytes))
    }

    /// Borrow the secret bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// `true` for a zero-length secret.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for SecretBuffer {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
