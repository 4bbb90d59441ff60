//! PBKDF2 with an HMAC pseudo-random function (RFC 8018 §5.2).
//!
//! This module provides:
//! - [`pbkdf2_hmac`] — generic derivation into a caller buffer
//! - [`derive`] — derivation from a serializable [`Pbkdf2Params`]

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hash::{Digest, HashAlgorithm};
use crate::mac::Hmac;
use crate::memory::SecretBuffer;

/// Default iteration count for [`Pbkdf2Params::default`].
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Default output length in bytes (256 bits).
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// PBKDF2 parameter set, suitable for storing next to a password hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2Params {
    /// Hash underlying the HMAC.
    pub algorithm: HashAlgorithm,
    /// Iteration count `c`.
    pub iterations: u32,
    /// Derived key length `dkLen` in bytes.
    pub output_len: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            iterations: DEFAULT_ITERATIONS,
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }
}

/// Fill `out` with PBKDF2-HMAC-`digest` of `password` and `salt`.
///
/// # Errors
///
/// - `CryptoError::Configuration` if `iterations` is zero
/// - `CryptoError::Length` if `out` is empty or longer than
///   `(2^32 - 1) * HashLen`
pub fn pbkdf2_hmac<D: Digest>(
    digest: D,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), CryptoError> {
    if iterations == 0 {
        return Err(CryptoError::Configuration(
            "PBKDF2 iteration count must be at least 1".into(),
        ));
    }
    if out.is_empty() {
        return Err(CryptoError::Length(
            "PBKDF2 output length must be at least 1 byte".into(),
        ));
    }

    let mut prf = Hmac::new(digest, password)?;
    let hash_len = prf.mac_length();
    let max_len = hash_len.saturating_mul(u32::MAX as usize);
    if out.len() > max_len {
        return Err(CryptoError::Length(format!(
            "PBKDF2 output of {} bytes exceeds the {max_len}-byte limit",
            out.len()
        )));
    }

    tracing::debug!(
        algorithm = %prf.algorithm_name(),
        iterations,
        output_len = out.len(),
        "PBKDF2 derive"
    );

    let mut u = Zeroizing::new(vec![0u8; hash_len]);
    let mut t = Zeroizing::new(vec![0u8; hash_len]);
    for (block_index, chunk) in (1u32..).zip(out.chunks_mut(hash_len)) {
        // U_1 = PRF(P, S || INT(i))
        prf.update(salt)?;
        prf.update(&block_index.to_be_bytes())?;
        prf.finalize(&mut u)?;
        t.copy_from_slice(&u);

        // U_j = PRF(P, U_{j-1})
        for _ in 1..iterations {
            prf.update(&u)?;
            prf.finalize(&mut u)?;
            for (acc, byte) in t.iter_mut().zip(u.iter()) {
                *acc ^= byte;
            }
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
    }
    Ok(())
}

/// Derive `params.output_len` bytes from `password` and `salt`.
///
/// # Errors
///
/// Same as [`pbkdf2_hmac`].
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &Pbkdf2Params,
) -> Result<SecretBuffer, CryptoError> {
    let mut output = Zeroizing::new(vec![0u8; params.output_len]);
    pbkdf2_hmac(
        params.algorithm.hasher(),
        password,
        salt,
        params.iterations,
        &mut output,
    )?;
    Ok(SecretBuffer::new(&output))
}

/// `"PBKDF2-HMAC-"` followed by the hash name.
#[must_use]
pub fn algorithm_name(algorithm: HashAlgorithm) -> String {
    format!("PBKDF2-HMAC-{}", algorithm.hasher().algorithm_name())
}
