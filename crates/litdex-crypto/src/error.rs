//! Cryptographic error types for `litdex-crypto`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// None of these are recoverable on the instance that raised them: callers
/// discard the instance (or `reset` it) and start over.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Unsupported bit length, security strength, or parameter set.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A state machine was driven out of order (absorb after squeeze,
    /// misaligned absorb, cipher used before keying).
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Requested or supplied length is not acceptable for the operation.
    #[error("invalid length: {0}")]
    Length(String),

    /// Invalid key material (wrong length, too short).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// TOTP/HOTP generation or validation error.
    #[error("OTP error: {0}")]
    Otp(String),

    /// The operating-system entropy source failed.
    #[error("random generator error: {0}")]
    Rng(String),
}
