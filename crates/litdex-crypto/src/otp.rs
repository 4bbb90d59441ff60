//! RFC 4226 HOTP and RFC 6238 TOTP.
//!
//! Codes are computed with this crate's own [`Hmac`] over SHA-1, SHA-256,
//! or SHA-512. Validation checks every candidate time step with a
//! constant-time comparison and never exits early on a match.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hash::HashAlgorithm;
use crate::mac::Hmac;
use crate::memory::{constant_time_eq, SecretBuffer};

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_PERIOD: u32 = 30;

/// Longest accepted TOTP period (ten minutes).
pub const MAX_PERIOD: u32 = 600;

/// Default number of steps accepted on either side of the current one.
pub const DEFAULT_SKEW: u32 = 1;

/// Key length drawn by [`Hotp::random`].
pub const RANDOM_KEY_LEN: usize = 32;

// ── Types ───────────────────────────────────────────────────────────

/// HMAC algorithm used for OTP generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (default for most authenticator apps).
    #[default]
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    /// The hash underlying the HMAC.
    #[must_use]
    pub const fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            Self::Sha1 => HashAlgorithm::Sha1,
            Self::Sha256 => HashAlgorithm::Sha256,
            Self::Sha512 => HashAlgorithm::Sha512,
        }
    }
}

/// Number of digits in an OTP code (6 to 10).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OtpDigits {
    /// 6-digit code (standard).
    #[default]
    Six,
    /// 7-digit code.
    Seven,
    /// 8-digit code.
    Eight,
    /// 9-digit code.
    Nine,
    /// 10-digit code.
    Ten,
}

impl OtpDigits {
    /// Return the numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
        }
    }

    /// Return the modulus value (10^digits) for truncation.
    #[must_use]
    const fn modulus(self) -> u64 {
        match self {
            Self::Six => 1_000_000,
            Self::Seven => 10_000_000,
            Self::Eight => 100_000_000,
            Self::Nine => 1_000_000_000,
            Self::Ten => 10_000_000_000,
        }
    }
}

impl TryFrom<u8> for OtpDigits {
    type Error = CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            8 => Ok(Self::Eight),
            9 => Ok(Self::Nine),
            10 => Ok(Self::Ten),
            other => Err(CryptoError::Otp(format!(
                "unsupported digit count {other}, expected 6 to 10"
            ))),
        }
    }
}

impl From<OtpDigits> for u8 {
    fn from(digits: OtpDigits) -> Self {
        digits.value()
    }
}

/// Accepted clock skew, in time steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkewWindow {
    /// Steps accepted before the current one.
    pub previous: u32,
    /// Steps accepted after the current one.
    pub future: u32,
}

impl Default for SkewWindow {
    fn default() -> Self {
        Self {
            previous: DEFAULT_SKEW,
            future: DEFAULT_SKEW,
        }
    }
}

// ── HOTP (RFC 4226) ────────────────────────────────────────────────

/// Generate an HOTP code per RFC 4226.
///
/// # Errors
/// Returns `CryptoError::Otp` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> Result<String, CryptoError> {
    generate_hotp_with_offset(secret, counter, digits, algorithm, None)
}

/// Generate an HOTP code with an optional fixed truncation offset
/// (RFC 4226 reference implementation, `truncationOffset`).
///
/// An offset outside `0..tag_len - 4` falls back to dynamic truncation.
///
/// # Errors
/// Returns `CryptoError::Otp` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp_with_offset(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
    truncation_offset: Option<usize>,
) -> Result<String, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::Otp("secret must not be empty".to_owned()));
    }

    // HMAC(K, C) where C is counter as 8-byte big-endian (RFC 4226 §5.2).
    let mut mac = Hmac::new(algorithm.hash_algorithm().hasher(), secret)?;
    let tag = Zeroizing::new(mac.compute(&counter.to_be_bytes())?);

    // Dynamic Truncation (RFC 4226 §5.3).
    let last = tag.len().wrapping_sub(1);
    let dynamic = usize::from(tag[last] & 0x0F);
    let offset = truncation_offset
        .filter(|&o| o < tag.len().saturating_sub(4))
        .unwrap_or(dynamic);

    let binary_code = u32::from_be_bytes([
        tag[offset] & 0x7F,
        tag[offset.wrapping_add(1)],
        tag[offset.wrapping_add(2)],
        tag[offset.wrapping_add(3)],
    ]);

    // modulus is a power of ten (never zero).
    #[allow(clippy::arithmetic_side_effects)]
    let code = u64::from(binary_code) % digits.modulus();
    let width = usize::from(digits.value());

    Ok(format!("{code:0>width$}"))
}

/// Counter-based generator owning its key.
#[derive(Debug)]
pub struct Hotp {
    key: SecretBuffer,
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
}

impl Hotp {
    /// Create a generator from an existing shared secret.
    ///
    /// # Errors
    /// Returns `CryptoError::Otp` if `key` is empty.
    pub fn new(
        key: &[u8],
        counter: u64,
        digits: OtpDigits,
        algorithm: OtpAlgorithm,
    ) -> Result<Self, CryptoError> {
        if key.is_empty() {
            return Err(CryptoError::Otp("secret must not be empty".to_owned()));
        }
        Ok(Self {
            key: SecretBuffer::new(key),
            counter,
            digits,
            algorithm,
        })
    }

    /// Create a generator with a fresh [`RANDOM_KEY_LEN`]-byte key from the
    /// OS CSPRNG and a zero counter.
    ///
    /// # Errors
    /// Returns `CryptoError::Rng` if the CSPRNG fails.
    pub fn random(digits: OtpDigits, algorithm: OtpAlgorithm) -> Result<Self, CryptoError> {
        Ok(Self {
            key: SecretBuffer::random(RANDOM_KEY_LEN)?,
            counter: 0,
            digits,
            algorithm,
        })
    }

    /// The shared secret, for provisioning the other party.
    #[must_use]
    pub const fn key(&self) -> &SecretBuffer {
        &self.key
    }

    /// Current counter value.
    #[must_use]
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Advance the counter, then return the code for the new value.
    ///
    /// # Errors
    /// Returns `CryptoError::Otp` if the counter is exhausted.
    pub fn next_code(&mut self) -> Result<String, CryptoError> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| CryptoError::Otp("HOTP counter exhausted".to_owned()))?;
        generate_hotp(self.key.expose(), self.counter, self.digits, self.algorithm)
    }

    /// Code for an explicit counter, leaving the internal counter alone.
    ///
    /// # Errors
    /// Propagates HMAC errors.
    pub fn code_at(&self, counter: u64) -> Result<String, CryptoError> {
        generate_hotp(self.key.expose(), counter, self.digits, self.algorithm)
    }

    /// Check `code` against the code for `counter` in constant time.
    ///
    /// # Errors
    /// Propagates HMAC errors.
    #[must_use = "validation result should be checked"]
    pub fn verify(&self, code: &str, counter: u64) -> Result<bool, CryptoError> {
        let expected = Zeroizing::new(self.code_at(counter)?);
        Ok(constant_time_eq(expected.as_bytes(), code.as_bytes()))
    }
}

// ── TOTP (RFC 6238) ────────────────────────────────────────────────

/// `T = floor(time / period)`.
///
/// # Errors
/// Returns `CryptoError::Configuration` if `period` is outside
/// `1..=MAX_PERIOD`.
pub fn time_step(time: u64, period: u32) -> Result<u64, CryptoError> {
    if period == 0 || period > MAX_PERIOD {
        return Err(CryptoError::Configuration(format!(
            "TOTP period must be between 1 and {MAX_PERIOD} seconds, got {period}"
        )));
    }
    // period is validated non-zero above.
    #[allow(clippy::arithmetic_side_effects)]
    let step = time / u64::from(period);
    Ok(step)
}

/// Generate a TOTP code per RFC 6238.
///
/// # Errors
/// Returns `CryptoError::Configuration` for an invalid period and
/// `CryptoError::Otp` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp(
    secret: &[u8],
    time: u64,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
) -> Result<String, CryptoError> {
    generate_hotp(secret, time_step(time, period)?, digits, algorithm)
}

/// Time steps to try, in order: `step`, then up to `previous` earlier
/// steps, then up to `future` later ones. Steps that would fall outside
/// `u64` are skipped.
pub fn validation_candidates(step: u64, previous: u32, future: u32) -> impl Iterator<Item = u64> {
    let earlier = (1..=u64::from(previous)).map_while(move |i| step.checked_sub(i));
    let later = (1..=u64::from(future)).map_while(move |i| step.checked_add(i));
    std::iter::once(step).chain(earlier).chain(later)
}

/// Validate a TOTP code against a custom skew window.
///
/// # Errors
/// Same as [`generate_totp`].
#[must_use = "validation result should be checked"]
pub fn validate_totp_window(
    secret: &[u8],
    time: u64,
    code: &str,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
    window: SkewWindow,
) -> Result<bool, CryptoError> {
    let step = time_step(time, period)?;

    let mut valid = false;
    let mut checked = 0u32;
    for candidate in validation_candidates(step, window.previous, window.future) {
        let expected = Zeroizing::new(generate_hotp(secret, candidate, digits, algorithm)?);
        if constant_time_eq(expected.as_bytes(), code.as_bytes()) {
            valid = true;
        }
        checked = checked.saturating_add(1);
    }

    tracing::debug!(step, checked, valid, "TOTP validation");
    Ok(valid)
}

/// Validate a TOTP code with the default ±1 step window (RFC 6238 §5.2).
///
/// # Errors
/// Same as [`generate_totp`].
#[must_use = "validation result should be checked"]
pub fn validate_totp(
    secret: &[u8],
    time: u64,
    code: &str,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
) -> Result<bool, CryptoError> {
    validate_totp_window(
        secret,
        time,
        code,
        digits,
        period,
        algorithm,
        SkewWindow::default(),
    )
}

/// Current Unix time in seconds.
///
/// # Errors
/// Returns `CryptoError::Otp` if the system clock is before 1970.
pub fn unix_time() -> Result<u64, CryptoError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| CryptoError::Otp(format!("system clock before Unix epoch: {e}")))
}

/// Persisted TOTP account parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpConfig {
    /// HMAC hash.
    pub algorithm: OtpAlgorithm,
    /// Code length.
    pub digits: OtpDigits,
    /// Step length in seconds.
    pub period: u32,
    /// Accepted clock skew.
    pub skew: SkewWindow,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            algorithm: OtpAlgorithm::Sha1,
            digits: OtpDigits::Six,
            period: DEFAULT_PERIOD,
            skew: SkewWindow::default(),
        }
    }
}

impl TotpConfig {
    /// Code for `secret` at Unix time `time`.
    ///
    /// # Errors
    /// Same as [`generate_totp`].
    pub fn generate(&self, secret: &[u8], time: u64) -> Result<String, CryptoError> {
        generate_totp(secret, time, self.digits, self.period, self.algorithm)
    }

    /// Code for `secret` at the current system time.
    ///
    /// # Errors
    /// Same as [`generate_totp`], plus clock errors from [`unix_time`].
    pub fn generate_now(&self, secret: &[u8]) -> Result<String, CryptoError> {
        self.generate(secret, unix_time()?)
    }

    /// Check `code` for `secret` at `time` within this config's skew.
    ///
    /// # Errors
    /// Same as [`generate_totp`].
    pub fn validate(&self, secret: &[u8], time: u64, code: &str) -> Result<bool, CryptoError> {
        validate_totp_window(
            secret,
            time,
            code,
            self.digits,
            self.period,
            self.algorithm,
            self.skew,
        )
    }
}

// ── Tests ───────────────────────────────────────────────────────────
