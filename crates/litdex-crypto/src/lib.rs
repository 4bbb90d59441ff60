//! `litdex-crypto` — hash, MAC, KDF, OTP, stream cipher and generator primitives.
//!
//! Pure computation: no network, no async, no file I/O. Every instance owns
//! its state exclusively and is reusable through finalize/reset cycles.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod hash;

pub mod mac;

pub mod kdf;

pub mod otp;

pub mod cipher;

pub mod rng;

pub use cipher::{Rabbit, StreamCipher};
pub use error::CryptoError;
pub use hash::{Digest, HashAlgorithm, Keccak, Sha1, Sha256, Sha3, Sha512, Shake};
pub use kdf::{pbkdf2_hmac, Hkdf, Pbkdf2Params};
pub use mac::{hmac, Hmac};
pub use memory::{constant_time_eq, SecretBuffer};
pub use otp::{
    generate_hotp, generate_totp, validate_totp, Hotp, OtpAlgorithm, OtpDigits, SkewWindow,
    TotpConfig,
};
pub use rng::{
    Generator, OsGenerator, SplitMix64, WyRng, Xoroshiro128Plus, Xoroshiro128PlusPlus,
    Xoroshiro128StarStar, Xoshiro256Plus, Xoshiro256PlusPlus, Xoshiro256StarStar,
};
