#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Cross-module lifecycle tests: reuse after finalize/reset, MAC and KDF
//! layered on every hash, cipher and generator round trips.

mod cipher_roundtrip;
mod hash_lifecycle;
mod kdf_roundtrip;
mod otp_roundtrip;
