//! HMAC-based key derivation.
//!
//! - [`Hkdf`] — extract-and-expand (RFC 5869), for high-entropy inputs
//! - [`pbkdf2`] — iterated password stretching (RFC 8018)

mod hkdf;
pub mod pbkdf2;

pub use hkdf::Hkdf;
pub use pbkdf2::{pbkdf2_hmac, Pbkdf2Params};
