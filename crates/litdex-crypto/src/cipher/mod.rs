//! Stream ciphers.

use crate::error::CryptoError;

pub mod rabbit;

pub use rabbit::Rabbit;

/// A keystream generator XORed over caller buffers.
///
/// Encryption and decryption are the same operation.
pub trait StreamCipher {
    /// Human-readable identifier.
    fn algorithm_name(&self) -> String;

    /// Wipe all key and state material. The instance must be re-keyed.
    fn reset(&mut self);

    /// XOR the next `data.len()` keystream bytes into `data`.
    ///
    /// # Errors
    ///
    /// `CryptoError::ProtocolViolation` if the cipher has not been keyed.
    fn apply_keystream(&mut self, data: &mut [u8]) -> Result<(), CryptoError>;
}
