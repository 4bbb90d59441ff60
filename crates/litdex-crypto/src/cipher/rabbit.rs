//! Rabbit stream cipher (RFC 4503).
//!
//! Key, IV, and keystream use the little-endian word order of the eSTREAM
//! reference code. RFC 4503's appendix prints the same values as
//! big-endian integers, so its vectors appear byte-reversed.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::StreamCipher;
use crate::error::CryptoError;

/// Key length in bytes.
pub const KEY_LEN: usize = 16;

/// IV length in bytes.
pub const IV_LEN: usize = 8;

/// Keystream bytes produced per `next_state`.
const BLOCK_LEN: usize = 16;

const A: [u32; 8] = [
    0x4D34_D34D,
    0xD34D_34D3,
    0x34D3_4D34,
    0x4D34_D34D,
    0xD34D_34D3,
    0x34D3_4D34,
    0x4D34_D34D,
    0xD34D_34D3,
];

/// State words, counters, and counter carry.
#[derive(Clone, Default, Zeroize)]
struct State {
    x: [u32; 8],
    c: [u32; 8],
    carry: u32,
}

impl State {
    #[allow(clippy::cast_possible_truncation)]
    fn next_state(&mut self) {
        for (counter, &a) in self.c.iter_mut().zip(A.iter()) {
            let t = u64::from(*counter)
                .wrapping_add(u64::from(a))
                .wrapping_add(u64::from(self.carry));
            self.carry = (t >> 32) as u32;
            *counter = t as u32;
        }

        let mut g = [0u32; 8];
        for ((g, &x), &c) in g.iter_mut().zip(self.x.iter()).zip(self.c.iter()) {
            *g = g_func(x, c);
        }

        let x = &mut self.x;
        x[0] = g[0].wrapping_add(g[7].rotate_left(16)).wrapping_add(g[6].rotate_left(16));
        x[1] = g[1].wrapping_add(g[0].rotate_left(8)).wrapping_add(g[7]);
        x[2] = g[2].wrapping_add(g[1].rotate_left(16)).wrapping_add(g[0].rotate_left(16));
        x[3] = g[3].wrapping_add(g[2].rotate_left(8)).wrapping_add(g[1]);
        x[4] = g[4].wrapping_add(g[3].rotate_left(16)).wrapping_add(g[2].rotate_left(16));
        x[5] = g[5].wrapping_add(g[4].rotate_left(8)).wrapping_add(g[3]);
        x[6] = g[6].wrapping_add(g[5].rotate_left(16)).wrapping_add(g[4].rotate_left(16));
        x[7] = g[7].wrapping_add(g[6].rotate_left(8)).wrapping_add(g[5]);

        g.zeroize();
    }

    fn extract(&self, out: &mut [u8; BLOCK_LEN]) {
        let x = &self.x;
        let words = [
            x[0] ^ (x[5] >> 16) ^ (x[3] << 16),
            x[2] ^ (x[7] >> 16) ^ (x[5] << 16),
            x[4] ^ (x[1] >> 16) ^ (x[7] << 16),
            x[6] ^ (x[3] >> 16) ^ (x[1] << 16),
        ];
        for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }
}

/// Square the 32-bit sum and fold the 64-bit result.
#[allow(clippy::cast_possible_truncation)]
fn g_func(x: u32, c: u32) -> u32 {
    let a = u64::from(x.wrapping_add(c));
    let square = a.wrapping_mul(a);
    (square ^ (square >> 32)) as u32
}

fn load_le(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    u32::from_le_bytes(word)
}

/// Rabbit cipher instance.
///
/// `master` is the state after key setup; an IV re-derives `work` from it,
/// so one keyed instance can serve many IVs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rabbit {
    master: State,
    work: State,
    keystream: [u8; BLOCK_LEN],
    // Next unread keystream byte; BLOCK_LEN means the buffer is spent.
    position: usize,
    keyed: bool,
}

impl Rabbit {
    /// Key the cipher and optionally apply an IV.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyMaterial` for a key that is not 16
    /// bytes or an IV that is not 8 bytes.
    pub fn new(key: &[u8], iv: Option<&[u8]>) -> Result<Self, CryptoError> {
        let mut cipher = Self::default();
        cipher.set_key(key)?;
        if let Some(iv) = iv {
            cipher.set_iv(iv)?;
        }
        Ok(cipher)
    }

    /// Run key setup. Any previous IV and buffered keystream are discarded.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyMaterial` unless `key` is 16 bytes.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "Rabbit key must be {KEY_LEN} bytes, got {}",
                key.len()
            )));
        }

        let k0 = load_le(&key[0..4]);
        let k1 = load_le(&key[4..8]);
        let k2 = load_le(&key[8..12]);
        let k3 = load_le(&key[12..16]);

        let mut state = State {
            x: [
                k0,
                (k3 << 16) | (k2 >> 16),
                k1,
                (k0 << 16) | (k3 >> 16),
                k2,
                (k1 << 16) | (k0 >> 16),
                k3,
                (k2 << 16) | (k1 >> 16),
            ],
            c: [
                k2.rotate_left(16),
                (k0 & 0xFFFF_0000) | (k1 & 0xFFFF),
                k3.rotate_left(16),
                (k1 & 0xFFFF_0000) | (k2 & 0xFFFF),
                k0.rotate_left(16),
                (k2 & 0xFFFF_0000) | (k3 & 0xFFFF),
                k1.rotate_left(16),
                (k3 & 0xFFFF_0000) | (k0 & 0xFFFF),
            ],
            carry: 0,
        };

        for _ in 0..4 {
            state.next_state();
        }
        // c[i] ^= x[(i + 4) mod 8]
        let (low, high) = state.x.split_at(4);
        for (counter, &x) in state.c.iter_mut().zip(high.iter().chain(low.iter())) {
            *counter ^= x;
        }

        self.master = state.clone();
        self.work = state;
        discard_keystream(&mut self.keystream, &mut self.position);
        self.keyed = true;
        tracing::trace!("Rabbit key setup complete");
        Ok(())
    }

    /// Derive a fresh working state from the keyed master state and `iv`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidKeyMaterial` unless `iv` is 8 bytes
    /// - `CryptoError::ProtocolViolation` if no key has been set
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), CryptoError> {
        self.check_keyed()?;
        if iv.len() != IV_LEN {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "Rabbit IV must be {IV_LEN} bytes, got {}",
                iv.len()
            )));
        }

        let i0 = load_le(&iv[0..4]);
        let i2 = load_le(&iv[4..8]);
        let i1 = (i0 >> 16) | (i2 & 0xFFFF_0000);
        let i3 = (i2 << 16) | (i0 & 0x0000_FFFF);
        let mix = [i0, i1, i2, i3, i0, i1, i2, i3];

        let mut state = self.master.clone();
        for (counter, m) in state.c.iter_mut().zip(mix) {
            *counter ^= m;
        }
        for _ in 0..4 {
            state.next_state();
        }

        self.work = state;
        discard_keystream(&mut self.keystream, &mut self.position);
        Ok(())
    }

    /// Encrypt `plaintext` into a new buffer.
    ///
    /// # Errors
    ///
    /// `CryptoError::ProtocolViolation` if no key has been set.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = plaintext.to_vec();
        self.apply_keystream(&mut out)?;
        Ok(out)
    }

    /// Decrypt `ciphertext` into a new buffer.
    ///
    /// # Errors
    ///
    /// `CryptoError::ProtocolViolation` if no key has been set.
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.encrypt(ciphertext)
    }

    /// Write raw keystream into `out`.
    ///
    /// # Errors
    ///
    /// `CryptoError::ProtocolViolation` if no key has been set.
    pub fn keystream(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        out.fill(0);
        self.apply_keystream(out)
    }

    fn check_keyed(&self) -> Result<(), CryptoError> {
        if self.keyed {
            Ok(())
        } else {
            Err(CryptoError::ProtocolViolation(
                "Rabbit used before a key was set".into(),
            ))
        }
    }
}

/// Mark the buffered keystream as spent and wipe it.
fn discard_keystream(keystream: &mut [u8; BLOCK_LEN], position: &mut usize) {
    keystream.zeroize();
    *position = BLOCK_LEN;
}

impl Default for Rabbit {
    /// An unkeyed instance; `set_key` must be called before use.
    fn default() -> Self {
        Self {
            master: State::default(),
            work: State::default(),
            keystream: [0u8; BLOCK_LEN],
            position: BLOCK_LEN,
            keyed: false,
        }
    }
}

impl std::fmt::Debug for Rabbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rabbit")
            .field("keyed", &self.keyed)
            .finish_non_exhaustive()
    }
}

impl StreamCipher for Rabbit {
    fn algorithm_name(&self) -> String {
        "Rabbit".to_owned()
    }

    fn reset(&mut self) {
        self.zeroize();
        self.position = BLOCK_LEN;
    }

    fn apply_keystream(&mut self, data: &mut [u8]) -> Result<(), CryptoError> {
        self.check_keyed()?;
        for byte in data.iter_mut() {
            if self.position == BLOCK_LEN {
                self.work.next_state();
                self.work.extract(&mut self.keystream);
                self.position = 0;
            }
            *byte ^= self.keystream[self.position];
            self.position = self.position.wrapping_add(1);
        }
        Ok(())
    }
}
