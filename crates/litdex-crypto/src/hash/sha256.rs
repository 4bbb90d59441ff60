//! SHA-256 (FIPS 180-4).

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_output_len, Digest};
use crate::error::CryptoError;

const DIGEST_LENGTH: usize = 32;
const BLOCK_SIZE: usize = 64;

const IV: [u32; 8] = [
    0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a, 0x510e_527f, 0x9b05_688c, 0x1f83_d9ab,
    0x5be0_cd19,
];

/// First 32 bits of the fractional parts of the cube roots of the first 64
/// primes.
const K: [u32; 64] = [
    0x428a_2f98, 0x7137_4491, 0xb5c0_fbcf, 0xe9b5_dba5, 0x3956_c25b, 0x59f1_11f1, 0x923f_82a4,
    0xab1c_5ed5, 0xd807_aa98, 0x1283_5b01, 0x2431_85be, 0x550c_7dc3, 0x72be_5d74, 0x80de_b1fe,
    0x9bdc_06a7, 0xc19b_f174, 0xe49b_69c1, 0xefbe_4786, 0x0fc1_9dc6, 0x240c_a1cc, 0x2de9_2c6f,
    0x4a74_84aa, 0x5cb0_a9dc, 0x76f9_88da, 0x983e_5152, 0xa831_c66d, 0xb003_27c8, 0xbf59_7fc7,
    0xc6e0_0bf3, 0xd5a7_9147, 0x06ca_6351, 0x1429_2967, 0x27b7_0a85, 0x2e1b_2138, 0x4d2c_6dfc,
    0x5338_0d13, 0x650a_7354, 0x766a_0abb, 0x81c2_c92e, 0x9272_2c85, 0xa2bf_e8a1, 0xa81a_664b,
    0xc24b_8b70, 0xc76c_51a3, 0xd192_e819, 0xd699_0624, 0xf40e_3585, 0x106a_a070, 0x19a4_c116,
    0x1e37_6c08, 0x2748_774c, 0x34b0_bcb5, 0x391c_0cb3, 0x4ed8_aa4a, 0x5b9c_ca4f, 0x682e_6ff3,
    0x748f_82ee, 0x78a5_636f, 0x84c8_7814, 0x8cc7_0208, 0x90be_fffa, 0xa450_6ceb, 0xbef9_a3f7,
    0xc671_78f2,
];

/// SHA-256 streaming hasher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha256 {
    h: [u32; 8],
    word_buf: [u8; 4],
    word_buf_off: usize,
    w: [u32; 64],
    w_off: usize,
    byte_count: u64,
}

impl Sha256 {
    /// A fresh SHA-256 instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            h: IV,
            word_buf: [0u8; 4],
            word_buf_off: 0,
            w: [0u32; 64],
            w_off: 0,
            byte_count: 0,
        }
    }

    fn push_byte(&mut self, byte: u8) {
        self.word_buf[self.word_buf_off] = byte;
        self.word_buf_off = self.word_buf_off.wrapping_add(1);
        if self.word_buf_off == 4 {
            self.process_word(u32::from_be_bytes(self.word_buf));
            self.word_buf_off = 0;
        }
        self.byte_count = self.byte_count.wrapping_add(1);
    }

    fn process_word(&mut self, word: u32) {
        self.w[self.w_off] = word;
        self.w_off = self.w_off.wrapping_add(1);
        if self.w_off == 16 {
            self.process_block();
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn process_length(&mut self, bit_length: u64) {
        if self.w_off > 14 {
            self.process_block();
        }
        self.w[14] = (bit_length >> 32) as u32;
        self.w[15] = bit_length as u32;
    }

    // Schedule indices stay within the fixed 64-entry array.
    #[allow(clippy::arithmetic_side_effects)]
    fn process_block(&mut self) {
        for t in 16..64 {
            self.w[t] = small_sigma1(self.w[t - 2])
                .wrapping_add(self.w[t - 7])
                .wrapping_add(small_sigma0(self.w[t - 15]))
                .wrapping_add(self.w[t - 16]);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.h;
        for (&k, &w) in K.iter().zip(self.w.iter()) {
            let t1 = h
                .wrapping_add(big_sigma1(e))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(k)
                .wrapping_add(w);
            let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        for (state, v) in self.h.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *state = state.wrapping_add(v);
        }

        self.w_off = 0;
        self.w.zeroize();
    }
}

const fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

const fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

const fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

const fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

const fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

const fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256")
            .field("byte_count", &self.byte_count)
            .finish_non_exhaustive()
    }
}

impl Digest for Sha256 {
    fn algorithm_name(&self) -> String {
        "SHA2-256".to_owned()
    }

    fn digest_length(&self) -> usize {
        DIGEST_LENGTH
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn reset(&mut self) {
        self.zeroize();
        self.h = IV;
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        let mut rest = data;

        while self.word_buf_off != 0 {
            let Some((&byte, tail)) = rest.split_first() else {
                return Ok(());
            };
            self.push_byte(byte);
            rest = tail;
        }

        let mut words = rest.chunks_exact(4);
        for word in &mut words {
            self.process_word(u32::from_be_bytes([word[0], word[1], word[2], word[3]]));
        }
        self.byte_count = self
            .byte_count
            .wrapping_add(rest.len().wrapping_sub(words.remainder().len()) as u64);

        for &byte in words.remainder() {
            self.push_byte(byte);
        }
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        check_output_len(out, DIGEST_LENGTH)?;

        let bit_length = self.byte_count.wrapping_shl(3);
        self.push_byte(0x80);
        while self.word_buf_off != 0 {
            self.push_byte(0);
        }
        self.process_length(bit_length);
        self.process_block();

        for (chunk, h) in out[..DIGEST_LENGTH].chunks_exact_mut(4).zip(self.h) {
            chunk.copy_from_slice(&h.to_be_bytes());
        }

        self.reset();
        Ok(DIGEST_LENGTH)
    }
}
