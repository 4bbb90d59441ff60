//! SHA-1 (FIPS 180-4). Kept for HOTP/TOTP and legacy interoperability.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_output_len, Digest};
use crate::error::CryptoError;

const DIGEST_LENGTH: usize = 20;
const BLOCK_SIZE: usize = 64;

const IV: [u32; 5] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

const Y1: u32 = 0x5A82_7999;
const Y2: u32 = 0x6ED9_EBA1;
const Y3: u32 = 0x8F1B_BCDC;
const Y4: u32 = 0xCA62_C1D6;

/// SHA-1 streaming hasher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha1 {
    h: [u32; 5],
    word_buf: [u8; 4],
    word_buf_off: usize,
    x: [u32; 80],
    x_off: usize,
    byte_count: u64,
}

impl Sha1 {
    /// A fresh SHA-1 instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            h: IV,
            word_buf: [0u8; 4],
            word_buf_off: 0,
            x: [0u32; 80],
            x_off: 0,
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
        self.x[self.x_off] = word;
        self.x_off = self.x_off.wrapping_add(1);
        if self.x_off == 16 {
            self.process_block();
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn process_length(&mut self, bit_length: u64) {
        if self.x_off > 14 {
            self.process_block();
        }
        self.x[14] = (bit_length >> 32) as u32;
        self.x[15] = bit_length as u32;
    }

    // Schedule indices stay within the fixed 80-entry array.
    #[allow(clippy::arithmetic_side_effects)]
    fn process_block(&mut self) {
        for t in 16..80 {
            self.x[t] =
                (self.x[t - 3] ^ self.x[t - 8] ^ self.x[t - 14] ^ self.x[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.h;
        for (t, &w) in self.x.iter().enumerate() {
            let (f, k) = match t / 20 {
                0 => ((b & c) | (!b & d), Y1),
                1 => (b ^ c ^ d, Y2),
                2 => ((b & c) | (b & d) | (c & d), Y3),
                _ => (b ^ c ^ d, Y4),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(w);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (h, v) in self.h.iter_mut().zip([a, b, c, d, e]) {
            *h = h.wrapping_add(v);
        }

        self.x_off = 0;
        self.x.zeroize();
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha1")
            .field("byte_count", &self.byte_count)
            .finish_non_exhaustive()
    }
}

impl Digest for Sha1 {
    fn algorithm_name(&self) -> String {
        "SHA-1".to_owned()
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

        // Fill the current partial word.
        while self.word_buf_off != 0 {
            let Some((&byte, tail)) = rest.split_first() else {
                return Ok(());
            };
            self.push_byte(byte);
            rest = tail;
        }

        // Whole words straight from the input.
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
