//! SHA-512 (FIPS 180-4).
//!
//! The message length is tracked as a 128-bit quantity split across two
//! counters: `byte_count1` holds bytes modulo 2^61 and `byte_count2` the
//! overflow, so `byte_count1 << 3` never loses bits.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_output_len, Digest};
use crate::error::CryptoError;

const DIGEST_LENGTH: usize = 64;
const BLOCK_SIZE: usize = 128;

const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

const K: [u64; 80] = [
    0x428a_2f98_d728_ae22, 0x7137_4491_23ef_65cd, 0xb5c0_fbcf_ec4d_3b2f, 0xe9b5_dba5_8189_dbbc,
    0x3956_c25b_f348_b538, 0x59f1_11f1_b605_d019, 0x923f_82a4_af19_4f9b, 0xab1c_5ed5_da6d_8118,
    0xd807_aa98_a303_0242, 0x1283_5b01_4570_6fbe, 0x2431_85be_4ee4_b28c, 0x550c_7dc3_d5ff_b4e2,
    0x72be_5d74_f27b_896f, 0x80de_b1fe_3b16_96b1, 0x9bdc_06a7_25c7_1235, 0xc19b_f174_cf69_2694,
    0xe49b_69c1_9ef1_4ad2, 0xefbe_4786_384f_25e3, 0x0fc1_9dc6_8b8c_d5b5, 0x240c_a1cc_77ac_9c65,
    0x2de9_2c6f_592b_0275, 0x4a74_84aa_6ea6_e483, 0x5cb0_a9dc_bd41_fbd4, 0x76f9_88da_8311_53b5,
    0x983e_5152_ee66_dfab, 0xa831_c66d_2db4_3210, 0xb003_27c8_98fb_213f, 0xbf59_7fc7_beef_0ee4,
    0xc6e0_0bf3_3da8_8fc2, 0xd5a7_9147_930a_a725, 0x06ca_6351_e003_826f, 0x1429_2967_0a0e_6e70,
    0x27b7_0a85_46d2_2ffc, 0x2e1b_2138_5c26_c926, 0x4d2c_6dfc_5ac4_2aed, 0x5338_0d13_9d95_b3df,
    0x650a_7354_8baf_63de, 0x766a_0abb_3c77_b2a8, 0x81c2_c92e_47ed_aee6, 0x9272_2c85_1482_353b,
    0xa2bf_e8a1_4cf1_0364, 0xa81a_664b_bc42_3001, 0xc24b_8b70_d0f8_9791, 0xc76c_51a3_0654_be30,
    0xd192_e819_d6ef_5218, 0xd699_0624_5565_a910, 0xf40e_3585_5771_202a, 0x106a_a070_32bb_d1b8,
    0x19a4_c116_b8d2_d0c8, 0x1e37_6c08_5141_ab53, 0x2748_774c_df8e_eb99, 0x34b0_bcb5_e19b_48a8,
    0x391c_0cb3_c5c9_5a63, 0x4ed8_aa4a_e341_8acb, 0x5b9c_ca4f_7763_e373, 0x682e_6ff3_d6b2_b8a3,
    0x748f_82ee_5def_b2fc, 0x78a5_636f_4317_2f60, 0x84c8_7814_a1f0_ab72, 0x8cc7_0208_1a64_39ec,
    0x90be_fffa_2363_1e28, 0xa450_6ceb_de82_bde9, 0xbef9_a3f7_b2c6_7915, 0xc671_78f2_e372_532b,
    0xca27_3ece_ea26_619c, 0xd186_b8c7_21c0_c207, 0xeada_7dd6_cde0_eb1e, 0xf57d_4f7f_ee6e_d178,
    0x06f0_67aa_7217_6fba, 0x0a63_7dc5_a2c8_98a6, 0x113f_9804_bef9_0dae, 0x1b71_0b35_131c_471b,
    0x28db_77f5_2304_7d84, 0x32ca_ab7b_40c7_2493, 0x3c9e_be0a_15c9_bebc, 0x431d_67c4_9c10_0d4c,
    0x4cc5_d4be_cb3e_42b6, 0x597f_299c_fc65_7e2a, 0x5fcb_6fab_3ad6_faec, 0x6c44_198c_4a47_5817,
];

const COUNT1_MASK: u64 = 0x1fff_ffff_ffff_ffff;

/// SHA-512 streaming hasher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha512 {
    h: [u64; 8],
    word_buf: [u8; 8],
    word_buf_off: usize,
    w: [u64; 80],
    w_off: usize,
    byte_count1: u64,
    byte_count2: u64,
}

impl Sha512 {
    /// A fresh SHA-512 instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            h: IV,
            word_buf: [0u8; 8],
            word_buf_off: 0,
            w: [0u64; 80],
            w_off: 0,
            byte_count1: 0,
            byte_count2: 0,
        }
    }

    fn push_byte(&mut self, byte: u8) {
        self.word_buf[self.word_buf_off] = byte;
        self.word_buf_off = self.word_buf_off.wrapping_add(1);
        if self.word_buf_off == 8 {
            self.process_word(u64::from_be_bytes(self.word_buf));
            self.word_buf_off = 0;
        }
        self.byte_count1 = self.byte_count1.wrapping_add(1);
    }

    fn process_word(&mut self, word: u64) {
        self.w[self.w_off] = word;
        self.w_off = self.w_off.wrapping_add(1);
        if self.w_off == 16 {
            self.process_block();
        }
    }

    /// Move the high bits of `byte_count1` into `byte_count2`.
    fn adjust_byte_counts(&mut self) {
        if self.byte_count1 > COUNT1_MASK {
            self.byte_count2 = self.byte_count2.wrapping_add(self.byte_count1 >> 61);
            self.byte_count1 &= COUNT1_MASK;
        }
    }

    fn process_length(&mut self, low: u64, high: u64) {
        if self.w_off > 14 {
            self.process_block();
        }
        self.w[14] = high;
        self.w[15] = low;
    }

    // Schedule indices stay within the fixed 80-entry array.
    #[allow(clippy::arithmetic_side_effects)]
    fn process_block(&mut self) {
        self.adjust_byte_counts();

        for t in 16..80 {
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

const fn ch(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (!x & z)
}

const fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

const fn big_sigma0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

const fn big_sigma1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

const fn small_sigma0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

const fn small_sigma1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha512 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha512").finish_non_exhaustive()
    }
}

impl Digest for Sha512 {
    fn algorithm_name(&self) -> String {
        "SHA2-512".to_owned()
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

        let mut words = rest.chunks_exact(8);
        for word in &mut words {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(word);
            self.process_word(u64::from_be_bytes(bytes));
            self.byte_count1 = self.byte_count1.wrapping_add(8);
        }

        for &byte in words.remainder() {
            self.push_byte(byte);
        }
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CryptoError> {
        check_output_len(out, DIGEST_LENGTH)?;

        self.adjust_byte_counts();
        let low = self.byte_count1 << 3;
        let high = self.byte_count2;

        self.push_byte(0x80);
        while self.word_buf_off != 0 {
            self.push_byte(0);
        }
        self.process_length(low, high);
        self.process_block();

        for (chunk, h) in out[..DIGEST_LENGTH].chunks_exact_mut(8).zip(self.h) {
            chunk.copy_from_slice(&h.to_be_bytes());
        }

        self.reset();
        Ok(DIGEST_LENGTH)
    }
}
