//! xoroshiro128 family (Blackman & Vigna): two words of state.
//!
//! The three scramblers share the linear engine and differ in output
//! function. `+` and `**` use rotation set (24, 16, 37); `++` uses
//! (49, 21, 28) and has its own jump polynomial.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_nonzero_state, expand_seed, impl_rng_core, os_seed_words, Generator};
use crate::error::CryptoError;

type Rotations = (u32, u32, u32);

const ROT_PLUS: Rotations = (24, 16, 37);
const ROT_PLUS_PLUS: Rotations = (49, 21, 28);

const JUMP_PLUS: [u64; 2] = [0xdf90_0294_d8f5_54a5, 0x1708_65df_4b32_01fc];
const JUMP_PLUS_PLUS: [u64; 2] = [0x2bd7_a6a6_e99c_2ddc, 0x0992_ccaf_6a6f_ca05];

fn advance(s: &mut [u64; 2], (a, b, c): Rotations) {
    let s0 = s[0];
    let s1 = s[1] ^ s0;
    s[0] = s0.rotate_left(a) ^ s1 ^ s1.wrapping_shl(b);
    s[1] = s1.rotate_left(c);
}

/// Advance `s` by 2^64 steps.
fn jump(s: &mut [u64; 2], poly: &[u64; 2], rot: Rotations) {
    let mut acc = [0u64; 2];
    for &word in poly {
        for bit in 0..64u32 {
            if word.wrapping_shr(bit) & 1 == 1 {
                acc[0] ^= s[0];
                acc[1] ^= s[1];
            }
            advance(s, rot);
        }
    }
    *s = acc;
}

macro_rules! xoroshiro128 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $rot:expr, $poly:expr,
        |$s0:ident, $s1:ident| $output:expr
    ) => {
        $(#[$doc])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            s: [u64; 2],
        }

        impl $name {
            /// # Errors
            ///
            /// Returns `CryptoError::Configuration` if both words are zero.
            pub fn new(state: [u64; 2]) -> Result<Self, CryptoError> {
                check_nonzero_state(&state, $label)?;
                Ok(Self { s: state })
            }

            /// Expand `seed` into a full state with SplitMix64.
            #[must_use]
            pub fn seed_from_u64(seed: u64) -> Self {
                let mut s = expand_seed::<2>(seed);
                if s == [0, 0] {
                    s[0] = 1;
                }
                Self { s }
            }

            /// # Errors
            ///
            /// Returns `CryptoError::Rng` if the OS entropy source fails.
            pub fn from_entropy() -> Result<Self, CryptoError> {
                Ok(Self { s: os_seed_words::<2>()? })
            }

            /// Skip ahead 2^64 outputs. Use to hand out 2^64
            /// non-overlapping subsequences from one seed.
            pub fn jump(&mut self) {
                jump(&mut self.s, &$poly, $rot);
            }
        }

        impl Generator for $name {
            fn algorithm_name(&self) -> String {
                $label.to_owned()
            }

            fn next_u64(&mut self) -> u64 {
                let [$s0, $s1] = self.s;
                let out = $output;
                advance(&mut self.s, $rot);
                out
            }

            fn reseed(&mut self) -> Result<(), CryptoError> {
                self.s = os_seed_words::<2>()?;
                tracing::debug!(algorithm = $label, "reseeded from OS entropy");
                Ok(())
            }
        }

        impl_rng_core!($name);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

xoroshiro128!(
    /// xoroshiro128+. Fastest; the low bits are weak, so prefer the high
    /// bits for floats.
    Xoroshiro128Plus, "Xoroshiro128+", ROT_PLUS, JUMP_PLUS,
    |s0, s1| s0.wrapping_add(s1)
);

xoroshiro128!(
    /// xoroshiro128++.
    Xoroshiro128PlusPlus, "Xoroshiro128++", ROT_PLUS_PLUS, JUMP_PLUS_PLUS,
    |s0, s1| s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0)
);

xoroshiro128!(
    /// xoroshiro128**.
    Xoroshiro128StarStar, "Xoroshiro128**", ROT_PLUS, JUMP_PLUS,
    |s0, _s1| s0.wrapping_mul(5).rotate_left(7).wrapping_mul(9)
);
