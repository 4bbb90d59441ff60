//! xoshiro256 family (Blackman & Vigna): four words of state.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_nonzero_state, expand_seed, impl_rng_core, os_seed_words, Generator};
use crate::error::CryptoError;

const JUMP: [u64; 4] = [
    0x180e_c6d3_3cfd_0aba,
    0xd5a6_1266_f0c9_392c,
    0xa958_2618_e03f_c9aa,
    0x39ab_dc45_29b1_661c,
];

fn advance(s: &mut [u64; 4]) {
    let t = s[1] << 17;
    s[2] ^= s[0];
    s[3] ^= s[1];
    s[1] ^= s[2];
    s[0] ^= s[3];
    s[2] ^= t;
    s[3] = s[3].rotate_left(45);
}

/// Advance `s` by 2^128 steps.
fn jump(s: &mut [u64; 4]) {
    let mut acc = [0u64; 4];
    for word in JUMP {
        for bit in 0..64u32 {
            if word.wrapping_shr(bit) & 1 == 1 {
                for (a, &x) in acc.iter_mut().zip(s.iter()) {
                    *a ^= x;
                }
            }
            advance(s);
        }
    }
    *s = acc;
}

macro_rules! xoshiro256 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal,
        |$s:ident| $output:expr
    ) => {
        $(#[$doc])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            s: [u64; 4],
        }

        impl $name {
            /// # Errors
            ///
            /// Returns `CryptoError::Configuration` if all four words are zero.
            pub fn new(state: [u64; 4]) -> Result<Self, CryptoError> {
                check_nonzero_state(&state, $label)?;
                Ok(Self { s: state })
            }

            /// Expand `seed` into a full state with SplitMix64.
            #[must_use]
            pub fn seed_from_u64(seed: u64) -> Self {
                let mut s = expand_seed::<4>(seed);
                if s == [0; 4] {
                    s[0] = 1;
                }
                Self { s }
            }

            /// # Errors
            ///
            /// Returns `CryptoError::Rng` if the OS entropy source fails.
            pub fn from_entropy() -> Result<Self, CryptoError> {
                Ok(Self { s: os_seed_words::<4>()? })
            }

            /// Skip ahead 2^128 outputs.
            pub fn jump(&mut self) {
                jump(&mut self.s);
            }
        }

        impl Generator for $name {
            fn algorithm_name(&self) -> String {
                $label.to_owned()
            }

            fn next_u64(&mut self) -> u64 {
                let $s = self.s;
                let out = $output;
                advance(&mut self.s);
                out
            }

            fn reseed(&mut self) -> Result<(), CryptoError> {
                self.s = os_seed_words::<4>()?;
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

xoshiro256!(
    /// xoshiro256+. Intended for floats; the lowest bits are weak.
    Xoshiro256Plus, "Xoshiro256+",
    |s| s[0].wrapping_add(s[3])
);

xoshiro256!(
    /// xoshiro256++. General-purpose default.
    Xoshiro256PlusPlus, "Xoshiro256++",
    |s| s[0].wrapping_add(s[3]).rotate_left(23).wrapping_add(s[0])
);

xoshiro256!(
    /// xoshiro256**.
    Xoshiro256StarStar, "Xoshiro256**",
    |s| s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9)
);
