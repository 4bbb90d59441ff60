//! Keccak sponge engine: rate configuration, buffered absorb, pad10*1
//! padding, and squeeze.
//!
//! The engine is bit-addressed so that domain-separation suffixes (SHA-3's
//! `01`, SHAKE's `1111`) can be appended after the last whole byte. The
//! public byte-oriented API keeps the queue byte-aligned until a suffix is
//! absorbed, after which only padding and squeezing are possible.
//!
//! Phase lifecycle: `Absorbing → Squeezing`, one-way; [`Sponge::reset`]
//! returns to `Absorbing` with a zeroed state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::keccak_f::{self, LANES};
use crate::error::CryptoError;

/// Width of the Keccak-f\[1600\] state in bits.
pub const STATE_BITS: usize = 1600;

/// Queue size: one block at the largest accepted rate (1536 bits).
const QUEUE_LEN: usize = 192;

/// A Keccak sponge with a fixed rate.
///
/// `bits_in_queue` counts pending input bits while absorbing and remaining
/// output bits while squeezing.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sponge {
    lanes: [u64; LANES],
    queue: [u8; QUEUE_LEN],
    rate_bits: usize,
    bits_in_queue: usize,
    squeezing: bool,
}

impl Sponge {
    /// Create a sponge with the given rate.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Configuration` unless `rate_bits` is a positive
    /// multiple of 64 strictly below 1600.
    pub fn new(rate_bits: usize) -> Result<Self, CryptoError> {
        if rate_bits == 0 || rate_bits >= STATE_BITS || rate_bits % 64 != 0 {
            return Err(CryptoError::Configuration(format!(
                "invalid sponge rate: {rate_bits} bits"
            )));
        }
        Ok(Self::with_rate(rate_bits))
    }

    /// Construct from a rate already known to be valid.
    pub(crate) const fn with_rate(rate_bits: usize) -> Self {
        Self {
            lanes: [0u64; LANES],
            queue: [0u8; QUEUE_LEN],
            rate_bits,
            bits_in_queue: 0,
            squeezing: false,
        }
    }

    /// Rate in bits.
    #[must_use]
    pub const fn rate_bits(&self) -> usize {
        self.rate_bits
    }

    /// Rate in bytes.
    #[must_use]
    pub const fn rate_bytes(&self) -> usize {
        self.rate_bits / 8
    }

    /// Capacity in bits (`1600 - rate`).
    #[must_use]
    pub const fn capacity_bits(&self) -> usize {
        STATE_BITS.wrapping_sub(self.rate_bits)
    }

    /// `true` once output extraction has begun.
    #[must_use]
    pub const fn is_squeezing(&self) -> bool {
        self.squeezing
    }

    /// Zero lanes and queue and return to the absorbing phase.
    pub fn reset(&mut self) {
        self.lanes.zeroize();
        self.queue.zeroize();
        self.bits_in_queue = 0;
        self.squeezing = false;
    }

    fn check_absorbing(&self) -> Result<(), CryptoError> {
        if self.squeezing {
            return Err(CryptoError::ProtocolViolation(
                "attempt to absorb while squeezing".into(),
            ));
        }
        if self.bits_in_queue % 8 != 0 {
            return Err(CryptoError::ProtocolViolation(
                "attempt to absorb with a partial byte in the queue".into(),
            ));
        }
        Ok(())
    }

    /// Absorb `data` into the state.
    ///
    /// Full rate-sized chunks are XORed straight from `data` when the queue
    /// is empty; everything else is staged through the queue.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::ProtocolViolation` if squeezing has begun or a
    /// partial byte has been absorbed.
    pub fn absorb(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.check_absorbing()?;

        let rate_bytes = self.rate_bytes();
        let mut queued = self.bits_in_queue / 8;
        let mut rest = data;

        while !rest.is_empty() {
            if queued == 0 && rest.len() >= rate_bytes {
                let (block, tail) = rest.split_at(rate_bytes);
                self.absorb_block(block);
                rest = tail;
                continue;
            }

            let space = rate_bytes.saturating_sub(queued);
            let take = space.min(rest.len());
            let (chunk, tail) = rest.split_at(take);
            let end = queued.saturating_add(take);
            self.queue[queued..end].copy_from_slice(chunk);
            queued = end;
            rest = tail;

            if queued == rate_bytes {
                self.absorb_queue();
                queued = 0;
            }
        }

        self.bits_in_queue = queued.saturating_mul(8);
        Ok(())
    }

    /// Append the low `bit_count` bits of `bits` (LSB first).
    ///
    /// Used once per message for domain separation. Afterwards the queue is
    /// no longer byte-aligned, so further [`Sponge::absorb`] calls fail.
    ///
    /// # Errors
    ///
    /// - `CryptoError::Length` if `bit_count` is not in `1..=7`
    /// - `CryptoError::ProtocolViolation` under the same conditions as
    ///   [`Sponge::absorb`]
    pub fn absorb_bits(&mut self, bits: u8, bit_count: u32) -> Result<(), CryptoError> {
        if !(1..=7).contains(&bit_count) {
            return Err(CryptoError::Length(format!(
                "partial byte must carry 1 to 7 bits, got {bit_count}"
            )));
        }
        self.check_absorbing()?;

        let mask = (1u8 << bit_count).wrapping_sub(1);
        self.queue[self.bits_in_queue / 8] = bits & mask;
        self.bits_in_queue = self.bits_in_queue.wrapping_add(bit_count as usize);
        Ok(())
    }

    /// Squeeze `output.len()` bytes.
    ///
    /// The first call pads and switches to the squeezing phase. Successive
    /// calls continue the output stream; emitted bytes are never repeated.
    pub fn squeeze(&mut self, output: &mut [u8]) {
        if !self.squeezing {
            self.pad_and_switch_to_squeezing();
        }

        let rate_bytes = self.rate_bytes();
        let mut filled = 0usize;
        while filled < output.len() {
            if self.bits_in_queue == 0 {
                keccak_f::permute(&mut self.lanes);
                self.extract();
                self.bits_in_queue = self.rate_bits;
            }
            let available = self.bits_in_queue / 8;
            let start = rate_bytes.wrapping_sub(available);
            let take = available.min(output.len().wrapping_sub(filled));
            let end = filled.wrapping_add(take);
            output[filled..end].copy_from_slice(&self.queue[start..start.wrapping_add(take)]);
            self.bits_in_queue = self.bits_in_queue.wrapping_sub(take.wrapping_mul(8));
            filled = end;
        }
    }

    /// Squeeze `length_bits` bits into the front of `output`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Length` if `length_bits` is not a multiple of 8
    /// or exceeds the capacity of `output`.
    pub fn squeeze_bits(&mut self, output: &mut [u8], length_bits: u64) -> Result<(), CryptoError> {
        if length_bits % 8 != 0 {
            return Err(CryptoError::Length(format!(
                "output length {length_bits} bits is not a multiple of 8"
            )));
        }
        let length = usize::try_from(length_bits / 8)
            .ok()
            .filter(|&n| n <= output.len())
            .ok_or_else(|| {
                CryptoError::Length(format!(
                    "output length {length_bits} bits exceeds the {}-byte buffer",
                    output.len()
                ))
            })?;
        self.squeeze(&mut output[..length]);
        Ok(())
    }

    /// XOR one rate-sized block into the lanes and permute.
    fn absorb_block(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), self.rate_bytes());
        for (lane, word) in self.lanes.iter_mut().zip(block.chunks_exact(8)) {
            *lane ^= load_le(word);
        }
        keccak_f::permute(&mut self.lanes);
    }

    fn absorb_queue(&mut self) {
        let queue = self.queue;
        self.absorb_block(&queue[..self.rate_bytes()]);
    }

    /// Copy the rate portion of the lanes into the queue.
    fn extract(&mut self) {
        let rate_bytes = self.rate_bytes();
        for (word, lane) in self.queue[..rate_bytes]
            .chunks_exact_mut(8)
            .zip(self.lanes.iter())
        {
            word.copy_from_slice(&lane.to_le_bytes());
        }
    }

    /// pad10*1, final permutation, and first extraction.
    fn pad_and_switch_to_squeezing(&mut self) {
        debug_assert!(self.bits_in_queue < self.rate_bits);

        let pad_byte = self.bits_in_queue / 8;
        self.queue[pad_byte] |= 1u8 << (self.bits_in_queue % 8);
        self.bits_in_queue = self.bits_in_queue.wrapping_add(1);

        if self.bits_in_queue == self.rate_bits {
            self.absorb_queue();
            self.bits_in_queue = 0;
        }

        let full_lanes = self.bits_in_queue / 64;
        let partial_bits = self.bits_in_queue % 64;
        for (lane, word) in self.lanes[..full_lanes]
            .iter_mut()
            .zip(self.queue.chunks_exact(8))
        {
            *lane ^= load_le(word);
        }
        if partial_bits > 0 {
            let offset = full_lanes.wrapping_mul(8);
            let mask = (1u64 << partial_bits).wrapping_sub(1);
            self.lanes[full_lanes] ^=
                load_le(&self.queue[offset..offset.wrapping_add(8)]) & mask;
        }
        self.lanes[self.rate_bits.wrapping_sub(1) / 64] ^= 1u64 << 63;

        keccak_f::permute(&mut self.lanes);
        self.extract();
        self.bits_in_queue = self.rate_bits;
        self.squeezing = true;
    }
}

impl std::fmt::Debug for Sponge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sponge")
            .field("rate_bits", &self.rate_bits)
            .field("squeezing", &self.squeezing)
            .finish_non_exhaustive()
    }
}

fn load_le(word: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(word);
    u64::from_le_bytes(bytes)
}

/// Fixed-length finish shared by the Keccak and SHA-3 adapters: optional
/// suffix, squeeze `out.len()` bytes, reset.
pub(crate) fn finish_fixed(
    sponge: &mut Sponge,
    suffix: Option<(u8, u32)>,
    out: &mut [u8],
) -> Result<(), CryptoError> {
    if let Some((bits, count)) = suffix {
        sponge.absorb_bits(bits, count)?;
    }
    sponge.squeeze(out);
    sponge.reset();
    Ok(())
}
