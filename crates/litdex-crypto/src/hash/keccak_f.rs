//! Keccak-f\[1600\] permutation.
//!
//! The state is 25 little-endian 64-bit lanes, indexed `x + 5 * y`.

/// Number of lanes in the 1600-bit state.
pub const LANES: usize = 25;

/// Number of rounds of Keccak-f\[1600\].
pub const ROUNDS: usize = 24;

/// Iota round constants.
const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, in the order lanes are visited by [`PI_LANES`].
const RHO_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Pi lane walk starting from lane 1: each entry is the destination of the
/// previously visited lane.
const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply the 24-round Keccak-f\[1600\] permutation in place.
// Index arithmetic stays inside the fixed 5x5 lane grid.
#[allow(clippy::arithmetic_side_effects)]
pub fn permute(lanes: &mut [u64; LANES]) {
    for &round_constant in &ROUND_CONSTANTS {
        // theta
        let mut parity = [0u64; 5];
        for (x, column) in parity.iter_mut().enumerate() {
            *column = lanes[x] ^ lanes[x + 5] ^ lanes[x + 10] ^ lanes[x + 15] ^ lanes[x + 20];
        }
        for x in 0..5 {
            let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
            for y in (0..LANES).step_by(5) {
                lanes[y + x] ^= d;
            }
        }

        // rho + pi
        let mut carried = lanes[1];
        for (&dest, &offset) in PI_LANES.iter().zip(RHO_OFFSETS.iter()) {
            let next = lanes[dest];
            lanes[dest] = carried.rotate_left(offset);
            carried = next;
        }

        // chi
        for y in (0..LANES).step_by(5) {
            let row = [
                lanes[y],
                lanes[y + 1],
                lanes[y + 2],
                lanes[y + 3],
                lanes[y + 4],
            ];
            for x in 0..5 {
                lanes[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // iota
        lanes[0] ^= round_constant;
    }
}
