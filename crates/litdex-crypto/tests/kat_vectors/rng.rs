//! Generator reference sequences.
//!
//! xoshiro/xoroshiro values match the authors' C reference code seeded
//! directly; SplitMix64 and wyrand match their reference outputs.

use litdex_crypto::rng::{
    Generator, SplitMix64, WyRng, Xoroshiro128Plus, Xoroshiro128PlusPlus, Xoroshiro128StarStar,
    Xoshiro256Plus, Xoshiro256PlusPlus, Xoshiro256StarStar,
};

fn take<G: Generator>(g: &mut G, n: usize) -> Vec<u64> {
    (0..n).map(|_| g.next_u64()).collect()
}

#[test]
fn splitmix64() {
    assert_eq!(
        take(&mut SplitMix64::new(0), 3),
        [0xe220_a839_7b1d_cdaf, 0x6e78_9e6a_a1b9_65f4, 0x06c4_5d18_8009_454f]
    );
    assert_eq!(
        take(&mut SplitMix64::new(1_234_567), 3),
        [0x599e_d017_fb08_fc85, 0x2c73_f084_5854_0fa5, 0x883e_bce5_a3f2_7c77]
    );
}

#[test]
fn wyrng() {
    assert_eq!(
        take(&mut WyRng::new(0), 3),
        [0x111c_b3a7_8f59_a58e, 0xceab_d938_ff4e_856d, 0x61fb_5131_8f47_d2a4]
    );
    assert_eq!(
        take(&mut WyRng::new(42), 3),
        [0xae4a_7cbf_dda9_b434, 0xe9cc_09d3_3d38_d9d2, 0xcb57_5651_2b93_433a]
    );
}

#[test]
fn xoroshiro128_family() {
    assert_eq!(
        take(&mut Xoroshiro128Plus::new([1, 2]).unwrap(), 3),
        [0x3, 0x60_0103_0003, 0x20c1_02c3_0200_0c03]
    );
    assert_eq!(
        take(&mut Xoroshiro128PlusPlus::new([1, 2]).unwrap(), 3),
        [0x6_0001, 0x2_60c0_0066_0007, 0x180a_cc04_7186_06d3]
    );
    assert_eq!(
        take(&mut Xoroshiro128StarStar::new([1, 2]).unwrap(), 3),
        [0x1680, 0x16_c380_4380, 0x86b5_b3ad_0000_4380]
    );
}

#[test]
fn xoroshiro128_after_jump() {
    let mut plus = Xoroshiro128Plus::new([1, 2]).unwrap();
    plus.jump();
    assert_eq!(plus.next_u64(), 0xea08_1299_d29a_d927);

    let mut plus_plus = Xoroshiro128PlusPlus::new([1, 2]).unwrap();
    plus_plus.jump();
    assert_eq!(plus_plus.next_u64(), 0x6115_ff4c_07d8_c03e);

    let mut star_star = Xoroshiro128StarStar::new([1, 2]).unwrap();
    star_star.jump();
    assert_eq!(star_star.next_u64(), 0x2232_b5a1_a6bd_6889);
}

#[test]
fn xoshiro256_family() {
    let seed = [1, 2, 3, 4];
    assert_eq!(
        take(&mut Xoshiro256Plus::new(seed).unwrap(), 3),
        [0x5, 0xc000_0000_0007, 0xc000_1800_0007]
    );
    assert_eq!(
        take(&mut Xoshiro256PlusPlus::new(seed).unwrap(), 3),
        [0x280_0001, 0x380_0067, 0xc_c000_0380_0067]
    );
    assert_eq!(
        take(&mut Xoshiro256StarStar::new(seed).unwrap(), 3),
        [11_520, 0, 1_509_978_240]
    );
}

#[test]
fn xoshiro256_after_jump() {
    let seed = [1, 2, 3, 4];
    let mut plus = Xoshiro256Plus::new(seed).unwrap();
    plus.jump();
    assert_eq!(plus.next_u64(), 0x1000_ccc0_1af6_7421);

    let mut plus_plus = Xoshiro256PlusPlus::new(seed).unwrap();
    plus_plus.jump();
    assert_eq!(plus_plus.next_u64(), 0xec87_9073_673d_f437);

    let mut star_star = Xoshiro256StarStar::new(seed).unwrap();
    star_star.jump();
    assert_eq!(star_star.next_u64(), 0xbbd2_f312_2984_43d8);
}

#[test]
fn next_u32_is_high_half() {
    let mut g = Xoshiro256Plus::new([1, 2, 3, 4]).unwrap();
    let _ = g.next_u64();
    assert_eq!(g.next_u32(), 0xc000);
}
