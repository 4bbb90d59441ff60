//! Finalize and reset return every hash to its initial state.

use litdex_crypto::hash::sponge::Sponge;
use litdex_crypto::hash::{Digest, HashAlgorithm, Keccak, Sha3, Shake};
use litdex_crypto::CryptoError;

fn all_hashers() -> Vec<Box<dyn Digest>> {
    let mut hashers: Vec<Box<dyn Digest>> =
        HashAlgorithm::ALL.iter().map(|a| a.hasher()).collect();
    hashers.push(Box::new(Shake::shake128()));
    hashers.push(Box::new(Shake::shake256()));
    hashers.push(Box::new(Keccak::new(128).unwrap()));
    hashers.push(Box::new(Keccak::new(288).unwrap()));
    hashers
}

/// A second message on a finalized instance hashes as if on a fresh one.
#[test]
fn finalize_resets_every_hash() {
    for mut hasher in all_hashers() {
        let first = hasher.compute(b"first message").unwrap();
        let second = hasher.compute(b"second message").unwrap();
        let again = hasher.compute(b"first message").unwrap();
        assert_eq!(first, again, "{} kept state", hasher.algorithm_name());
        assert_ne!(first, second, "{}", hasher.algorithm_name());
    }
}

#[test]
fn explicit_reset_discards_partial_input() {
    for mut hasher in all_hashers() {
        let clean = hasher.compute(b"payload").unwrap();
        hasher.update(b"garbage that must be forgotten").unwrap();
        hasher.reset();
        assert_eq!(
            hasher.compute(b"payload").unwrap(),
            clean,
            "{}",
            hasher.algorithm_name()
        );
    }
}

/// 0..=3 block sizes plus one byte either side of each boundary.
#[test]
fn block_boundaries_match_byte_at_a_time() {
    for mut hasher in all_hashers() {
        let block = hasher.block_size();
        for len in [0, 1, block - 1, block, block + 1, 2 * block, 3 * block + 7] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let whole = hasher.compute(&data).unwrap();
            for &byte in &data {
                hasher.update_byte(byte).unwrap();
            }
            let mut out = vec![0u8; hasher.digest_length()];
            hasher.finalize(&mut out).unwrap();
            assert_eq!(whole, out, "{} at length {len}", hasher.algorithm_name());
        }
    }
}

#[test]
fn short_output_buffer_is_rejected() {
    for mut hasher in all_hashers() {
        let mut out = vec![0u8; hasher.digest_length() - 1];
        assert!(
            matches!(hasher.finalize(&mut out), Err(CryptoError::Length(_))),
            "{}",
            hasher.algorithm_name()
        );
    }
}

/// A longer buffer receives the digest in its first `digest_length` bytes.
#[test]
fn long_output_buffer_gets_prefix() {
    let mut hasher = Sha3::sha3_256();
    let expected = hasher.compute(b"abc").unwrap();
    let mut out = [0xffu8; 40];
    hasher.update(b"abc").unwrap();
    assert_eq!(hasher.finalize(&mut out).unwrap(), 32);
    assert_eq!(&out[..32], expected.as_slice());
    assert_eq!(&out[32..], &[0xff; 8]);
}

#[test]
fn raw_sponge_phase_rules() {
    let mut sponge = Sponge::new(1088).unwrap();
    assert_eq!(sponge.capacity_bits(), 512);
    sponge.absorb(b"abc").unwrap();
    sponge.absorb_bits(0b10, 2).unwrap();
    assert!(matches!(
        sponge.absorb(b"more"),
        Err(CryptoError::ProtocolViolation(_))
    ));

    let mut out = [0u8; 32];
    assert!(matches!(
        sponge.squeeze_bits(&mut out, 12),
        Err(CryptoError::Length(_))
    ));
    assert!(!sponge.is_squeezing());
    sponge.squeeze_bits(&mut out, 256).unwrap();
    assert!(sponge.is_squeezing());
    assert_eq!(
        hex::encode(out),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
}
