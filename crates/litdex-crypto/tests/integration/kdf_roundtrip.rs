//! HMAC, HKDF, and PBKDF2 layered over every fixed-output hash.

use litdex_crypto::hash::{HashAlgorithm, Sha256};
use litdex_crypto::kdf::{pbkdf2, Hkdf, Pbkdf2Params};
use litdex_crypto::mac::{hmac, Hmac};
use litdex_crypto::CryptoError;

#[test]
fn hmac_over_every_hash() {
    for algorithm in HashAlgorithm::ALL {
        let tag = hmac(algorithm, b"key", b"message").unwrap();
        assert_eq!(tag.len(), algorithm.digest_length(), "{algorithm:?}");

        let mut mac = Hmac::new(algorithm.hasher(), b"key").unwrap();
        assert!(mac.algorithm_name().starts_with("HMAC-"));
        mac.update(b"mes").unwrap();
        mac.update(b"sage").unwrap();
        let mut streamed = vec![0u8; mac.mac_length()];
        mac.finalize(&mut streamed).unwrap();
        assert_eq!(tag, streamed, "{algorithm:?}");
    }
}

/// After finalize the context is keyed and empty, ready for the next message.
#[test]
fn hmac_reuse_and_rekey() {
    let mut mac = Hmac::new(Sha256::new(), b"first key").unwrap();
    let a1 = mac.compute(b"a").unwrap();
    let b1 = mac.compute(b"b").unwrap();
    assert_eq!(mac.compute(b"a").unwrap(), a1);
    assert_ne!(a1, b1);

    mac.update(b"partial").unwrap();
    mac.reset().unwrap();
    assert_eq!(mac.compute(b"a").unwrap(), a1);

    mac.set_key(b"second key").unwrap();
    assert_ne!(mac.compute(b"a").unwrap(), a1);
    assert_eq!(
        mac.compute(b"a").unwrap(),
        hmac(HashAlgorithm::Sha256, b"second key", b"a").unwrap()
    );
}

#[test]
fn hkdf_over_every_hash() {
    for algorithm in HashAlgorithm::ALL {
        let mut hkdf = Hkdf::new(algorithm.hasher());
        let len = algorithm.digest_length() * 3 + 5;
        let okm = hkdf.derive(b"ikm", Some(&b"salt"[..]), b"ctx", len).unwrap();
        assert_eq!(okm.len(), len);

        let prk = hkdf.extract(Some(&b"salt"[..]), b"ikm").unwrap();
        assert_eq!(prk.len(), algorithm.digest_length());
        let short = hkdf.expand(prk.expose(), b"ctx", 7).unwrap();
        assert_eq!(short.expose(), &okm.expose()[..7], "{algorithm:?}");
    }
}

#[test]
fn pbkdf2_params_serde_roundtrip() {
    let params = Pbkdf2Params::default();
    assert_eq!(params.algorithm, HashAlgorithm::Sha256);
    assert_eq!(params.iterations, pbkdf2::DEFAULT_ITERATIONS);

    let json = serde_json::to_string(&params).unwrap();
    let back: Pbkdf2Params = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn pbkdf2_rejects_degenerate_parameters() {
    let zero_iterations = Pbkdf2Params {
        iterations: 0,
        ..Pbkdf2Params::default()
    };
    assert!(matches!(
        pbkdf2::derive(b"pw", b"salt", &zero_iterations),
        Err(CryptoError::Configuration(_))
    ));

    let empty_output = Pbkdf2Params {
        iterations: 1,
        output_len: 0,
        ..Pbkdf2Params::default()
    };
    assert!(matches!(
        pbkdf2::derive(b"pw", b"salt", &empty_output),
        Err(CryptoError::Length(_))
    ));
}

#[test]
fn pbkdf2_output_prefix_property() {
    let short = Pbkdf2Params {
        algorithm: HashAlgorithm::Sha3_256,
        iterations: 3,
        output_len: 10,
    };
    let long = Pbkdf2Params {
        output_len: 70,
        ..short.clone()
    };
    let a = pbkdf2::derive(b"pw", b"salt", &short).unwrap();
    let b = pbkdf2::derive(b"pw", b"salt", &long).unwrap();
    assert_eq!(a.expose(), &b.expose()[..10]);
}
