//! RFC 5869 HKDF known answers (Appendix A).

use litdex_crypto::hash::{Sha1, Sha256, Sha3};
use litdex_crypto::kdf::Hkdf;
use litdex_crypto::CryptoError;

fn salt_0_to_12() -> Vec<u8> {
    (0x00..=0x0c).collect()
}

fn info_f0_to_f9() -> Vec<u8> {
    (0xf0..=0xf9).collect()
}

#[test]
fn rfc5869_case1_sha256() {
    let mut hkdf = Hkdf::new(Sha256::new());
    let ikm = [0x0b; 22];

    let prk = hkdf.extract(Some(salt_0_to_12().as_slice()), &ikm).unwrap();
    assert_eq!(
        hex::encode(prk.expose()),
        "077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5"
    );

    let okm = hkdf.expand(prk.expose(), &info_f0_to_f9(), 42).unwrap();
    assert_eq!(
        hex::encode(okm.expose()),
        "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf\
         34007208d5b887185865"
    );
}

/// Case 3: empty salt and info. An absent salt means `HashLen` zeros,
/// which HMAC pads to the same key as an empty salt.
#[test]
fn rfc5869_case3_empty_salt_and_info() {
    let expected = "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d\
                    9d201395faa4b61a96c8";
    let ikm = [0x0b; 22];

    let mut hkdf = Hkdf::new(Sha256::new());
    let with_empty = hkdf.derive(&ikm, Some(&[][..]), &[], 42).unwrap();
    let with_none = hkdf.derive(&ikm, None, &[], 42).unwrap();
    assert_eq!(hex::encode(with_empty.expose()), expected);
    assert_eq!(hex::encode(with_none.expose()), expected);
}

#[test]
fn rfc5869_case4_sha1() {
    let mut hkdf = Hkdf::new(Sha1::new());
    let prk = hkdf.extract(Some(salt_0_to_12().as_slice()), &[0x0b; 11]).unwrap();
    assert_eq!(
        hex::encode(prk.expose()),
        "9b6c18c432a7bf8f0e71c8eb88f4b30baa2ba243"
    );
    let okm = hkdf.expand(prk.expose(), &info_f0_to_f9(), 42).unwrap();
    assert_eq!(
        hex::encode(okm.expose()),
        "085a01ea1b10f36933068b56efa5ad81a4f14b822f5b091568a9cdd4f155fda2\
         c22e422478d305f3f896"
    );
}

#[test]
fn hkdf_sha3_256() {
    let mut hkdf = Hkdf::new(Sha3::sha3_256());
    assert_eq!(hkdf.algorithm_name(), "HKDF-SHA3-256");
    let okm = hkdf.derive(b"input key", Some(&b"salt"[..]), b"info", 50).unwrap();
    assert_eq!(
        hex::encode(okm.expose()),
        "4763d7124fa6e3cbd49e13c3b61eb4b95e47b97285ac6effd7b85d485a1dabc2\
         b474dd875adaf36ea5e7c47687d13fb94faf"
    );
}

#[test]
fn expand_limits() {
    let mut hkdf = Hkdf::new(Sha256::new());
    let prk = [0x42u8; 32];

    assert_eq!(hkdf.expand(&prk, b"", 255 * 32).unwrap().len(), 255 * 32);
    assert!(matches!(
        hkdf.expand(&prk, b"", 255 * 32 + 1),
        Err(CryptoError::Length(_))
    ));
    assert!(matches!(
        hkdf.expand(&prk[..31], b"", 16),
        Err(CryptoError::InvalidKeyMaterial(_))
    ));
    assert!(hkdf.expand(&prk, b"", 0).unwrap().is_empty());
}
