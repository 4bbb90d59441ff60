//! Rabbit encrypt/decrypt and keying lifecycle.

use litdex_crypto::cipher::{Rabbit, StreamCipher};
use litdex_crypto::CryptoError;

const KEY: [u8; 16] = *b"litdex rabbit k!";
const IV: [u8; 8] = *b"nonce-01";

#[test]
fn encrypt_then_decrypt_restores_plaintext() {
    let plaintext = b"Rabbit is a synchronous stream cipher from eSTREAM.".to_vec();

    let ciphertext = Rabbit::new(&KEY, Some(&IV))
        .unwrap()
        .encrypt(&plaintext)
        .unwrap();
    assert_ne!(ciphertext, plaintext);

    let recovered = Rabbit::new(&KEY, Some(&IV))
        .unwrap()
        .decrypt(&ciphertext)
        .unwrap();
    assert_eq!(recovered, plaintext);
}

/// Splitting a message at any point gives the same ciphertext.
#[test]
fn chunked_encryption_matches_one_shot() {
    let data: Vec<u8> = (0u8..=200).collect();
    let whole = Rabbit::new(&KEY, None).unwrap().encrypt(&data).unwrap();

    for split in [0, 1, 15, 16, 17, 100, 201] {
        let mut rabbit = Rabbit::new(&KEY, None).unwrap();
        let mut buf = data.clone();
        let (head, tail) = buf.split_at_mut(split);
        rabbit.apply_keystream(head).unwrap();
        rabbit.apply_keystream(tail).unwrap();
        assert_eq!(buf, whole, "split at {split}");
    }
}

#[test]
fn different_ivs_give_different_streams() {
    let mut rabbit = Rabbit::new(&KEY, Some(&IV)).unwrap();
    let mut a = [0u8; 32];
    rabbit.keystream(&mut a).unwrap();

    rabbit.set_iv(b"nonce-02").unwrap();
    let mut b = [0u8; 32];
    rabbit.keystream(&mut b).unwrap();
    assert_ne!(a, b);

    rabbit.set_iv(&IV).unwrap();
    let mut again = [0u8; 32];
    rabbit.keystream(&mut again).unwrap();
    assert_eq!(a, again);
}

#[test]
fn reset_requires_rekey() {
    let mut rabbit = Rabbit::new(&KEY, None).unwrap();
    let mut before = [0u8; 16];
    rabbit.keystream(&mut before).unwrap();

    rabbit.reset();
    let mut buf = [0u8; 4];
    assert!(matches!(
        rabbit.apply_keystream(&mut buf),
        Err(CryptoError::ProtocolViolation(_))
    ));
    assert!(matches!(
        rabbit.set_iv(&IV),
        Err(CryptoError::ProtocolViolation(_))
    ));

    rabbit.set_key(&KEY).unwrap();
    let mut after = [0u8; 16];
    rabbit.keystream(&mut after).unwrap();
    assert_eq!(before, after);
}

#[test]
fn stream_cipher_trait_object() {
    let mut cipher: Box<dyn StreamCipher> = Box::new(Rabbit::new(&KEY, Some(&IV)).unwrap());
    assert_eq!(cipher.algorithm_name(), "Rabbit");
    let mut data = *b"trait object";
    cipher.apply_keystream(&mut data).unwrap();
    assert_ne!(&data, b"trait object");
}

#[test]
fn bad_key_and_iv_lengths() {
    assert!(matches!(
        Rabbit::new(&KEY[..15], None),
        Err(CryptoError::InvalidKeyMaterial(_))
    ));
    assert!(matches!(
        Rabbit::new(&KEY, Some(&IV[..7])),
        Err(CryptoError::InvalidKeyMaterial(_))
    ));
}
