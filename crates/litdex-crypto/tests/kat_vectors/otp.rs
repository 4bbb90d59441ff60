//! RFC 4226 Appendix D and RFC 6238 Appendix B known answers.

use litdex_crypto::otp::{
    generate_hotp, generate_hotp_with_offset, generate_totp, Hotp, OtpAlgorithm, OtpDigits,
    TotpConfig,
};

const SEED_SHA1: &[u8] = b"12345678901234567890";
const SEED_SHA256: &[u8] = b"12345678901234567890123456789012";
const SEED_SHA512: &[u8] = b"1234567890123456789012345678901234567890123456789012345678901234";

const RFC4226_CODES: [&str; 10] = [
    "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583", "399871",
    "520489",
];

/// (time, SHA-1, SHA-256, SHA-512) from RFC 6238 Appendix B.
const RFC6238_TABLE: [(u64, &str, &str, &str); 6] = [
    (59, "94287082", "46119246", "90693936"),
    (1_111_111_109, "07081804", "68084774", "25091201"),
    (1_111_111_111, "14050471", "67062674", "99943326"),
    (1_234_567_890, "89005924", "91819424", "93441116"),
    (2_000_000_000, "69279037", "90698825", "38618901"),
    (20_000_000_000, "65353130", "77737706", "47863826"),
];

#[test]
fn rfc4226_hotp_counters_0_to_9() {
    for (counter, expected) in (0u64..).zip(RFC4226_CODES) {
        let code = generate_hotp(SEED_SHA1, counter, OtpDigits::Six, OtpAlgorithm::Sha1).unwrap();
        assert_eq!(code, expected, "HOTP mismatch at counter {counter}");
    }
}

#[test]
fn hotp_generator_pre_increments() {
    let mut hotp = Hotp::new(SEED_SHA1, 0, OtpDigits::Six, OtpAlgorithm::Sha1).unwrap();
    for expected in &RFC4226_CODES[1..] {
        assert_eq!(&hotp.next_code().unwrap(), expected);
    }
    assert_eq!(hotp.counter(), 9);
    assert_eq!(hotp.code_at(0).unwrap(), RFC4226_CODES[0]);
    assert!(hotp.verify("520489", 9).unwrap());
    assert!(!hotp.verify("520489", 8).unwrap());
}

#[test]
fn rfc6238_totp_table() {
    for (time, sha1, sha256, sha512) in RFC6238_TABLE {
        let totp = |seed, algorithm| {
            generate_totp(seed, time, OtpDigits::Eight, 30, algorithm).unwrap()
        };
        assert_eq!(totp(SEED_SHA1, OtpAlgorithm::Sha1), sha1, "SHA-1 at {time}");
        assert_eq!(totp(SEED_SHA256, OtpAlgorithm::Sha256), sha256, "SHA-256 at {time}");
        assert_eq!(totp(SEED_SHA512, OtpAlgorithm::Sha512), sha512, "SHA-512 at {time}");
    }
}

#[test]
fn totp_config_matches_table() {
    let config = TotpConfig {
        digits: OtpDigits::Eight,
        ..TotpConfig::default()
    };
    assert_eq!(config.generate(SEED_SHA1, 1_234_567_890).unwrap(), "89005924");
    assert!(config.validate(SEED_SHA1, 1_234_567_890, "89005924").unwrap());
}

#[test]
fn code_widths_keep_leading_digits() {
    let ten = generate_hotp(SEED_SHA1, 0, OtpDigits::Ten, OtpAlgorithm::Sha1).unwrap();
    let nine = generate_hotp(SEED_SHA1, 0, OtpDigits::Nine, OtpAlgorithm::Sha1).unwrap();
    let seven = generate_hotp(SEED_SHA1, 0, OtpDigits::Seven, OtpAlgorithm::Sha1).unwrap();
    assert_eq!(ten, "1284755224");
    assert_eq!(nine, "284755224");
    assert_eq!(seven, "4755224");
}

#[test]
fn out_of_range_offset_uses_dynamic_truncation() {
    let dynamic = generate_hotp(SEED_SHA1, 3, OtpDigits::Six, OtpAlgorithm::Sha1).unwrap();
    let fallback =
        generate_hotp_with_offset(SEED_SHA1, 3, OtpDigits::Six, OtpAlgorithm::Sha1, Some(16))
            .unwrap();
    assert_eq!(dynamic, fallback);
    assert_eq!(dynamic, RFC4226_CODES[3]);
}
