//! OTP generate → validate lifecycle and skew-window boundaries.

use litdex_crypto::otp::{
    generate_totp, time_step, validate_totp, validate_totp_window, validation_candidates, Hotp,
    OtpAlgorithm, OtpDigits, SkewWindow, TotpConfig, MAX_PERIOD, RANDOM_KEY_LEN,
};
use litdex_crypto::CryptoError;

const SECRET: &[u8] = b"12345678901234567890";

#[test]
fn generate_then_validate_same_time() {
    let time = 1_700_000_000;
    let code = generate_totp(SECRET, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).unwrap();
    assert!(validate_totp(SECRET, time, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1).unwrap());
}

#[test]
fn default_window_is_one_step_each_way() {
    let time = 1_700_000_010;
    let code = generate_totp(SECRET, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).unwrap();
    let check = |t| validate_totp(SECRET, t, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1).unwrap();

    assert!(check(time - 30), "one step early");
    assert!(check(time + 30), "one step late");
    assert!(!check(time - 60), "two steps early");
    assert!(!check(time + 60), "two steps late");
}

#[test]
fn custom_window_is_asymmetric() {
    let time = 1_700_000_010;
    let code = generate_totp(SECRET, time, OtpDigits::Eight, 30, OtpAlgorithm::Sha256).unwrap();
    let window = SkewWindow {
        previous: 0,
        future: 2,
    };
    let check = |t| {
        validate_totp_window(
            SECRET,
            t,
            &code,
            OtpDigits::Eight,
            30,
            OtpAlgorithm::Sha256,
            window,
        )
        .unwrap()
    };

    // Verifier clock running behind the generator: the code is from its future.
    assert!(check(time - 60));
    assert!(!check(time - 90));
    // Verifier clock ahead: `previous` is zero, so nothing earlier is accepted.
    assert!(!check(time + 30));
}

#[test]
fn candidates_current_then_earlier_then_later() {
    let steps: Vec<u64> = validation_candidates(10, 2, 1).collect();
    assert_eq!(steps, [10, 9, 8, 11]);

    let at_zero: Vec<u64> = validation_candidates(0, 3, 1).collect();
    assert_eq!(at_zero, [0, 1]);

    let at_max: Vec<u64> = validation_candidates(u64::MAX, 1, 3).collect();
    assert_eq!(at_max, [u64::MAX, u64::MAX - 1]);
}

#[test]
fn period_bounds() {
    assert_eq!(time_step(59, 30).unwrap(), 1);
    assert_eq!(time_step(599, MAX_PERIOD).unwrap(), 0);
    for period in [0, MAX_PERIOD + 1] {
        assert!(matches!(
            time_step(100, period),
            Err(CryptoError::Configuration(_))
        ));
    }
}

#[test]
fn empty_secret_rejected() {
    assert!(matches!(
        generate_totp(b"", 0, OtpDigits::Six, 30, OtpAlgorithm::Sha1),
        Err(CryptoError::Otp(_))
    ));
    assert!(Hotp::new(b"", 0, OtpDigits::Six, OtpAlgorithm::Sha1).is_err());
}

#[test]
fn random_hotp_roundtrip() {
    let mut hotp = Hotp::random(OtpDigits::Eight, OtpAlgorithm::Sha512).unwrap();
    assert_eq!(hotp.key().len(), RANDOM_KEY_LEN);
    assert_eq!(hotp.counter(), 0);

    let code = hotp.next_code().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(hotp.counter(), 1);
    assert!(hotp.verify(&code, 1).unwrap());
}

#[test]
fn totp_config_serde() {
    let json = r#"{"algorithm":"sha256","digits":8,"period":60}"#;
    let config: TotpConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.algorithm, OtpAlgorithm::Sha256);
    assert_eq!(config.digits, OtpDigits::Eight);
    assert_eq!(config.period, 60);
    assert_eq!(config.skew, SkewWindow::default());

    let back: TotpConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(back, config);

    assert!(serde_json::from_str::<TotpConfig>(r#"{"digits":5}"#).is_err());
}

#[test]
fn generate_now_has_configured_width() {
    let config = TotpConfig::default();
    let code = config.generate_now(SECRET).unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_digit()));
}
