//! Enrollment → storage → verification, as a caller drives it.

use std::thread;

use passgate_core::encoding;
use passgate_core::verifier::{enroll, verify};
use passgate_core::{Enrollment, Passphrase, VerifierError, KEY_LEN, SALT_LEN};

/// The canonical scenario: enroll "Secr3t!", then verify the right
/// passphrase, a wrong one, and a corrupted stored hash.
#[test]
fn secr3t_scenario() {
    let Enrollment { salt, hash } = enroll("Secr3t!".into()).expect("enroll should succeed");

    assert_eq!(
        encoding::decode(&salt, encoding::SALT_FIELD).expect("salt decodes").len(),
        SALT_LEN
    );

    assert!(verify("Secr3t!".into(), &salt, &hash).expect("verify should succeed"));
    assert!(!verify("wrong".into(), &salt, &hash).expect("mismatch is not an error"));

    let err = verify("Secr3t!".into(), &salt, "not-base64")
        .expect_err("corrupted hash must be an error, not false");
    assert!(matches!(err, VerifierError::MalformedEncoding { .. }));
}

#[test]
fn caller_string_is_wiped_after_enrollment_and_verification() {
    let mut typed = String::from("Secr3t!");
    let enrollment = enroll(Passphrase::take(&mut typed)).expect("enroll should succeed");
    assert!(typed.is_empty());

    let mut typed_again = String::from("Secr3t!");
    let ok = enrollment
        .verify(Passphrase::take(&mut typed_again))
        .expect("verify should succeed");
    assert!(ok);
    assert!(typed_again.is_empty());
}

#[test]
fn char_buffer_input_verifies() {
    let enrollment = enroll(Passphrase::from_chars("Secr3t!".chars().collect()))
        .expect("enroll should succeed");
    let chars: Vec<char> = vec!['S', 'e', 'c', 'r', '3', 't', '!'];
    assert!(enrollment.verify(chars.into()).expect("verify should succeed"));
}

#[test]
fn enrollment_survives_json_storage() {
    let enrollment = enroll("Secr3t!".into()).expect("enroll should succeed");
    let stored = serde_json::to_string(&enrollment).expect("serialize should succeed");
    let loaded: Enrollment = serde_json::from_str(&stored).expect("deserialize should succeed");
    assert!(loaded.verify("Secr3t!".into()).expect("verify should succeed"));
}

#[test]
fn tampered_hash_is_rejected() {
    let enrollment = enroll("Secr3t!".into()).expect("enroll should succeed");
    let mut raw = encoding::decode(&enrollment.hash, encoding::HASH_FIELD).expect("decode");
    assert_eq!(raw.len(), KEY_LEN);
    raw[0] ^= 0x01;
    let tampered = encoding::encode(&raw);
    assert!(!verify("Secr3t!".into(), &enrollment.salt, &tampered).expect("verify"));
}

#[test]
fn tampered_salt_is_rejected() {
    let enrollment = enroll("Secr3t!".into()).expect("enroll should succeed");
    let mut raw = encoding::decode(&enrollment.salt, encoding::SALT_FIELD).expect("decode");
    raw[SALT_LEN - 1] ^= 0x80;
    let tampered = encoding::encode(&raw);
    assert!(!verify("Secr3t!".into(), &tampered, &enrollment.hash).expect("verify"));
}

/// Concurrent verifications share nothing and need no locking.
#[test]
fn concurrent_verifications_are_independent() {
    let users: Vec<(String, Enrollment)> = (0..4)
        .map(|i| {
            let pass = format!("user-{i}-pass");
            let enrollment = enroll(pass.as_str().into()).expect("enroll should succeed");
            (pass, enrollment)
        })
        .collect();

    let handles: Vec<_> = users
        .into_iter()
        .map(|(pass, enrollment)| {
            thread::spawn(move || {
                let right = enrollment.verify(pass.into()).expect("verify");
                let wrong = enrollment.verify("nope".into()).expect("verify");
                (right, wrong)
            })
        })
        .collect();

    for handle in handles {
        let (right, wrong) = handle.join().expect("thread should not panic");
        assert!(right);
        assert!(!wrong);
    }
}
