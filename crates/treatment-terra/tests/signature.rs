use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use treatment_terra::error::TerraError;
use treatment_terra::signature::{verify, DEFAULT_TOLERANCE_SECS};

const SECRET: &str = "terra-signing-secret";
const BODY: &str = r#"{"type":"activity","user":{"user_id":"u1"},"data":[]}"#;

fn sign(secret: &str, timestamp: i64, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.{body}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn valid_signature_verifies() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let t = now.timestamp();
    let header = format!("t={t},v1={}", sign(SECRET, t, BODY));

    assert!(verify(SECRET, &header, BODY, now, DEFAULT_TOLERANCE_SECS).is_ok());
}

#[test]
fn wrong_secret_is_a_mismatch() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let t = now.timestamp();
    let header = format!("t={t},v1={}", sign("other-secret", t, BODY));

    assert!(matches!(
        verify(SECRET, &header, BODY, now, DEFAULT_TOLERANCE_SECS),
        Err(TerraError::SignatureMismatch)
    ));
}

#[test]
fn tampered_body_is_a_mismatch() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let t = now.timestamp();
    let header = format!("t={t},v1={}", sign(SECRET, t, BODY));

    assert!(matches!(
        verify(SECRET, &header, "{}", now, DEFAULT_TOLERANCE_SECS),
        Err(TerraError::SignatureMismatch)
    ));
}

#[test]
fn stale_timestamp_is_rejected_even_with_valid_hmac() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let t = now.timestamp() - DEFAULT_TOLERANCE_SECS - 1;
    let header = format!("t={t},v1={}", sign(SECRET, t, BODY));

    assert!(matches!(
        verify(SECRET, &header, BODY, now, DEFAULT_TOLERANCE_SECS),
        Err(TerraError::StaleTimestamp)
    ));
}

#[test]
fn timestamp_within_tolerance_passes() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let t = now.timestamp() - DEFAULT_TOLERANCE_SECS + 10;
    let header = format!("t={t},v1={}", sign(SECRET, t, BODY));

    assert!(verify(SECRET, &header, BODY, now, DEFAULT_TOLERANCE_SECS).is_ok());
}

#[test]
fn malformed_headers_are_rejected() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    for header in ["", "t=123", "v1=abcd", "t=notanumber,v1=abcd", "t=123,v1="] {
        assert!(
            matches!(
                verify(SECRET, header, BODY, now, DEFAULT_TOLERANCE_SECS),
                Err(TerraError::MalformedHeader)
            ),
            "header {header:?} should be malformed"
        );
    }
}

#[test]
fn non_hex_signature_is_malformed_not_a_mismatch() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let header = format!("t={},v1=nothex!", now.timestamp());

    assert!(matches!(
        verify(SECRET, &header, BODY, now, DEFAULT_TOLERANCE_SECS),
        Err(TerraError::MalformedHeader)
    ));
}
