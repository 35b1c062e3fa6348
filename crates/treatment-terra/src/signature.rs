//! Terra webhook signature verification.
//!
//! Signatures arrive as `terra-signature: t=<unix seconds>,v1=<hex hmac>`.
//! The HMAC-SHA256 is computed over `"{t}.{body}"` with the developer
//! signing secret. The timestamp bound limits replay of captured requests.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::TerraError;

type HmacSha256 = Hmac<Sha256>;

/// How far a signature timestamp may drift from `now`, either direction.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Verify a webhook signature header against the raw request body.
///
/// `now` is passed in rather than read from the clock so verification is
/// deterministic under test.
pub fn verify(
    secret: &str,
    header: &str,
    body: &str,
    now: DateTime<Utc>,
    tolerance_secs: i64,
) -> Result<(), TerraError> {
    let (timestamp, signature_hex) = parse_header(header)?;

    let age = (now.timestamp() - timestamp).abs();
    if age > tolerance_secs {
        return Err(TerraError::StaleTimestamp);
    }

    let expected = hex::decode(signature_hex).map_err(|_| TerraError::MalformedHeader)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| TerraError::MalformedHeader)?;
    mac.update(format!("{timestamp}.{body}").as_bytes());

    // verify_slice is constant-time.
    mac.verify_slice(&expected)
        .map_err(|_| TerraError::SignatureMismatch)
}

fn parse_header(header: &str) -> Result<(i64, &str), TerraError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse::<i64>().map_err(|_| TerraError::MalformedHeader)?);
            }
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(v1)) if !v1.is_empty() => Ok((t, v1)),
        _ => Err(TerraError::MalformedHeader),
    }
}
