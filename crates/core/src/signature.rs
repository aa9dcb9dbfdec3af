//! Slack webhook signature verification.
//!
//! Implements the Events API signing scheme:
//! <https://api.slack.com/authentication/verifying-requests-from-slack>
//!
//! The verifier is a gate, not a transform: on success it hands back the
//! raw body unchanged so the caller can parse exactly the bytes that were
//! signed. It never inspects the JSON that follows.

use hmac::{Hmac, Mac};
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

/// Header carrying the request timestamp (seconds since epoch).
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";

/// Header carrying the presented signature (`v0=<hex digest>`).
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// Signature scheme version token.
const VERSION: &str = "v0";

/// Maximum allowed clock skew between the request timestamp and now.
///
/// Slack recommends rejecting requests older than five minutes to limit
/// replay of captured payloads.
const FRESHNESS_TOLERANCE_SECS: i64 = 300;

/// Reasons an inbound request fails verification.
///
/// `Display` output is safe to log: it never carries the signing secret
/// or the presented signature value.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// A required header is absent.
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    /// A header is present but not usable (non-UTF-8, non-numeric
    /// timestamp, or a signature without the version prefix).
    #[error("malformed header: {0}")]
    MalformedSignature(&'static str),

    /// The request timestamp is outside the freshness window.
    #[error("request timestamp outside freshness window")]
    StaleTimestamp,

    /// The recomputed digest does not match the presented signature.
    #[error("signature mismatch")]
    InvalidSignature,
}

/// Verifies inbound webhook requests against a shared signing secret.
///
/// Constructed once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct SignatureVerifier {
    signing_secret: SecretString,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("signing_secret", &"[REDACTED]")
            .finish()
    }
}

impl SignatureVerifier {
    /// Create a verifier for the given signing secret.
    #[must_use]
    pub const fn new(signing_secret: SecretString) -> Self {
        Self { signing_secret }
    }

    /// Verify a request, returning the raw body unchanged on success.
    ///
    /// Header lookup is case-insensitive. The digest is computed over the
    /// exact bytes `v0:{timestamp}:{body}`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] if a header is missing or malformed,
    /// the timestamp is stale, or the signature does not match.
    pub fn verify<'a>(
        &self,
        headers: &HeaderMap,
        body: &'a [u8],
    ) -> Result<&'a [u8], SignatureError> {
        self.verify_at(headers, body, now_unix())
    }

    /// Verification against an explicit clock, for tests.
    fn verify_at<'a>(
        &self,
        headers: &HeaderMap,
        body: &'a [u8],
        now: i64,
    ) -> Result<&'a [u8], SignatureError> {
        let timestamp = headers
            .get(TIMESTAMP_HEADER)
            .ok_or(SignatureError::MissingHeader(TIMESTAMP_HEADER))?
            .to_str()
            .map_err(|_| SignatureError::MalformedSignature(TIMESTAMP_HEADER))?;

        let presented = headers
            .get(SIGNATURE_HEADER)
            .ok_or(SignatureError::MissingHeader(SIGNATURE_HEADER))?
            .to_str()
            .map_err(|_| SignatureError::MalformedSignature(SIGNATURE_HEADER))?;

        let ts: i64 = timestamp
            .parse()
            .map_err(|_| SignatureError::MalformedSignature(TIMESTAMP_HEADER))?;

        if (now - ts).abs() > FRESHNESS_TOLERANCE_SECS {
            return Err(SignatureError::StaleTimestamp);
        }

        if !presented.starts_with("v0=") {
            return Err(SignatureError::MalformedSignature(SIGNATURE_HEADER));
        }

        let expected = self.compute(timestamp, body);

        if !constant_time_compare(&expected, presented) {
            return Err(SignatureError::InvalidSignature);
        }

        Ok(body)
    }

    /// Compute `v0=<hex digest>` for a timestamp and body.
    fn compute(&self, timestamp: &str, body: &[u8]) -> String {
        // HMAC keys of any length are valid for SHA-256.
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.signing_secret.expose_secret().as_bytes())
                .expect("HMAC accepts keys of any length");

        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);

        format!("{VERSION}={}", hex::encode(mac.finalize().into_bytes()))
    }
}

/// Current wall-clock time as seconds since the Unix epoch.
fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use http::HeaderValue;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(SecretString::from(SECRET.to_string()))
    }

    fn sign(timestamp: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("v0:{timestamp}:").as_bytes());
        mac.update(body);
        format!("v0={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn headers(timestamp: &str, signature: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(TIMESTAMP_HEADER, HeaderValue::from_str(timestamp).unwrap());
        h.insert(SIGNATURE_HEADER, HeaderValue::from_str(signature).unwrap());
        h
    }

    #[test]
    fn valid_signature_returns_body_unchanged() {
        let body = br#"{"type":"url_verification","challenge":"abc123"}"#;
        let ts = "1531420618";
        let h = headers(ts, &sign(ts, body));

        let out = verifier().verify_at(&h, body, 1_531_420_620).unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let body = b"payload";
        let ts = "1531420618";
        let sig = sign(ts, body);

        let mut h = HeaderMap::new();
        h.insert(
            "x-slack-request-timestamp",
            HeaderValue::from_str(ts).unwrap(),
        );
        h.insert("x-slack-signature", HeaderValue::from_str(&sig).unwrap());

        assert!(verifier().verify_at(&h, body, 1_531_420_618).is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let ts = "1531420618";
        let h = headers(ts, &sign(ts, b"original"));

        let result = verifier().verify_at(&h, b"originax", 1_531_420_618);
        assert!(matches!(result, Err(SignatureError::InvalidSignature)));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let body = b"payload";
        let ts = "1531420618";
        let mut sig = sign(ts, body);
        // Flip the final hex digit.
        let last = if sig.ends_with('0') { '1' } else { '0' };
        sig.pop();
        sig.push(last);
        let h = headers(ts, &sig);

        let result = verifier().verify_at(&h, body, 1_531_420_618);
        assert!(matches!(result, Err(SignatureError::InvalidSignature)));
    }

    #[test]
    fn missing_timestamp_header_fails_before_comparison() {
        let mut h = HeaderMap::new();
        h.insert(SIGNATURE_HEADER, HeaderValue::from_static("v0=deadbeef"));

        let result = verifier().verify_at(&h, b"body", 0);
        assert!(matches!(
            result,
            Err(SignatureError::MissingHeader(TIMESTAMP_HEADER))
        ));
    }

    #[test]
    fn missing_signature_header_fails_before_comparison() {
        let mut h = HeaderMap::new();
        h.insert(TIMESTAMP_HEADER, HeaderValue::from_static("1531420618"));

        let result = verifier().verify_at(&h, b"body", 1_531_420_618);
        assert!(matches!(
            result,
            Err(SignatureError::MissingHeader(SIGNATURE_HEADER))
        ));
    }

    #[test]
    fn non_numeric_timestamp_is_malformed() {
        let h = headers("not-a-number", "v0=deadbeef");

        let result = verifier().verify_at(&h, b"body", 0);
        assert!(matches!(
            result,
            Err(SignatureError::MalformedSignature(TIMESTAMP_HEADER))
        ));
    }

    #[test]
    fn signature_without_version_prefix_is_malformed() {
        let ts = "1531420618";
        let h = headers(ts, "deadbeef");

        let result = verifier().verify_at(&h, b"body", 1_531_420_618);
        assert!(matches!(
            result,
            Err(SignatureError::MalformedSignature(SIGNATURE_HEADER))
        ));
    }

    #[test]
    fn stale_timestamp_is_rejected_even_with_valid_digest() {
        let body = b"payload";
        let ts = "1531420618";
        let h = headers(ts, &sign(ts, body));

        // Ten minutes after the request was signed.
        let result = verifier().verify_at(&h, body, 1_531_420_618 + 600);
        assert!(matches!(result, Err(SignatureError::StaleTimestamp)));
    }

    #[test]
    fn future_timestamp_is_rejected() {
        let body = b"payload";
        let ts = "1531420618";
        let h = headers(ts, &sign(ts, body));

        let result = verifier().verify_at(&h, body, 1_531_420_618 - 600);
        assert!(matches!(result, Err(SignatureError::StaleTimestamp)));
    }

    #[test]
    fn debug_redacts_secret() {
        let out = format!("{:?}", verifier());
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains(SECRET));
    }

    #[test]
    fn constant_time_compare_basics() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
    }
}
