//! HubSpot webhook signature validation.
//!
//! HubSpot signs the raw request body with HMAC-SHA256 and sends the
//! hex digest in `X-HubSpot-Signature`. Comparison is constant-time.
//! When no real secret is configured the check is disabled; config
//! loading already filters out the shipped placeholder value.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Validate a webhook request body against its signature header.
///
/// Returns `true` when the signature matches, or when `secret` is
/// `None` (validation disabled).
#[must_use]
pub fn validate_signature(secret: Option<&str>, body: &[u8], signature: Option<&str>) -> bool {
    let Some(secret) = secret else {
        warn!("webhook signature validation is disabled; no secret configured");
        return true;
    };
    let Some(signature) = signature else {
        return false;
    };

    let expected = hex_hmac(secret, body);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

fn hex_hmac(secret: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so new_from_slice cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_signature_passes() {
        let body = br#"[{"objectId": 1}]"#;
        let signature = hex_hmac("s3cret", body);
        assert!(validate_signature(Some("s3cret"), body, Some(&signature)));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = br#"[{"objectId": 1}]"#;
        let signature = hex_hmac("other", body);
        assert!(!validate_signature(Some("s3cret"), body, Some(&signature)));
    }

    #[test]
    fn tampered_body_fails() {
        let signature = hex_hmac("s3cret", b"original");
        assert!(!validate_signature(Some("s3cret"), b"tampered", Some(&signature)));
    }

    #[test]
    fn missing_header_fails_when_secret_is_set() {
        assert!(!validate_signature(Some("s3cret"), b"body", None));
    }

    #[test]
    fn no_secret_disables_validation() {
        assert!(validate_signature(None, b"body", None));
        assert!(validate_signature(None, b"body", Some("junk")));
    }
}
