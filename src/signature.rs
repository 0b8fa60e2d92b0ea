//! Verification of the `X-Hub-Signature-256` header sent with webhook events.

use hmac::{Hmac, Mac};
use log::warn;
use sha2::Sha256;

use crate::error::{BridgeError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Check `header` (`sha256=<hex>`) against HMAC-SHA256 of the raw request body.
///
/// A missing header is let through with a warning. Must be called on the bytes
/// exactly as received, before any JSON parsing.
pub fn verify_request_signature(
    app_secret: &str,
    header: Option<&str>,
    body: &[u8],
) -> Result<()> {
    let Some(header) = header else {
        warn!("No {SIGNATURE_HEADER} header found on webhook request");
        return Ok(());
    };

    // The platform sends the lower-case hex digest; any other spelling is a mismatch.
    let expected = header
        .strip_prefix("sha256=")
        .filter(|hex_digest| is_lower_hex(hex_digest))
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
        .ok_or(BridgeError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|_| BridgeError::InvalidSignature)?;
    mac.update(body);
    mac.verify_slice(&expected).map_err(|_| BridgeError::InvalidSignature)
}

fn is_lower_hex(digest: &str) -> bool {
    digest
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "app-secret";

    fn sign(body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn matching_signature_passes() {
        let body = br#"{"object":"whatsapp_business_account"}"#;
        let header = sign(body);
        assert!(verify_request_signature(SECRET, Some(&header), body).is_ok());
    }

    #[test]
    fn missing_header_passes() {
        assert!(verify_request_signature(SECRET, None, b"anything").is_ok());
    }

    #[test]
    fn wrong_digest_is_rejected() {
        let header = format!("sha256={}", "ab".repeat(32));
        let result = verify_request_signature(SECRET, Some(&header), b"payload");
        assert!(matches!(result, Err(BridgeError::InvalidSignature)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let body = b"payload";
        let header = sign(body);
        let result = verify_request_signature("other-secret", Some(&header), body);
        assert!(matches!(result, Err(BridgeError::InvalidSignature)));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let body = b"payload";
        let digest = sign(body);
        let bare = digest.trim_start_matches("sha256=");
        for header in [bare, "sha256=not-hex", "sha256=", ""] {
            let result = verify_request_signature(SECRET, Some(header), body);
            assert!(
                matches!(result, Err(BridgeError::InvalidSignature)),
                "header {header:?} should be rejected"
            );
        }
    }

    #[test]
    fn upper_case_digest_is_rejected() {
        let body = b"payload";
        let header = sign(body).to_uppercase().replacen("SHA256=", "sha256=", 1);
        let result = verify_request_signature(SECRET, Some(&header), body);
        assert!(matches!(result, Err(BridgeError::InvalidSignature)));
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        let body = b"payload";
        for header in [format!(" {}", sign(body)), format!("{}\n", sign(body))] {
            let result = verify_request_signature(SECRET, Some(&header), body);
            assert!(matches!(result, Err(BridgeError::InvalidSignature)));
        }
    }

    #[test]
    fn reserialized_body_does_not_match() {
        let raw = br#"{"object": "whatsapp_business_account",  "entry": []}"#;
        let header = sign(raw);
        let value: serde_json::Value = serde_json::from_slice(raw).unwrap();
        let reserialized = serde_json::to_vec(&value).unwrap();
        assert!(verify_request_signature(SECRET, Some(&header), &reserialized).is_err());
    }
}
