//! Stripe webhook signature verification.
//!
//! Implements Stripe's `t=<ts>,v1=<sig>` scheme with HMAC-SHA256 over
//! `"{ts}." ++ raw_body`, plus timestamp validation against replays.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::StripeEvent;
use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every v1 signature (Stripe sends several while a secret is being rolled).
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>][,v0=<legacy>]`
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` if no timestamp or no decodable
    /// v1 signature is present.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(WebhookError::MalformedHeader)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| WebhookError::MalformedHeader)?,
                    );
                }
                "v1" => {
                    // Undecodable candidates can never match; skip them like the SDKs do.
                    if let Ok(sig) = hex::decode(value.trim()) {
                        v1_signatures.push(sig);
                    }
                }
                _ => {
                    // v0 and unknown schemes are ignored for forward compatibility
                }
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::MalformedHeader);
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
#[derive(Clone)]
pub struct StripeWebhookVerifier {
    /// The webhook signing secret from the Stripe dashboard, used verbatim as the key.
    secret: String,
}

impl StripeWebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature and parses the event, like the SDK's `constructEvent`.
    ///
    /// # Errors
    ///
    /// - `MissingSecret` - no signing secret configured
    /// - `MissingHeader` - header absent or blank
    /// - `MalformedHeader` - header lacks a timestamp or v1 signature
    /// - `TimestampOutOfRange` - older than 5 minutes or too far in the future
    /// - `InvalidSignature` - no v1 signature matched
    /// - `ParseError` - body is not a Stripe event
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<StripeEvent, WebhookError> {
        self.construct_event_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    fn construct_event_at(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        now: i64,
    ) -> Result<StripeEvent, WebhookError> {
        if self.secret.trim().is_empty() {
            return Err(WebhookError::MissingSecret);
        }

        let raw_header = match signature_header.map(str::trim) {
            Some(h) if !h.is_empty() => h,
            _ => return Err(WebhookError::MissingHeader),
        };

        let header = SignatureHeader::parse(raw_header)?;

        self.validate_timestamp(header.timestamp, now)?;

        let expected = self.compute_signature(header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Validates that the timestamp is within acceptable bounds.
    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), WebhookError> {
        let Some(age) = now.checked_sub(timestamp) else {
            tracing::warn!(
                event_timestamp = timestamp,
                current_time = now,
                "Stripe webhook timestamp not representable"
            );
            return Err(WebhookError::TimestampOutOfRange);
        };

        if age > MAX_EVENT_AGE_SECS || age < -MAX_CLOCK_SKEW_SECS {
            tracing::warn!(
                event_timestamp = timestamp,
                current_time = now,
                age_secs = age,
                "Stripe webhook timestamp outside tolerance"
            );
            return Err(WebhookError::TimestampOutOfRange);
        }

        Ok(())
    }

    /// Computes the HMAC-SHA256 signature for the given timestamp and payload.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        sign_payload(&self.secret, timestamp, payload)
    }
}

fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a valid `Stripe-Signature` header value for `payload`.
///
/// Used by tests and local tooling that replay captured events.
pub fn stripe_signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(sign_payload(secret, timestamp, payload))
    )
}
