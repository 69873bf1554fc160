//! Ed25519 request authentication
//!
//! Callers sign `timestamp || body` and send the hex signature and the
//! timestamp in headers. Verification happens on the raw body bytes before
//! anything is parsed.

use ed25519_dalek::{Signature, Verifier as _, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Signature header name
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Timestamp header name
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Authentication failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Required header absent
    #[error("missing header {0}")]
    MissingHeader(&'static str),

    /// Signature header is not 64 hex-encoded bytes
    #[error("malformed signature")]
    MalformedSignature,

    /// Signature does not match the message
    #[error("invalid request signature")]
    InvalidSignature,

    /// Timestamp is not a Unix time in seconds
    #[error("malformed timestamp")]
    MalformedTimestamp,

    /// Timestamp outside the allowed clock skew
    #[error("stale request timestamp")]
    StaleTimestamp,

    /// Configured public key is unusable
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Verifies signed requests against one public key
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
    max_skew: Option<Duration>,
}

impl SignatureVerifier {
    /// Create verifier from a key
    #[inline]
    #[must_use]
    pub fn new(key: VerifyingKey) -> Self {
        Self {
            key,
            max_skew: None,
        }
    }

    /// Parse a hex-encoded public key
    ///
    /// # Errors
    /// `AuthError::InvalidPublicKey` if it is not 32 hex bytes of a valid point.
    pub fn from_hex(public_key: &str) -> Result<Self, AuthError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| AuthError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            AuthError::InvalidPublicKey(format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", b.len()))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| AuthError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(key))
    }

    /// Reject timestamps further than `skew` from now
    #[inline]
    #[must_use]
    pub fn with_max_skew(mut self, skew: Duration) -> Self {
        self.max_skew = Some(skew);
        self
    }

    /// Verify headers and body against the current clock
    ///
    /// # Errors
    /// Any `AuthError` except `InvalidPublicKey`.
    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.verify_at(signature, timestamp, body, now)
    }

    /// Verify with an explicit current time in Unix seconds
    ///
    /// # Errors
    /// Any `AuthError` except `InvalidPublicKey`.
    pub fn verify_at(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
        now: u64,
    ) -> Result<(), AuthError> {
        let signature = signature.ok_or(AuthError::MissingHeader(SIGNATURE_HEADER))?;
        let timestamp = timestamp.ok_or(AuthError::MissingHeader(TIMESTAMP_HEADER))?;

        let raw = hex::decode(signature.trim()).map_err(|_| AuthError::MalformedSignature)?;
        let raw: [u8; SIGNATURE_LENGTH] =
            raw.try_into().map_err(|_| AuthError::MalformedSignature)?;
        let signature = Signature::from_bytes(&raw);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);
        self.key
            .verify(&message, &signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        if let Some(skew) = self.max_skew {
            let sent: u64 = timestamp
                .trim()
                .parse()
                .map_err(|_| AuthError::MalformedTimestamp)?;
            if now.abs_diff(sent) > skew.as_secs() {
                return Err(AuthError::StaleTimestamp);
            }
        }
        Ok(())
    }
}
