//! crates/session_report_core/src/token.rs
//!
//! Stateless signed session tokens.
//!
//! A token is `base64url(payload-json) + "." + base64url(hmac-sha256(secret, data))`
//! where `data` is the first segment verbatim. Verification recomputes the
//! tag over the exact encoded bytes and compares in constant time. The server
//! keeps no session record, so the token is the whole session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::SessionPayload;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to serialize session payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Signs and verifies session tokens with a process-wide secret.
///
/// Pure: both operations are deterministic functions of their inputs and the
/// secret. The secret itself is configuration; loading it is the service's
/// problem, not this type's.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs a payload into a two-segment token.
    ///
    /// Re-signing the same payload yields a byte-identical token; `issued_at`
    /// is part of the payload, set once by the caller at login.
    pub fn sign(&self, payload: &SessionPayload) -> Result<String, TokenError> {
        let data = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload)?);
        let sig = URL_SAFE_NO_PAD.encode(self.mac(data.as_bytes()).finalize().into_bytes());
        Ok(format!("{data}.{sig}"))
    }

    /// Verifies a token, returning its payload.
    ///
    /// Every failure mode (missing separator, bad encoding, signature
    /// mismatch, non-JSON payload, missing routing fields) yields `None`;
    /// callers must treat that identically to an absent token.
    pub fn verify(&self, token: &str) -> Option<SessionPayload> {
        let (data, sig) = token.split_once('.')?;
        if data.is_empty() || sig.is_empty() {
            return None;
        }
        let sig = URL_SAFE_NO_PAD.decode(sig).ok()?;
        self.mac(data.as_bytes()).verify_slice(&sig).ok()?;
        let json = URL_SAFE_NO_PAD.decode(data).ok()?;
        let payload: SessionPayload = serde_json::from_slice(&json).ok()?;
        if payload.sheet_id.trim().is_empty() || payload.tab_name.trim().is_empty() {
            return None;
        }
        Some(payload)
    }

    fn mac(&self, data: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(data);
        mac
    }
}
