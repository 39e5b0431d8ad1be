//! Identity extraction from the opaque bearer credential.
//!
//! The token's payload segment is decoded and read for display claims
//! only. No signature verification happens here: trust is delegated
//! entirely to the backend, which rejects bad credentials with 401.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use tracing::warn;

/// The caller's identity as claimed by the bearer token. Both fields are
/// empty when no usable token is present; callers treat that as "not
/// authenticated" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
}

impl Identity {
    /// Best-effort decode of the token's middle (payload) segment. A
    /// missing or malformed token yields an empty identity, never an
    /// error: the backend is the authority on whether the token works.
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::default();
        };
        let Some(payload) = token.split('.').nth(1) else {
            warn!("bearer token has no payload segment");
            return Self::default();
        };
        let Some(bytes) = decode_segment(payload) else {
            warn!("bearer token payload is not valid base64");
            return Self::default();
        };
        let Ok(claims) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            warn!("bearer token payload is not valid JSON");
            return Self::default();
        };

        Self {
            user_id: string_claim(&claims, "nameid"),
            user_name: string_claim(&claims, "unique_name"),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.user_id.is_empty()
    }
}

/// JWT segments are URL-safe base64 without padding, but some issuers
/// emit the standard alphabet. Accept either.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let segment = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD_NO_PAD.decode(segment))
        .ok()
}

/// Numeric ids arrive as either strings or numbers depending on the
/// backend revision.
fn string_claim(claims: &serde_json::Value, name: &str) -> String {
    match claims.get(name) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
