//! Access-token payload decoding.
//!
//! Tokens are opaque signed JWTs. The client decodes the payload — without
//! verifying the signature — solely to extract the `role` claim for routing.
//! The claim is never treated as an authorization proof; the server re-checks
//! authorization on every request.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::state::session::Role;

/// Claims this client cares about. Everything else in the payload is ignored.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode the payload segment of a compact token.
///
/// Returns `None` for anything that is not `header.payload.signature` with a
/// base64url JSON payload. Leading/trailing whitespace is tolerated since the
/// login endpoint returns the token as a bare string.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.trim().split('.').nth(1)?;
    // Some issuers pad the segment; the decoder expects no padding.
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extract and normalize the role claim, if the token carries a usable one.
pub fn role_from_token(token: &str) -> Option<Role> {
    decode_claims(token)?.role.as_deref().and_then(Role::parse)
}
