//! Access token inspection
//!
//! Tokens issued by the backend are JWTs, but nothing here verifies them; the
//! payload is only read to learn when the token expires.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
struct JwtPayload {
    exp: i64,
}

/// Read the `exp` claim of a JWT access token.
///
/// Returns `InvalidToken` when the token is not a three-part JWT or the
/// payload has no usable expiry.
pub fn expires_at(token: &str) -> Result<DateTime<Utc>, ApiError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidToken);
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|_| ApiError::InvalidToken)?;

    let payload: JwtPayload =
        serde_json::from_slice(&payload_bytes).map_err(|_| ApiError::InvalidToken)?;

    DateTime::from_timestamp(payload.exp, 0).ok_or(ApiError::InvalidToken)
}

/// True if the token is a JWT that expires within `buffer` from now.
///
/// Opaque tokens are never considered expiring; the backend's 401 is the
/// only signal for those.
pub fn expires_within(token: &str, buffer: chrono::Duration) -> bool {
    match expires_at(token) {
        Ok(exp) => exp - buffer < Utc::now(),
        Err(_) => false,
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user-1","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}
