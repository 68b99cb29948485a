//! Local, non-authoritative decoding of bearer-token claims.
//!
//! DESIGN
//! ======
//! The signature is never checked here. The backend remains the only party
//! that trusts the token; the client reads `exp` purely to decide when to stop
//! presenting a session as live. Every ambiguity resolves to "expired".

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// base64url, padding optional on input.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Number of dot-separated segments in a well-formed token.
const TOKEN_SEGMENTS: usize = 3;

/// Error returned by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The token has no claims segment.
    #[error("token has {found} segment(s), expected at least 2")]
    MissingClaims { found: usize },
    /// The claims segment is not base64url.
    #[error("claims segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded claims are not JSON.
    #[error("claims segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The decoded claims are JSON but not an object.
    #[error("claims segment is not a JSON object")]
    NotAnObject,
}

/// Decoded token payload.
///
/// Only `exp` is interpreted. Everything else is carried through untouched
/// so the identity snapshot can show whatever the backend chose to embed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry as Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Expiry in Unix milliseconds, saturating for absurd `exp` values.
    #[must_use]
    pub fn expires_at_ms(&self) -> Option<i64> {
        self.exp.map(|exp| exp.saturating_mul(1000))
    }

    /// The `sub` claim (the backend puts the username there).
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.extra.get("sub").and_then(Value::as_str)
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.extra.get("user_id").and_then(Value::as_i64)
    }

    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.extra.get("iat").and_then(Value::as_i64)
    }
}

/// Why the guard refuses a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No token stored.
    Missing,
    /// A token is stored but is not three segments, cannot be decoded, or lacks `exp`.
    Malformed,
    /// `exp` is at or before the current time.
    Expired,
    /// The backend answered 401 for the stored token.
    Rejected,
}

impl DenyReason {
    /// User-visible notice shown once per denial.
    #[must_use]
    pub fn notice(self) -> &'static str {
        match self {
            Self::Missing => "Please sign in to continue.",
            Self::Malformed | Self::Expired => "Your session has expired. Please sign in again.",
            Self::Rejected => "Your session is no longer valid. Please sign in again.",
        }
    }
}

/// Derived session state; computed on demand, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Active,
    Expired,
}

/// Decode the claims segment of `token`.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token has fewer than two segments, the
/// middle segment is not base64url, or it does not hold a JSON object.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let Some(payload) = token.split('.').nth(1) else {
        return Err(DecodeError::MissingClaims {
            found: token.split('.').count(),
        });
    };

    let bytes = CLAIMS_ENGINE.decode(payload)?;
    let value: Value = serde_json::from_slice(&bytes)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Decide whether `token` is a live session at `now_ms`.
///
/// Returns the decoded claims when live, otherwise the reason it is not.
///
/// # Errors
///
/// Returns the [`DenyReason`] for an absent, malformed, or lapsed token.
pub fn evaluate(token: Option<&str>, now_ms: i64) -> Result<Claims, DenyReason> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(DenyReason::Missing),
    };

    let segments = token.split('.').count();
    if segments != TOKEN_SEGMENTS {
        log::warn!("session: stored token has {segments} segment(s)");
        return Err(DenyReason::Malformed);
    }

    let claims = match decode(token) {
        Ok(claims) => claims,
        Err(e) => {
            log::warn!("session: token decode error: {e}");
            return Err(DenyReason::Malformed);
        }
    };

    let Some(expires_at) = claims.expires_at_ms() else {
        log::warn!("session: token has no exp claim");
        return Err(DenyReason::Malformed);
    };
    if expires_at <= now_ms {
        return Err(DenyReason::Expired);
    }
    Ok(claims)
}

/// `true` unless `token` is a well-formed, unexpired token at `now_ms`.
#[must_use]
pub fn is_expired(token: Option<&str>, now_ms: i64) -> bool {
    evaluate(token, now_ms).is_err()
}

/// Milliseconds until `exp`, zero when lapsed or unreadable. Display only.
#[must_use]
pub fn milliseconds_remaining(token: Option<&str>, now_ms: i64) -> u64 {
    evaluate(token, now_ms)
        .ok()
        .and_then(|claims| claims.expires_at_ms())
        .map_or(0, |expires_at| u64::try_from(expires_at.saturating_sub(now_ms)).unwrap_or(0))
}

/// Classify `token` at `now_ms`. Malformed tokens count as absent.
#[must_use]
pub fn session_state(token: Option<&str>, now_ms: i64) -> SessionState {
    match evaluate(token, now_ms) {
        Ok(_) => SessionState::Active,
        Err(DenyReason::Expired) => SessionState::Expired,
        Err(DenyReason::Missing | DenyReason::Malformed | DenyReason::Rejected) => SessionState::Anonymous,
    }
}

/// Render a countdown such as `"4 min 07 s"`.
#[must_use]
pub fn format_countdown(remaining_ms: u64) -> String {
    let minutes = remaining_ms / 60_000;
    let seconds = (remaining_ms % 60_000) / 1000;
    format!("{minutes} min {seconds:02} s")
}
