//! Token builders for unit tests.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

/// Wall-clock reference used across tests: 2024-01-01T00:00:00Z.
pub const NOW_MS: i64 = 1_704_067_200_000;

/// Build an unsigned three-segment token carrying `claims`.
pub fn unsigned_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// Token for user `alice` expiring `offset_secs` after [`NOW_MS`].
pub fn token_expiring_in(offset_secs: i64) -> String {
    unsigned_token(&json!({
        "sub": "alice",
        "user_id": 7,
        "iat": NOW_MS / 1000 - 60,
        "exp": NOW_MS / 1000 + offset_secs,
    }))
}
