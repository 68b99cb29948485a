use super::*;

#[test]
fn endpoint_joins_base_url() {
    assert!(endpoint("/users/me").ends_with("/users/me"));
    assert!(!endpoint("/users/me").contains("//users"));
}

#[test]
fn bearer_formats_authorization_header() {
    assert_eq!(bearer("a.b.c"), "Bearer a.b.c");
}

#[test]
fn http_error_prefers_backend_detail() {
    assert_eq!(
        http_error(401, r#"{"detail":"Invalid credentials"}"#),
        ApiError::Http {
            status: 401,
            detail: "Invalid credentials".to_owned(),
        }
    );
}

#[test]
fn http_error_falls_back_to_status() {
    let err = http_error(500, "<html>oops</html>");
    assert_eq!(err.to_string(), "request failed: 500");
}

#[test]
fn authed_error_maps_401_to_unauthorized() {
    assert_eq!(authed_error(401, r#"{"detail":"Could not validate credentials"}"#), ApiError::Unauthorized);
    assert!(matches!(authed_error(400, r#"{"detail":"Old password incorrect"}"#), ApiError::Http { status: 400, .. }));
}

#[test]
fn api_error_messages_are_user_facing() {
    assert_eq!(ApiError::Unauthorized.to_string(), "your session is no longer valid");
    assert_eq!(
        ApiError::Network("timeout".to_owned()).to_string(),
        "could not reach the server: timeout"
    );
}

// =============================================================
// Paths
// =============================================================

#[test]
fn chat_path_follows_mode() {
    assert_eq!(chat_path(ChatMode::Rule), "/chat/rule");
    assert_eq!(chat_path(ChatMode::Rag), "/chat/rag");
    assert_eq!(chat_path(ChatMode::Online), "/chat/online");
}

#[test]
fn item_paths_embed_ids() {
    assert_eq!(favorite_path(12), "/favorites/12");
    assert_eq!(pantry_item_path(3), "/pantry/3");
}
