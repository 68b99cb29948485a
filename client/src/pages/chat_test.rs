use super::*;

// =============================================================
// greeting
// =============================================================

#[test]
fn greeting_uses_username_when_known() {
    assert_eq!(greeting(Some("alice")), "Welcome back, alice!");
}

#[test]
fn greeting_falls_back_without_username() {
    assert_eq!(greeting(Some("")), "Welcome back!");
    assert_eq!(greeting(None), "Welcome back!");
}

// =============================================================
// bubble_class
// =============================================================

#[test]
fn bubbles_distinguish_speaker_and_failure() {
    assert!(bubble_class(Speaker::User, false).ends_with("--user"));
    assert!(bubble_class(Speaker::Bot, false).ends_with("--bot"));
    assert!(bubble_class(Speaker::Bot, true).ends_with("--error"));
}
