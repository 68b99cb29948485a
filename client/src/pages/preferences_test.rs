use super::*;

// =============================================================
// save_message
// =============================================================

#[test]
fn save_message_confirms_success() {
    assert_eq!(save_message(&Ok(Settings::default())), "Preferences saved.");
}

#[test]
fn save_message_is_silent_on_refusal() {
    assert_eq!(save_message(&Err(ApiError::Unauthorized)), "");
}

#[test]
fn save_message_reports_backend_detail() {
    let err = ApiError::Http {
        status: 422,
        detail: "bad list".to_owned(),
    };
    assert_eq!(save_message(&Err(err)), "Could not save preferences: bad list");
}
