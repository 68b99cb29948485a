use super::*;

fn reply(message: &str, session_id: Option<&str>) -> ChatResponse {
    ChatResponse {
        message: message.to_owned(),
        recommendations: vec![Recipe {
            id: Some(3),
            title: "Soup".to_owned(),
            image: None,
            ingredients: vec!["water".to_owned()],
            instructions: String::new(),
            ready_in_minutes: 20,
            servings: 2,
        }],
        session_id: session_id.map(str::to_owned),
        timestamp: None,
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn log_opens_with_welcome_in_online_mode() {
    let log = ChatLog::default();
    assert_eq!(log.messages.len(), 1);
    assert_eq!(log.messages[0].speaker, Speaker::Bot);
    assert_eq!(log.messages[0].text, WELCOME);
    assert_eq!(log.mode, ChatMode::Online);
    assert!(!log.loading);
}

// =============================================================
// begin
// =============================================================

#[test]
fn begin_ignores_blank_input() {
    let mut log = ChatLog::default();
    assert_eq!(log.begin("   "), None);
    assert_eq!(log.messages.len(), 1);
}

#[test]
fn begin_trims_and_marks_loading() {
    let mut log = ChatLog::default();
    log.mode = ChatMode::Rag;
    let request = log.begin("  pasta?  ").expect("request");
    assert_eq!(request.query, "pasta?");
    assert_eq!(request.mode, ChatMode::Rag);
    assert_eq!(request.session_id, None);
    assert!(log.loading);
    assert_eq!(log.messages[1], ChatMessage::user("pasta?"));
}

#[test]
fn begin_refuses_while_reply_pending() {
    let mut log = ChatLog::default();
    assert!(log.begin("first").is_some());
    assert_eq!(log.begin("second"), None);
    assert_eq!(log.messages.len(), 2);
}

// =============================================================
// receive / fail
// =============================================================

#[test]
fn receive_threads_session_id_into_next_request() {
    let mut log = ChatLog::default();
    log.begin("first");
    log.receive(reply("Try soup.", Some("conv-1")));
    assert!(!log.loading);
    assert_eq!(log.messages[2].recipes.len(), 1);

    let next = log.begin("and then?").expect("request");
    assert_eq!(next.session_id.as_deref(), Some("conv-1"));
}

#[test]
fn receive_without_session_id_keeps_previous() {
    let mut log = ChatLog::default();
    log.session_id = Some("conv-1".to_owned());
    log.begin("q");
    log.receive(reply("a", None));
    assert_eq!(log.session_id.as_deref(), Some("conv-1"));
}

#[test]
fn fail_appends_apology_and_unlocks() {
    let mut log = ChatLog::default();
    log.begin("q");
    log.fail();
    let last = log.messages.last().expect("message");
    assert!(last.failed);
    assert_eq!(last.text, FAILURE);
    assert!(log.begin("again").is_some());
}
