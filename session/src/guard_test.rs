use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::clock::ManualClock;
use crate::store::MemoryStorage;
use crate::test_support::{NOW_MS, token_expiring_in, unsigned_token};

struct Harness {
    storage: Rc<MemoryStorage>,
    clock: Rc<ManualClock>,
    events: Rc<RefCell<Vec<SessionEvent>>>,
    guard: SessionGuard<Rc<MemoryStorage>, Rc<ManualClock>>,
}

fn harness() -> Harness {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(NOW_MS));
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut guard = SessionGuard::new(Rc::clone(&storage), Rc::clone(&clock));
    let sink = Rc::clone(&events);
    guard.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    Harness {
        storage,
        clock,
        events,
        guard,
    }
}

fn store_token(h: &Harness, token: &str) {
    h.guard.store().set_token(token).expect("set token");
}

fn logouts(h: &Harness) -> Vec<LogoutReason> {
    h.events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            SessionEvent::LoggedOut { reason } => Some(*reason),
            SessionEvent::Active { .. } => None,
        })
        .collect()
}

// =============================================================
// evaluate (navigation)
// =============================================================

#[test]
fn expired_token_is_denied_cleared_and_redirected() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(-10));

    let access = h.guard.evaluate();

    assert_eq!(
        access,
        Access::Denied(Denial {
            reason: DenyReason::Expired,
            redirect_to: "/auth".to_owned(),
        })
    );
    assert!(h.guard.store().token().is_none());
    assert_eq!(logouts(&h), vec![LogoutReason::Denied(DenyReason::Expired)]);
}

#[test]
fn live_token_is_granted_with_remaining_time() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(3600));

    let access = h.guard.evaluate();

    assert_eq!(access, Access::Granted { remaining_ms: 3_600_000 });
    assert!(h.guard.store().token().is_some());
    assert!(logouts(&h).is_empty());
}

#[test]
fn empty_store_is_denied_as_missing() {
    let mut h = harness();

    let access = h.guard.evaluate();

    let Access::Denied(denial) = access else {
        panic!("expected denial");
    };
    assert_eq!(denial.reason, DenyReason::Missing);
    assert_eq!(denial.notice(), "Please sign in to continue.");
    assert_eq!(logouts(&h), vec![LogoutReason::Denied(DenyReason::Missing)]);
}

#[test]
fn malformed_token_is_treated_as_absent_and_removed() {
    let mut h = harness();
    store_token(&h, "definitely-not-a-token");
    h.storage.set("loggedInUser", r#"{"sub":"mallory"}"#).expect("set");

    let access = h.guard.evaluate();

    assert!(matches!(
        access,
        Access::Denied(Denial {
            reason: DenyReason::Malformed,
            ..
        })
    ));
    assert!(h.storage.is_empty());
}

#[test]
fn repeated_denials_notify_once_each_and_leave_same_state() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(-10));

    let first = h.guard.evaluate();
    let second = h.guard.evaluate();

    assert!(!first.is_granted());
    assert!(!second.is_granted());
    assert_eq!(
        logouts(&h),
        vec![
            LogoutReason::Denied(DenyReason::Expired),
            LogoutReason::Denied(DenyReason::Missing),
        ]
    );
    assert!(h.storage.is_empty());
}

#[test]
fn granted_navigation_publishes_identity() {
    let mut h = harness();
    h.guard.login(&token_expiring_in(120)).expect("login");
    h.events.borrow_mut().clear();

    h.guard.evaluate();

    let events = h.events.borrow();
    let Some(SessionEvent::Active { identity, remaining_ms }) = events.last() else {
        panic!("expected active event");
    };
    assert_eq!(identity.as_ref().and_then(|i| i.username.as_deref()), Some("alice"));
    assert_eq!(*remaining_ms, 120_000);
}

// =============================================================
// check_expiry (periodic)
// =============================================================

#[test]
fn periodic_check_denies_once_when_session_lapses_in_place() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(5));
    assert!(h.guard.evaluate().is_granted());

    h.clock.advance(4_000);
    assert_eq!(h.guard.check_expiry(), None);

    h.clock.advance(1_000);
    let denial = h.guard.check_expiry().expect("denial on lapse");
    assert_eq!(denial.reason, DenyReason::Expired);
    assert_eq!(denial.redirect_to, "/auth");
    assert!(h.guard.store().token().is_none());

    h.clock.advance(1_000);
    assert_eq!(h.guard.check_expiry(), None);
    assert_eq!(logouts(&h), vec![LogoutReason::Denied(DenyReason::Expired)]);
}

#[test]
fn periodic_check_publishes_countdown_while_live() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(60));
    h.guard.evaluate();
    h.events.borrow_mut().clear();

    h.clock.advance(1_000);
    h.guard.check_expiry();
    h.clock.advance(1_000);
    h.guard.check_expiry();

    let remaining: Vec<u64> = h
        .events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Active { remaining_ms, .. } => Some(*remaining_ms),
            SessionEvent::LoggedOut { .. } => None,
        })
        .collect();
    assert_eq!(remaining, vec![59_000, 58_000]);
}

#[test]
fn periodic_check_without_live_session_is_silent() {
    let mut h = harness();
    assert_eq!(h.guard.check_expiry(), None);
    store_token(&h, &token_expiring_in(-1));
    assert_eq!(h.guard.check_expiry(), None);
    assert!(h.events.borrow().is_empty());
}

#[test]
fn armed_watch_denies_session_that_lapsed_before_first_tick() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(1));
    h.guard.arm();

    h.clock.advance(2_000);

    let denial = h.guard.check_expiry().expect("denial");
    assert_eq!(denial.reason, DenyReason::Expired);
    assert_eq!(logouts(&h).len(), 1);
}

#[test]
fn periodic_check_denies_when_token_removed_elsewhere() {
    let mut h = harness();
    store_token(&h, &token_expiring_in(60));
    h.guard.evaluate();

    h.storage.remove("accessToken").expect("remove");

    let denial = h.guard.check_expiry().expect("denial");
    assert_eq!(denial.reason, DenyReason::Missing);
}

// =============================================================
// login / logout / reject
// =============================================================

#[test]
fn login_persists_token_and_identity() {
    let mut h = harness();
    let token = token_expiring_in(600);

    let identity = h.guard.login(&token).expect("login");

    assert_eq!(identity.username.as_deref(), Some("alice"));
    assert_eq!(h.guard.store().token().as_deref(), Some(token.as_str()));
    assert_eq!(h.guard.store().identity(), Some(identity));
    assert!(h.guard.is_active());
    assert_eq!(h.guard.active_token().as_deref(), Some(token.as_str()));
}

#[test]
fn login_rejects_expired_token_without_storing() {
    let mut h = harness();
    let err = h.guard.login(&token_expiring_in(-1)).unwrap_err();
    assert!(matches!(err, LoginError::AlreadyExpired));
    assert!(h.storage.is_empty());
}

#[test]
fn login_rejects_undecodable_token() {
    let mut h = harness();
    let err = h.guard.login("nope").unwrap_err();
    assert!(matches!(err, LoginError::Decode(_)));
    let err = h.guard.login(&unsigned_token(&serde_json::json!({"sub": "x"}))).unwrap_err();
    assert!(matches!(err, LoginError::Malformed));
    assert!(h.storage.is_empty());
}

#[test]
fn login_reports_storage_failure_and_leaves_nothing() {
    let mut h = harness();
    h.storage.set_available(false);
    let err = h.guard.login(&token_expiring_in(60)).unwrap_err();
    assert!(matches!(err, LoginError::Storage(StorageError::Unavailable)));
    h.storage.set_available(true);
    assert!(h.storage.is_empty());
}

#[test]
fn logout_clears_both_entries_without_notice() {
    let mut h = harness();
    h.guard.login(&token_expiring_in(60)).expect("login");

    h.guard.logout();

    assert!(h.guard.store().token().is_none());
    assert!(h.guard.store().identity().is_none());
    assert_eq!(logouts(&h), vec![LogoutReason::UserRequested]);
    let last = h.events.borrow().last().cloned().expect("event");
    assert_eq!(last.notice(), None);
}

#[test]
fn logout_stops_periodic_denials() {
    let mut h = harness();
    h.guard.login(&token_expiring_in(60)).expect("login");
    h.guard.logout();
    assert_eq!(h.guard.check_expiry(), None);
}

#[test]
fn reject_behaves_like_denial() {
    let mut h = harness();
    h.guard.login(&token_expiring_in(60)).expect("login");

    let denial = h.guard.reject();

    assert_eq!(denial.reason, DenyReason::Rejected);
    assert!(h.storage.is_empty());
    let last = h.events.borrow().last().cloned().expect("event");
    assert_eq!(last.notice(), Some(DenyReason::Rejected.notice()));
}

// =============================================================
// snapshot / state / subscriptions
// =============================================================

#[test]
fn snapshot_has_no_side_effects() {
    let h = harness();
    store_token(&h, &token_expiring_in(-5));

    let snapshot = h.guard.snapshot();

    assert_eq!(snapshot.state, SessionState::Expired);
    assert_eq!(snapshot.remaining_ms, 0);
    assert!(snapshot.identity.is_none());
    assert!(h.guard.store().token().is_some());
    assert!(h.events.borrow().is_empty());
}

#[test]
fn snapshot_of_live_session_includes_identity() {
    let mut h = harness();
    h.guard.login(&token_expiring_in(90)).expect("login");
    h.clock.advance(30_000);

    let snapshot = h.guard.snapshot();

    assert_eq!(snapshot.state, SessionState::Active);
    assert_eq!(snapshot.remaining_ms, 60_000);
    assert_eq!(snapshot.identity.and_then(|i| i.user_id), Some(7));
    assert_eq!(h.guard.milliseconds_remaining(), 60_000);
}

#[test]
fn unsubscribed_listener_stops_receiving() {
    let mut h = harness();
    let extra = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&extra);
    let id = h.guard.subscribe(move |_| *counter.borrow_mut() += 1);

    h.guard.evaluate();
    assert!(h.guard.unsubscribe(id));
    h.guard.evaluate();

    assert_eq!(*extra.borrow(), 1);
    assert!(!h.guard.unsubscribe(id));
    assert_eq!(logouts(&h).len(), 2);
}

#[test]
fn custom_config_changes_redirect_and_keys() {
    let storage = Rc::new(MemoryStorage::new());
    let clock = ManualClock::new(NOW_MS);
    let config = GuardConfig::default()
        .with_keys("tok", "who")
        .with_auth_path("/login");
    let mut guard = SessionGuard::with_config(Rc::clone(&storage), clock, config);
    storage.set("tok", &token_expiring_in(-1)).expect("set");

    let Access::Denied(denial) = guard.evaluate() else {
        panic!("expected denial");
    };
    assert_eq!(denial.redirect_to, "/login");
    assert_eq!(guard.auth_path(), "/login");
    assert!(storage.get("tok").expect("get").is_none());
}
