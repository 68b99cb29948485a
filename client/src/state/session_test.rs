use super::*;
use session::{DenyReason, LogoutReason};

fn alice() -> Identity {
    Identity {
        username: Some("alice".to_owned()),
        user_id: Some(7),
        issued_at: None,
        expires_at: Some(1_900_000_000),
    }
}

fn active(remaining_ms: u64) -> SessionEvent {
    SessionEvent::Active {
        identity: Some(alice()),
        remaining_ms,
    }
}

// =============================================================
// Defaults / snapshot
// =============================================================

#[test]
fn default_view_is_logged_out() {
    let view = SessionView::default();
    assert!(!view.active);
    assert!(view.username().is_none());
    assert!(view.countdown().is_none());
    assert!(view.notice.is_none());
}

#[test]
fn from_active_snapshot_carries_identity_and_remaining() {
    let snapshot = SessionSnapshot {
        state: SessionState::Active,
        identity: Some(alice()),
        remaining_ms: 65_000,
    };
    let view = SessionView::from_snapshot(&snapshot);
    assert!(view.active);
    assert_eq!(view.username(), Some("alice"));
    assert_eq!(view.countdown().as_deref(), Some("1 min 05 s"));
}

#[test]
fn from_expired_snapshot_is_inactive() {
    let snapshot = SessionSnapshot {
        state: SessionState::Expired,
        identity: None,
        remaining_ms: 0,
    };
    let view = SessionView::from_snapshot(&snapshot);
    assert!(!view.active);
    assert!(view.remaining_ms.is_none());
}

// =============================================================
// apply
// =============================================================

#[test]
fn active_event_marks_view_live() {
    let mut view = SessionView::default();
    view.apply(&active(3_600_000));
    assert!(view.active);
    assert_eq!(view.username(), Some("alice"));
    assert_eq!(view.countdown().as_deref(), Some("60 min 00 s"));
}

#[test]
fn denial_sets_notice_and_clears_identity() {
    let mut view = SessionView::default();
    view.apply(&active(1_000));
    view.apply(&SessionEvent::LoggedOut {
        reason: LogoutReason::Denied(DenyReason::Expired),
    });
    assert!(!view.active);
    assert!(view.identity.is_none());
    assert!(view.countdown().is_none());
    assert_eq!(view.notice.as_deref(), Some(DenyReason::Expired.notice()));
}

#[test]
fn user_logout_has_no_notice() {
    let mut view = SessionView::default();
    view.apply(&active(1_000));
    view.apply(&SessionEvent::LoggedOut {
        reason: LogoutReason::UserRequested,
    });
    assert!(!view.active);
    assert!(view.notice.is_none());
}

#[test]
fn login_after_denial_clears_notice() {
    let mut view = SessionView::default();
    view.apply(&SessionEvent::LoggedOut {
        reason: LogoutReason::Denied(DenyReason::Missing),
    });
    assert!(view.notice.is_some());
    view.apply(&active(1_000));
    assert!(view.notice.is_none());
}

#[test]
fn dismiss_notice_keeps_session_fields() {
    let mut view = SessionView {
        notice: Some("x".to_owned()),
        ..SessionView::default()
    };
    view.dismiss_notice();
    assert!(view.notice.is_none());
    assert!(!view.active);
}
