//! Session projection rendered by the menu, countdown, and notice banner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<SessionView>` context by `App`. Every browser guard
//! subscribes a listener that folds [`SessionEvent`]s into this view, so no
//! component reads the token store to decide what to render.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use session::{Identity, SessionEvent, SessionSnapshot, SessionState, format_countdown};

/// What the chrome needs to know about the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionView {
    pub active: bool,
    pub identity: Option<Identity>,
    /// Milliseconds left on the token, refreshed by the expiry watch.
    pub remaining_ms: Option<u64>,
    /// Notice from the last denial, until dismissed or a new login.
    pub notice: Option<String>,
}

impl SessionView {
    /// Initial view computed from storage at startup.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let active = snapshot.state == SessionState::Active;
        Self {
            active,
            identity: snapshot.identity.clone(),
            remaining_ms: active.then_some(snapshot.remaining_ms),
            notice: None,
        }
    }

    /// Fold one guard notification into the view.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Active { identity, remaining_ms } => {
                self.active = true;
                self.identity.clone_from(identity);
                self.remaining_ms = Some(*remaining_ms);
                self.notice = None;
            }
            SessionEvent::LoggedOut { .. } => {
                self.active = false;
                self.identity = None;
                self.remaining_ms = None;
                self.notice = event.notice().map(str::to_owned);
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref()?.username.as_deref()
    }

    /// Countdown label while a session is live.
    pub fn countdown(&self) -> Option<String> {
        if !self.active {
            return None;
        }
        self.remaining_ms.map(format_countdown)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
