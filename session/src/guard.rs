//! Route guard: gates protected views behind a live session.
//!
//! ARCHITECTURE
//! ============
//! Every protected view goes through [`SessionGuard::evaluate`] on navigation
//! and [`SessionGuard::check_expiry`] on each timer tick while mounted. Both
//! paths end in the same denial routine, so the store is cleared and exactly
//! one [`SessionEvent::LoggedOut`] is published per transition into `Denied`.
//!
//! Other surfaces (navigation menu, countdown, notice banner) never poll the
//! store themselves; they subscribe to [`SessionEvent`]s.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::time::Duration;

use crate::clock::Clock;
use crate::config::GuardConfig;
use crate::store::{Identity, KeyValueStorage, StorageError, TokenStore};
use crate::token::{self, DecodeError, DenyReason, SessionState};

/// Outcome of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Granted { remaining_ms: u64 },
    Denied(Denial),
}

impl Access {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// A denied navigation: the store is already cleared when this is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Denial {
    pub reason: DenyReason,
    /// Route the caller must navigate to.
    pub redirect_to: String,
}

impl Denial {
    #[must_use]
    pub fn notice(&self) -> &'static str {
        self.reason.notice()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutReason {
    /// The guard refused the session.
    Denied(DenyReason),
    /// The user pressed "log out".
    UserRequested,
}

/// Notification published to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session is live; sent on login, granted navigation, and each live tick.
    Active {
        identity: Option<Identity>,
        remaining_ms: u64,
    },
    /// The session ended and the store has been cleared.
    LoggedOut { reason: LogoutReason },
}

impl SessionEvent {
    /// Notice to show the user, if this event warrants one.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::LoggedOut {
                reason: LogoutReason::Denied(reason),
            } => Some(reason.notice()),
            Self::LoggedOut {
                reason: LogoutReason::UserRequested,
            }
            | Self::Active { .. } => None,
        }
    }
}

/// Error returned by [`SessionGuard::login`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("received token could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    #[error("received token is not a three-part token with an expiry")]
    Malformed,
    #[error("received token has already expired")]
    AlreadyExpired,
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Handle returned by [`SessionGuard::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Side-effect-free view of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub identity: Option<Identity>,
    pub remaining_ms: u64,
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Token store + expiry evaluator + denial side effects.
pub struct SessionGuard<S, C> {
    store: TokenStore<S>,
    clock: C,
    auth_path: String,
    check_interval: Duration,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    /// Whether the last evaluation saw a live session; the periodic check only
    /// denies on a live-to-expired crossing.
    watching: bool,
}

impl<S: KeyValueStorage, C: Clock> SessionGuard<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self::with_config(storage, clock, GuardConfig::default())
    }

    pub fn with_config(storage: S, clock: C, config: GuardConfig) -> Self {
        let GuardConfig {
            token_key,
            identity_key,
            auth_path,
            check_interval,
        } = config;
        Self {
            store: TokenStore::with_keys(storage, token_key, identity_key),
            clock,
            auth_path,
            check_interval,
            listeners: Vec::new(),
            next_listener_id: 0,
            watching: false,
        }
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    /// Current token, only when it is live.
    pub fn active_token(&self) -> Option<String> {
        let token = self.store.token()?;
        token::evaluate(Some(&token), self.clock.now_millis())
            .is_ok()
            .then_some(token)
    }

    pub fn state(&self) -> SessionState {
        token::session_state(self.store.token().as_deref(), self.clock.now_millis())
    }

    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }

    pub fn milliseconds_remaining(&self) -> u64 {
        token::milliseconds_remaining(self.store.token().as_deref(), self.clock.now_millis())
    }

    /// Read-only view for rendering; never clears or notifies.
    pub fn snapshot(&self) -> SessionSnapshot {
        let token = self.store.token();
        let now = self.clock.now_millis();
        let state = token::session_state(token.as_deref(), now);
        SessionSnapshot {
            state,
            identity: if state == SessionState::Active {
                self.store.identity()
            } else {
                None
            },
            remaining_ms: token::milliseconds_remaining(token.as_deref(), now),
        }
    }

    /// Evaluate one navigation attempt to a protected view.
    ///
    /// A missing token is denied before any decoding is attempted.
    pub fn evaluate(&mut self) -> Access {
        let token = self.store.token();
        let now = self.clock.now_millis();
        match token::evaluate(token.as_deref(), now) {
            Ok(_) => {
                let remaining_ms = token::milliseconds_remaining(token.as_deref(), now);
                log::debug!("session: access granted, {remaining_ms} ms remaining");
                self.watching = true;
                self.publish_active(remaining_ms);
                Access::Granted { remaining_ms }
            }
            Err(reason) => Access::Denied(self.deny(reason)),
        }
    }

    /// Periodic re-check while a protected view stays mounted.
    ///
    /// Returns a denial only on the tick where a live session lapses; later
    /// ticks return `None` until the session is live again.
    pub fn check_expiry(&mut self) -> Option<Denial> {
        let token = self.store.token();
        let now = self.clock.now_millis();
        match token::evaluate(token.as_deref(), now) {
            Ok(_) => {
                self.watching = true;
                self.publish_active(token::milliseconds_remaining(token.as_deref(), now));
                None
            }
            Err(reason) if self.watching => Some(self.deny(reason)),
            Err(_) => None,
        }
    }

    /// Treat the session as live for [`Self::check_expiry`] without evaluating it.
    ///
    /// Used by a watch loop whose view was already granted through another
    /// guard instance, so a lapse before its first tick is still caught.
    pub fn arm(&mut self) {
        self.watching = true;
    }

    /// Accept a freshly issued token: persist it with its identity snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] if the token cannot be decoded, is not a live
    /// three-part token, or cannot be persisted. Nothing is left stored on error.
    pub fn login(&mut self, token: &str) -> Result<Identity, LoginError> {
        let claims = token::decode(token)?;
        let now = self.clock.now_millis();
        match token::evaluate(Some(token), now) {
            Ok(_) => {}
            Err(DenyReason::Expired) => return Err(LoginError::AlreadyExpired),
            Err(_) => return Err(LoginError::Malformed),
        }

        let identity = Identity::from_claims(&claims);
        if let Err(e) = self
            .store
            .set_token(token)
            .and_then(|()| self.store.set_identity(&identity))
        {
            self.store.clear();
            return Err(e.into());
        }

        log::info!("session: logged in as {:?}", identity.username);
        self.watching = true;
        self.publish_active(token::milliseconds_remaining(Some(token), now));
        Ok(identity)
    }

    /// User-initiated logout. No notice is attached.
    pub fn logout(&mut self) {
        self.watching = false;
        self.store.clear();
        log::info!("session: logged out by user");
        self.emit(&SessionEvent::LoggedOut {
            reason: LogoutReason::UserRequested,
        });
    }

    /// The backend refused the stored token (HTTP 401).
    pub fn reject(&mut self) -> Denial {
        self.deny(DenyReason::Rejected)
    }

    /// Register a listener for [`SessionEvent`]s.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn deny(&mut self, reason: DenyReason) -> Denial {
        self.watching = false;
        self.store.clear();
        log::info!("session: access denied ({reason:?}), redirecting to {}", self.auth_path);
        self.emit(&SessionEvent::LoggedOut {
            reason: LogoutReason::Denied(reason),
        });
        Denial {
            reason,
            redirect_to: self.auth_path.clone(),
        }
    }

    fn publish_active(&mut self, remaining_ms: u64) {
        let identity = self.store.identity();
        self.emit(&SessionEvent::Active { identity, remaining_ms });
    }

    fn emit(&mut self, event: &SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}
