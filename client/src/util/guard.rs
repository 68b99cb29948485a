//! Browser wiring for the session guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every surface that touches the session builds its guard through
//! [`browser_guard`], so the signal listener is always attached and the menu,
//! countdown, and notice banner observe the same events.
//!
//! `Protected` calls [`admit`] once when it is built and starts the expiry
//! watch only for an admitted view. The watch loop delegates each tick to
//! [`watch_tick`]. Both decisions are plain functions over any
//! [`SessionGuard`], so they are tested with in-memory storage and a manual
//! clock.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{Access, Clock, KeyValueStorage, SessionGuard};

use crate::net::api::ApiError;
use crate::state::session::SessionView;
use crate::util::browser::{BrowserClock, BrowserStorage};

pub type BrowserGuard = SessionGuard<BrowserStorage, BrowserClock>;

/// Guard over `localStorage` whose events are folded into `session`.
pub fn browser_guard(session: RwSignal<SessionView>) -> BrowserGuard {
    let mut guard = SessionGuard::new(BrowserStorage, BrowserClock);
    guard.subscribe(move |event| {
        // The app-level signal outlives every guard; a disposed one is ignored.
        let _ = session.try_update(|view| view.apply(event));
    });
    guard
}

/// Result of evaluating one protected navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Render the view and keep the expiry watch running.
    Render,
    /// The store is already cleared; go to this route.
    Redirect(String),
}

impl Admission {
    pub fn starts_watch(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Evaluate the session once for a protected view.
pub fn admit<S: KeyValueStorage, C: Clock>(guard: &mut SessionGuard<S, C>) -> Admission {
    match guard.evaluate() {
        Access::Granted { .. } => Admission::Render,
        Access::Denied(denial) => Admission::Redirect(denial.redirect_to),
    }
}

/// What the expiry watch does after one sleep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchStep {
    Continue,
    /// The owning view was cleaned up.
    Stop,
    /// The session lapsed on this tick; navigate and stop.
    Redirect(String),
}

/// One tick of the expiry watch. `alive` is false once the owning view is gone,
/// in which case the store is not consulted.
pub fn watch_tick<S: KeyValueStorage, C: Clock>(guard: &mut SessionGuard<S, C>, alive: bool) -> WatchStep {
    if !alive {
        return WatchStep::Stop;
    }
    match guard.check_expiry() {
        Some(denial) => WatchStep::Redirect(denial.redirect_to),
        None => WatchStep::Continue,
    }
}

/// Denials replace the history entry so "back" does not return to the guarded page.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    }
}

/// Copyable handle pages use for authenticated backend calls.
///
/// A 401 from the backend (or no live token at all) is handed to the guard's
/// `reject()`, which clears the store and publishes the notice, and the page
/// is redirected. Callers only handle the remaining errors.
#[derive(Clone, Copy)]
pub struct SessionAccess {
    session: RwSignal<SessionView>,
    navigate: StoredValue<Box<dyn Fn(&str, NavigateOptions)>, LocalStorage>,
}

impl SessionAccess {
    pub fn new<F>(session: RwSignal<SessionView>, navigate: F) -> Self
    where
        F: Fn(&str, NavigateOptions) + 'static,
    {
        Self {
            session,
            navigate: StoredValue::new_local(Box::new(navigate)),
        }
    }

    /// Live token; none reads as a refusal.
    pub fn token(self) -> Result<String, ApiError> {
        browser_guard(self.session).active_token().ok_or(ApiError::Unauthorized)
    }

    /// Deny the session after a backend refusal and follow the redirect.
    pub fn reject(self) {
        let denial = browser_guard(self.session).reject();
        // The page may be gone by the time a refusal arrives.
        let _ = self
            .navigate
            .try_with_value(|navigate| navigate(&denial.redirect_to, redirect_options()));
    }

    /// Run `call` with the live token, rejecting the session on a refusal.
    pub async fn call<T, F, Fut>(self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = match self.token() {
            Ok(token) => call(token).await,
            Err(e) => Err(e),
        };
        if matches!(result, Err(ApiError::Unauthorized)) {
            #[cfg(feature = "csr")]
            log::info!("session: backend refused the token");
            self.reject();
        }
        result
    }
}

/// Re-check expiry on a fixed interval while the calling view is mounted.
///
/// Stops when the owning reactive scope is cleaned up or after the first
/// denial, which navigates to the auth route.
pub fn install_expiry_watch<F>(session: RwSignal<SessionView>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    #[cfg(feature = "csr")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = Arc::clone(&alive);
        leptos::task::spawn_local(async move {
            let mut guard = browser_guard(session);
            guard.arm();
            let interval = guard.check_interval();
            loop {
                gloo_timers::future::sleep(interval).await;
                match watch_tick(&mut guard, alive_task.load(Ordering::Relaxed)) {
                    WatchStep::Continue => {}
                    WatchStep::Stop => break,
                    WatchStep::Redirect(target) => {
                        log::info!("expiry watch: session lapsed on an open view");
                        navigate(&target, redirect_options());
                        break;
                    }
                }
            }
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (session, navigate);
    }
}
