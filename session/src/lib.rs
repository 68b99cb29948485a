//! Bearer-token session guard shared by the cookbook client.
//!
//! This crate owns the session lifecycle used by every protected view: the
//! token store over an injected key-value backend, the local (unverified)
//! expiry evaluation of the token claims, and the route guard that turns an
//! expired or missing session into a single clear + notify + redirect.
//!
//! It has no browser dependencies. The client crate plugs in `localStorage`
//! and `Date.now()` through [`KeyValueStorage`] and [`Clock`].

pub mod clock;
pub mod config;
pub mod guard;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GuardConfig;
pub use guard::{
    Access, Denial, ListenerId, LoginError, LogoutReason, SessionEvent, SessionGuard, SessionSnapshot,
};
pub use store::{Identity, KeyValueStorage, MemoryStorage, StorageError, TokenStore};
pub use token::{
    Claims, DecodeError, DenyReason, SessionState, decode, evaluate, format_countdown, is_expired,
    milliseconds_remaining, session_state,
};
