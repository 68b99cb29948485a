//! Browser adapters and guard wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! `browser` implements the session crate's storage and clock traits over
//! `localStorage` and `Date.now()`; `guard` attaches them to the session
//! signal and the router.

pub mod browser;
pub mod guard;
