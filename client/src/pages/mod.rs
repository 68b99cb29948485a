//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `auth` is public. Every other page renders inside the `Protected` guard
//! component, which owns the navigation-time redirect. Backend refusals go
//! through `SessionAccess`, which hands them to the same guard.

pub mod auth;
pub mod chat;
pub mod favorites;
pub mod pantry;
pub mod preferences;
pub mod profile;
