//! Networking modules for the recipe backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the JSON schema shared
//! with the backend's user endpoints.

pub mod api;
pub mod types;
