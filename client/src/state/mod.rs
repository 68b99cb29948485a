//! Client-side view state.
//!
//! Only the session projection is app-wide. The chat log, settings editor,
//! and pantry wizard are plain structs held in page-local signals.

pub mod chat;
pub mod pantry;
pub mod preferences;
pub mod session;
