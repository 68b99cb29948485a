//! Reusable UI components shared by the route-level pages.

pub mod protected;
pub mod recipe_card;
pub mod session_notice;
pub mod sidebar;
