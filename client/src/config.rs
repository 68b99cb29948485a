//! Build-time client configuration.
//!
//! The backend base URL is read at compile time from `COOKBOOK_API_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend used when `COOKBOOK_API_URL` is unset at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Base URL of the recipe backend.
pub fn api_base_url() -> &'static str {
    option_env!("COOKBOOK_API_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// Join `base` and an absolute `path` without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
