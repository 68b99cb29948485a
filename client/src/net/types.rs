//! Backend DTOs for the user/auth endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `POST /users/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// Body of `PUT /users/change-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Authoritative profile returned by `GET /users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
}

/// Error body; `detail` is a string or a list of validation entries.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// Human-readable detail, if the body carried one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}

/// Chat backend; each mode is served under `/chat/{mode}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Rule,
    Rag,
    #[default]
    Online,
}

impl ChatMode {
    pub const ALL: [Self; 3] = [Self::Rule, Self::Rag, Self::Online];

    /// Path segment and `<select>` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Rag => "rag",
            Self::Online => "online",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rule => "Rule-based",
            Self::Rag => "AI (RAG)",
            Self::Online => "Online",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }
}

/// Body of `POST /chat/{mode}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub mode: ChatMode,
    /// Conversation handle returned by the previous reply, if any.
    pub session_id: Option<String>,
}

/// Recipe attached to a chat reply or saved as a favorite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// HTML from the recipe provider.
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
}

/// Body of a successful `POST /chat/{mode}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub recommendations: Vec<Recipe>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Dietary settings stored by `GET`/`PUT /settings/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// A stored pantry entry from `GET /pantry/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub temporary: bool,
}

/// Body of `POST /pantry/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPantryItem {
    pub name: String,
    pub category: String,
    pub temporary: bool,
}

/// Body of `POST /cook/rag`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookRequest {
    pub always_have: Vec<String>,
    pub extras_today: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub prep_time: u32,
    pub people: u32,
    pub allergies: Vec<String>,
    pub dislikes: Vec<String>,
    pub preferences: Vec<String>,
    pub favorites: Vec<String>,
}

/// Generated recipe text and an optional server-relative image path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookResponse {
    pub result: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
