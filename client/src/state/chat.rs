//! Conversation log for the chat page.
//!
//! The backend threads a conversation through `session_id`; the log keeps the
//! last one it saw and sends it back with the next question.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{ChatMode, ChatRequest, ChatResponse, Recipe};

pub const WELCOME: &str = "How can I help you cook today?";
pub const FAILURE: &str = "Sorry, something went wrong. Try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// A single chat bubble, with any recipes the bot attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
    pub recipes: Vec<Recipe>,
    pub failed: bool,
}

impl ChatMessage {
    fn user(text: &str) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.to_owned(),
            recipes: Vec::new(),
            failed: false,
        }
    }

    fn bot(text: &str) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.to_owned(),
            recipes: Vec::new(),
            failed: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<String>,
    pub mode: ChatMode,
    pub loading: bool,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(WELCOME)],
            session_id: None,
            mode: ChatMode::default(),
            loading: false,
        }
    }
}

impl ChatLog {
    /// Record the user's question and build the request for it.
    ///
    /// Returns `None` for blank input or while a reply is still pending.
    pub fn begin(&mut self, input: &str) -> Option<ChatRequest> {
        let query = input.trim();
        if query.is_empty() || self.loading {
            return None;
        }
        self.messages.push(ChatMessage::user(query));
        self.loading = true;
        Some(ChatRequest {
            query: query.to_owned(),
            mode: self.mode,
            session_id: self.session_id.clone(),
        })
    }

    pub fn receive(&mut self, response: ChatResponse) {
        if let Some(id) = response.session_id {
            self.session_id = Some(id);
        }
        self.messages.push(ChatMessage {
            speaker: Speaker::Bot,
            text: response.message,
            recipes: response.recommendations,
            failed: false,
        });
        self.loading = false;
    }

    pub fn fail(&mut self) {
        self.messages.push(ChatMessage {
            failed: true,
            ..ChatMessage::bot(FAILURE)
        });
        self.loading = false;
    }
}
