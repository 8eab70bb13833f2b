//! Conversation types and state management

pub mod clarify;
pub mod flow;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use clarify::{budget_guidance, clarification_message};
pub use flow::{next_step, register_vague_input};

/// A single transcript entry. Transcripts are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,

    /// Rendered as a soft warning (vague input, rejected budget)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_warning: bool,

    /// Quick replies offered with this message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,

    /// Number of responder attempts made before this error was surfaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_warning: false,
            suggestions: Vec::new(),
            is_error: false,
            retryable: false,
            attempt_count: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }

    /// An AI message built from a flow response, carrying its chips
    pub fn from_response(response: &ConversationResponse) -> Self {
        Self::ai(&response.message).with_suggestions(response.chips.clone())
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.is_warning = true;
        self
    }

    /// Mark as a failed responder call the user may retry
    pub fn as_retryable_error(mut self, attempts: u32) -> Self {
        self.is_error = true;
        self.retryable = true;
        self.attempt_count = Some(attempts);
        self
    }
}

/// Progress through the guided conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_needs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<u64>,

    /// Raw answers keyed by `message_<step>`
    #[serde(default)]
    pub context: HashMap<String, Value>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub vague_input_count: u32,

    #[serde(default)]
    pub last_input_was_vague: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            step: 0,
            use_case: None,
            specific_needs: None,
            budget_range: None,
            context: HashMap::new(),
            completed: false,
            vague_input_count: 0,
            last_input_was_vague: false,
        }
    }

    /// True when the next accepted answer is the budget
    pub fn awaiting_budget(&self) -> bool {
        self.step == flow::BUDGET_STEP
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the assistant says next. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chips: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub build_recommendations: bool,
}

impl ConversationResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chips: Vec::new(),
            completed: false,
            build_recommendations: false,
        }
    }

    pub fn with_chips<I, S>(mut self, chips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chips = chips.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the flow finished and ready for build recommendations
    pub fn finished(mut self) -> Self {
        self.completed = true;
        self.build_recommendations = true;
        self
    }
}

/// Offer to jump straight to builds for a detected persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSuggestion {
    pub persona_id: String,
    pub persona_name: String,
    pub message: String,
    pub accept_label: String,
    pub decline_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = ConversationState::new();
        assert_eq!(state.step, 0);
        assert!(state.context.is_empty());
        assert!(!state.completed);
        assert_eq!(state.vague_input_count, 0);
        assert!(!state.last_input_was_vague);
    }

    #[test]
    fn test_message_round_trip() {
        let message = Message::ai("Something went wrong")
            .with_suggestions(vec!["Start Over".to_string()])
            .as_retryable_error(3);

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"role\":\"ai\""));

        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, message);
        assert_eq!(restored.attempt_count, Some(3));
    }

    #[test]
    fn test_plain_message_omits_flags() {
        let json = serde_json::to_value(Message::user("Gaming")).unwrap();
        assert!(json.get("is_warning").is_none());
        assert!(json.get("suggestions").is_none());
        assert!(json.get("attempt_count").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_state_deserializes_with_defaults() {
        let state: ConversationState = serde_json::from_str(r#"{"step": 2}"#).unwrap();
        assert_eq!(state.step, 2);
        assert!(state.context.is_empty());
        assert!(!state.completed);
    }
}
