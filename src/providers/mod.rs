//! AI responder integrations
//!
//! There is no real model behind the chat: [`MockResponder`] spots personas
//! by keyword and simulates an unreliable network so the retry path gets
//! exercised. The [`Responder`] trait is the seam a real provider would
//! plug into.

mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversation::PersonaSuggestion;

pub use mock::{detect_persona, MockResponder};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Network error: unable to reach the AI service ({0})")]
    Network(String),
}

/// What the responder said back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiReply {
    pub content: String,

    /// Present when the message matched a persona
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<PersonaSuggestion>,
}

/// Something that can answer a chat message
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, message: &str) -> Result<AiReply, ProviderError>;
}
