//! Keyword-driven mock AI with simulated latency and failures

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::{personas, ResponderSettings};
use crate::conversation::PersonaSuggestion;

use super::{AiReply, ProviderError, Responder};

/// Return the id of the first persona (in table order) whose keywords
/// appear in the message.
pub fn detect_persona(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    personas::DETECTABLE
        .iter()
        .find(|persona| persona.keywords.iter().any(|k| lowered.contains(k)))
        .map(|persona| persona.id)
}

pub struct MockResponder {
    min_latency: Duration,
    max_latency: Duration,
    network_error: AtomicBool,
}

impl MockResponder {
    pub fn new(settings: &ResponderSettings) -> Self {
        let min = settings.min_latency_ms.min(settings.max_latency_ms);
        let max = settings.min_latency_ms.max(settings.max_latency_ms);
        Self {
            min_latency: Duration::from_millis(min),
            max_latency: Duration::from_millis(max),
            network_error: AtomicBool::new(settings.simulate_network_error),
        }
    }

    /// Make every following call fail immediately with a network error
    pub fn simulate_network_error(&self, enabled: bool) {
        self.network_error.store(enabled, Ordering::Relaxed);
        tracing::debug!(enabled, "Mock responder network error simulation toggled");
    }

    pub fn is_simulating_network_error(&self) -> bool {
        self.network_error.load(Ordering::Relaxed)
    }

    fn latency(&self) -> Duration {
        let min = self.min_latency.as_millis() as u64;
        let max = self.max_latency.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new(&ResponderSettings::default())
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, message: &str) -> Result<AiReply, ProviderError> {
        if self.is_simulating_network_error() {
            return Err(ProviderError::Network(
                "simulated connection failure".to_string(),
            ));
        }

        let latency = self.latency();
        tokio::time::sleep(latency).await;

        let persona = detect_persona(message).and_then(personas::find);

        let Some(persona) = persona else {
            return Ok(AiReply {
                content: "Tell me a bit more about what you'll do with this PC and I'll narrow it down."
                    .to_string(),
                suggestion: None,
            });
        };

        tracing::debug!(persona = persona.id, ?latency, "Persona detected");

        Ok(AiReply {
            content: persona.pitch.to_string(),
            suggestion: Some(PersonaSuggestion {
                persona_id: persona.id.to_string(),
                persona_name: persona.name.to_string(),
                message: format!(
                    "It sounds like you might be a {}. Want to see builds tailored for you?",
                    persona.name
                ),
                accept_label: "Show me builds".to_string(),
                decline_label: "Keep chatting".to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Instant;

    #[test]
    fn test_detect_persona() {
        assert_eq!(
            detect_persona("I play valorant competitively"),
            Some("competitive-gamer")
        );
        assert_eq!(detect_persona("Mostly Minecraft with friends"), Some("casual-gamer"));
        assert_eq!(detect_persona("I edit YouTube videos"), Some("content-creator"));
        assert_eq!(detect_persona("Programming and Docker"), Some("workstation"));
        assert_eq!(detect_persona("College student"), Some("student"));
        assert_eq!(detect_persona("Training PyTorch models"), Some("ai-ml"));
        assert_eq!(detect_persona("random unrelated text"), None);
    }

    #[test]
    fn test_detect_persona_uses_table_order() {
        // both competitive and casual keywords: the earlier entry wins
        assert_eq!(
            detect_persona("casual player but getting competitive"),
            Some("competitive-gamer")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_persona_reply_carries_suggestion() {
        let responder = MockResponder::default();
        let reply = responder.respond("I grind Valorant ranked").await.unwrap();

        let suggestion = reply.suggestion.expect("persona suggestion");
        assert_eq!(suggestion.persona_id, "competitive-gamer");
        assert_eq!(suggestion.persona_name, "Competitive Gamer");
        assert!(!suggestion.accept_label.is_empty());
        assert!(!suggestion.decline_label.is_empty());
        assert!(!reply.content.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_reply_without_persona() {
        let responder = MockResponder::default();
        let reply = responder.respond("hello there").await.unwrap();
        assert!(reply.suggestion.is_none());
        assert!(!reply.content.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_within_bounds() {
        let responder = MockResponder::default();
        let started = tokio::time::Instant::now();
        responder.respond("hello").await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(100), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(300), "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_network_error_fails_fast() {
        let responder = MockResponder::default();
        responder.simulate_network_error(true);

        let started = Instant::now();
        let err = responder.respond("anything").await.unwrap_err();
        assert!(started.elapsed() < Duration::from_millis(50));
        assert!(matches!(err, ProviderError::Network(_)));
        assert!(err.to_string().contains("Network error"));

        responder.simulate_network_error(false);
        tokio_test::assert_ok!(responder.respond("anything").await);
    }

    #[tokio::test]
    async fn test_flag_is_per_instance() {
        let failing = MockResponder::new(&ResponderSettings {
            simulate_network_error: true,
            ..ResponderSettings::default()
        });
        let healthy = MockResponder::default();

        tokio_test::assert_err!(failing.respond("hi").await);
        tokio_test::assert_ok!(healthy.respond("hi").await);
    }
}
