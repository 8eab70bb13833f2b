//! Chat engine: runs one conversational turn end to end
//!
//! For each user message the engine:
//! 1. Records it in the transcript
//! 2. Re-prompts if the input is vague
//! 3. At the budget step, rejects budgets that don't parse or are out of range
//! 4. Calls the responder through the retry engine
//! 5. Pauses on a detected persona, or advances the guided flow
//! 6. Produces build recommendations once the flow completes
//!
//! Rejected input never advances the conversation. A session handles one
//! turn at a time; concurrent turns are refused with [`ChatError::SessionBusy`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::builds::{format_warning, recommend, CompatibilityWarning, RecommendedBuild};
use crate::config::AdvisorConfig;
use crate::conversation::{
    budget_guidance, clarification_message, next_step, register_vague_input, ConversationResponse,
    ConversationState, Message, PersonaSuggestion,
};
use crate::providers::{detect_persona, Responder};
use crate::validation::{is_vague_input, validate_budget, BudgetError};

use super::memory::{PendingPersona, Session, SessionStore, StoreError};
use super::retry::retry_with_backoff_notify;

const GREETING: &str = "Hi! I'm your PC build assistant. Tell me what you're looking for and I'll help \
                        you find the right build, or switch to persona mode to jump straight to recommendations.";

const GREETING_CHIPS: [&str; 3] = ["I want a gaming PC", "I need a work computer", "Help me choose"];

/// Offered when the responder stays unreachable after every retry
pub const ESCAPE_ACTIONS: [&str; 3] = ["Switch to Persona Mode", "Report Issue", "Start Over"];

/// Errors from the chat engine
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Session {0} is already processing a message")]
    SessionBusy(String),

    #[error("No persona suggestion is pending for session {0}")]
    NoPendingPersona(String),
}

/// A session with its transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub transcript: Vec<Message>,
}

/// Everything that changed during one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub session_id: String,

    /// Messages appended this turn, user message first
    pub messages: Vec<Message>,

    /// Quick replies to show next
    pub chips: Vec<String>,

    pub state: ConversationState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_suggestion: Option<PersonaSuggestion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<RecommendedBuild>>,
}

/// Messages and side results collected during a turn before committing
#[derive(Default)]
struct Turn {
    messages: Vec<Message>,
    chips: Vec<String>,
    persona_suggestion: Option<PersonaSuggestion>,
    recommendations: Option<Vec<RecommendedBuild>>,
}

impl Turn {
    fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append the response and adopt its chips
    fn respond(&mut self, message: Message) {
        self.chips = message.suggestions.clone();
        self.messages.push(message);
    }
}

/// Removes the session from the busy set when the turn ends
struct BusyGuard<'a> {
    busy: &'a Mutex<HashSet<String>>,
    session_id: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session_id);
    }
}

/// The core chat engine
pub struct ChatEngine {
    config: AdvisorConfig,
    responder: Arc<dyn Responder>,
    store: Arc<SessionStore>,
    busy: Mutex<HashSet<String>>,
}

impl ChatEngine {
    /// Create a new chat engine
    pub fn new(config: AdvisorConfig, responder: Arc<dyn Responder>, store: Arc<SessionStore>) -> Self {
        Self {
            config,
            responder,
            store,
            busy: Mutex::new(HashSet::new()),
        }
    }

    /// Open a new session and greet the user
    pub async fn start_session(&self) -> Result<SessionView, ChatError> {
        let mut session = Session::new(self.config.layout.default_panel_percent);
        let greeting = greeting();
        session.chips = greeting.suggestions.clone();

        self.store.create(&session).await?;
        self.store.append_message(&session.id, &greeting).await?;

        tracing::info!(session_id = %session.id, "💬 Session started");

        Ok(SessionView {
            session,
            transcript: vec![greeting],
        })
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionView, ChatError> {
        let session = self.store.load(session_id).await?;
        let transcript = self.store.transcript(session_id).await?;
        Ok(SessionView { session, transcript })
    }

    /// Handle one user message
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<TurnOutcome, ChatError> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.store.load(session_id).await?;
        let mut turn = Turn::default();

        turn.push(Message::user(text));

        if session.pending.take().is_some() {
            tracing::debug!(session_id, "New message supersedes pending persona offer");
        }

        if is_vague_input(text) {
            session.state = register_vague_input(&session.state);
            let response = clarification_message(&session.state, session.state.vague_input_count);
            tracing::debug!(
                session_id,
                vague_count = session.state.vague_input_count,
                "Vague input, asking for clarification"
            );
            turn.respond(Message::from_response(&response).as_warning());
            return self.commit(session, turn).await;
        }

        let mut accepted = text.trim().to_string();
        let mut budget = None;

        if session.state.awaiting_budget() {
            let validation = validate_budget(text);
            if !validation.valid {
                let error = validation.error.unwrap_or(BudgetError::InvalidFormat);
                let guidance = budget_guidance(error);
                let content = match validation.message {
                    Some(reason) => format!("{reason}\n\n{}", guidance.message),
                    None => guidance.message.clone(),
                };
                tracing::debug!(session_id, ?error, amount = ?validation.amount, "Budget rejected");
                turn.respond(Message::ai(content).with_suggestions(guidance.chips).as_warning());
                return self.commit(session, turn).await;
            }

            // hand the flow a plain figure so "$1,500" isn't read as 1
            if let Some(amount) = validation.amount {
                accepted = format!("${amount}");
                budget = Some(amount);
            }
        }

        let responder = self.responder.as_ref();
        let message = text.trim();
        let mut retries = 0;

        let reply = retry_with_backoff_notify(
            move || responder.respond(message),
            &self.config.retry,
            |attempt, delay_ms| {
                retries += 1;
                tracing::warn!(session_id, attempt, delay_ms, "Responder call failed, retrying");
            },
        )
        .await;

        match reply {
            Err(err) => {
                let attempts = retries + 1;
                tracing::error!(session_id, attempts, error = %err, "Responder unavailable");
                turn.respond(
                    Message::ai(format!(
                        "Sorry, I couldn't reach the assistant after {attempts} attempts ({err}). \
                         You can try again, switch to persona mode, or start over."
                    ))
                    .with_suggestions(ESCAPE_ACTIONS.map(String::from).to_vec())
                    .as_retryable_error(attempts),
                );
            }
            Ok(reply) => match reply.suggestion {
                Some(suggestion) => {
                    tracing::info!(session_id, persona = %suggestion.persona_id, "🎯 Persona detected");
                    turn.respond(
                        Message::ai(format!("{}\n\n{}", reply.content, suggestion.message)).with_suggestions(
                            vec![suggestion.accept_label.clone(), suggestion.decline_label.clone()],
                        ),
                    );
                    session.pending = Some(PendingPersona {
                        suggestion: suggestion.clone(),
                        message: accepted,
                        budget,
                    });
                    turn.persona_suggestion = Some(suggestion);
                }
                None => self.advance(&mut session, &mut turn, &accepted),
            },
        }

        self.commit(session, turn).await
    }

    /// Accept the pending persona offer and show its builds
    pub async fn accept_persona(&self, session_id: &str) -> Result<TurnOutcome, ChatError> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.store.load(session_id).await?;
        let pending = session
            .pending
            .take()
            .ok_or_else(|| ChatError::NoPendingPersona(session_id.to_string()))?;
        let suggestion = pending.suggestion;

        let mut turn = Turn::default();
        turn.push(Message::user(&suggestion.accept_label));

        if let Some(amount) = pending.budget {
            session.state.budget_range = Some(amount);
        }
        let budget = session
            .state
            .budget_range
            .unwrap_or(self.config.recommendations.default_budget);

        turn.respond(
            Message::ai(format!(
                "Here are three {} builds around ${budget}. Want to tweak anything?",
                suggestion.persona_name
            ))
            .with_suggestions(vec!["Start Over".to_string()]),
        );
        self.attach_recommendations(&mut turn, &suggestion.persona_id, budget);

        tracing::info!(session_id, persona = %suggestion.persona_id, budget, "Persona accepted");
        self.commit(session, turn).await
    }

    /// Decline the pending persona offer and carry on with the guided flow
    pub async fn decline_persona(&self, session_id: &str) -> Result<TurnOutcome, ChatError> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.store.load(session_id).await?;
        let pending = session
            .pending
            .take()
            .ok_or_else(|| ChatError::NoPendingPersona(session_id.to_string()))?;

        let mut turn = Turn::default();
        turn.push(Message::user(&pending.suggestion.decline_label));
        self.advance(&mut session, &mut turn, &pending.message);

        tracing::debug!(session_id, persona = %pending.suggestion.persona_id, "Persona declined");
        self.commit(session, turn).await
    }

    /// "Start Over": fresh state and transcript, same session id
    pub async fn reset_session(&self, session_id: &str) -> Result<SessionView, ChatError> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.store.load(session_id).await?;

        let greeting = greeting();
        session.state = ConversationState::new();
        session.pending = None;
        session.chips = greeting.suggestions.clone();

        self.store.clear_transcript(session_id).await?;
        self.store.append_message(session_id, &greeting).await?;
        self.store.save(&session).await?;

        tracing::info!(session_id, "Session reset");
        Ok(SessionView {
            session,
            transcript: vec![greeting],
        })
    }

    /// Session ids, most recently active first
    pub async fn list_sessions(&self) -> Result<Vec<String>, ChatError> {
        Ok(self.store.list_sessions().await?)
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), ChatError> {
        let _guard = self.acquire(session_id)?;
        self.store.load(session_id).await?;
        self.store.delete(session_id).await?;
        tracing::info!(session_id, "Session deleted");
        Ok(())
    }

    /// Store the chat/builds panel split; returns the clamped value
    pub async fn set_panel_percent(&self, session_id: &str, percent: i64) -> Result<u8, ChatError> {
        Ok(self.store.set_panel_percent(session_id, percent).await?)
    }

    /// Step the guided flow with an accepted answer
    fn advance(&self, session: &mut Session, turn: &mut Turn, answer: &str) {
        let (state, response) = next_step(&session.state, Some(answer));
        session.state = state;
        turn.respond(Message::from_response(&response));

        if response.build_recommendations {
            let persona_id = infer_persona(&session.state);
            let budget = session
                .state
                .budget_range
                .unwrap_or(self.config.recommendations.default_budget);
            self.attach_recommendations(turn, persona_id, budget);
        }
    }

    fn attach_recommendations(&self, turn: &mut Turn, persona_id: &str, budget: u64) {
        let recommendations = recommend(persona_id, budget);

        let mut notes = Vec::new();
        let mut conflicts = false;

        for recommended in recommendations.iter().filter(|r| !r.warnings.is_empty()) {
            let mut bullets = Vec::with_capacity(recommended.warnings.len());
            for warning in &recommended.warnings {
                match missing_part_note(warning) {
                    Some(note) => bullets.push(note),
                    None => {
                        conflicts = true;
                        bullets.push(format_warning(warning));
                    }
                }
            }
            notes.push(format!("{}:\n{}", recommended.build.title, bullets.join("\n")));
        }

        // builds list core parts only, so a missing part is advice, not a fault
        if conflicts {
            turn.push(
                Message::ai(format!("A few compatibility notes:\n\n{}", notes.join("\n\n"))).as_warning(),
            );
        } else if !notes.is_empty() {
            turn.push(Message::ai(format!("Before you buy:\n\n{}", notes.join("\n\n"))));
        }

        turn.recommendations = Some(recommendations);
    }

    async fn commit(&self, mut session: Session, turn: Turn) -> Result<TurnOutcome, ChatError> {
        for message in &turn.messages {
            self.store.append_message(&session.id, message).await?;
        }
        session.chips = turn.chips.clone();
        self.store.save(&session).await?;

        Ok(TurnOutcome {
            session_id: session.id,
            messages: turn.messages,
            chips: turn.chips,
            state: session.state,
            persona_suggestion: turn.persona_suggestion,
            recommendations: turn.recommendations,
        })
    }

    fn acquire(&self, session_id: &str) -> Result<BusyGuard<'_>, ChatError> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(session_id.to_string()) {
            return Err(ChatError::SessionBusy(session_id.to_string()));
        }
        Ok(BusyGuard {
            busy: &self.busy,
            session_id: session_id.to_string(),
        })
    }
}

/// Informational rendering of a "Missing <part>" finding
fn missing_part_note(warning: &CompatibilityWarning) -> Option<String> {
    let part = warning.issue.strip_prefix("Missing ")?;
    let mut note = format!("ℹ️ {part} not included: pick one that can handle the {}", warning.component);
    if !warning.suggestions.is_empty() {
        note.push_str(&format!(", e.g. {}", warning.suggestions.join(" or ")));
    }
    Some(note)
}

fn greeting() -> Message {
    Message::from_response(&ConversationResponse::new(GREETING).with_chips(GREETING_CHIPS))
}

/// Best persona for a finished guided conversation
fn infer_persona(state: &ConversationState) -> &'static str {
    let answers = format!(
        "{} {}",
        state.use_case.as_deref().unwrap_or_default(),
        state.specific_needs.as_deref().unwrap_or_default()
    );

    detect_persona(&answers).unwrap_or_else(|| {
        if answers.to_lowercase().contains("gaming") {
            "casual-gamer"
        } else {
            "workstation"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builds::Tier;
    use crate::config::ResponderSettings;
    use crate::core::RetryOptions;
    use crate::providers::MockResponder;

    async fn engine() -> (ChatEngine, Arc<MockResponder>) {
        let config = AdvisorConfig {
            retry: RetryOptions {
                max_attempts: 3,
                base_delay_ms: 10,
                jitter_percent: 0.0,
            },
            responder: ResponderSettings {
                min_latency_ms: 1,
                max_latency_ms: 2,
                simulate_network_error: false,
            },
            ..AdvisorConfig::default()
        };
        let responder = Arc::new(MockResponder::new(&config.responder));
        let store = Arc::new(SessionStore::new_in_memory().await.unwrap());
        let engine = ChatEngine::new(config, responder.clone(), store);
        (engine, responder)
    }

    #[tokio::test]
    async fn test_start_session_greets() {
        let (engine, _) = engine().await;
        let view = engine.start_session().await.unwrap();

        assert_eq!(view.transcript.len(), 1);
        assert_eq!(view.session.state.step, 0);
        assert_eq!(view.session.panel_percent, 40);
        assert_eq!(view.session.chips, GREETING_CHIPS);

        let loaded = engine.get_session(&view.session.id).await.unwrap();
        assert_eq!(loaded.transcript, view.transcript);
    }

    #[tokio::test]
    async fn test_guided_flow_to_recommendations() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;

        let outcome = engine.send_message(&id, "Hello").await.unwrap();
        assert_eq!(outcome.state.step, 1);

        let outcome = engine.send_message(&id, "Gaming").await.unwrap();
        assert_eq!(outcome.state.step, 2);
        assert!(outcome.chips.iter().any(|c| c == "AAA Titles"));

        let outcome = engine.send_message(&id, "AAA Titles").await.unwrap();
        assert_eq!(outcome.state.step, 3);

        let outcome = engine.send_message(&id, "$1,500").await.unwrap();
        assert!(outcome.state.completed);
        assert_eq!(outcome.state.budget_range, Some(1500));
        assert!(outcome.messages[1].content.contains("$1500"));

        let recommendations = outcome.recommendations.expect("builds");
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0].build.id, Tier::Optimized);

        // user, summary, compatibility notes
        let transcript = engine.get_session(&id).await.unwrap().transcript;
        assert_eq!(transcript.len(), 1 + 2 * 3 + 3);

        let notes = &outcome.messages[2];
        assert!(!notes.is_warning);
        assert!(notes.content.starts_with("Before you buy:"));
        assert!(notes.content.contains("PSU not included: pick one that can handle the NVIDIA RTX 4090"));
        assert!(!notes.content.contains("⚠️"));
    }

    #[tokio::test]
    async fn test_vague_input_does_not_advance() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;
        engine.send_message(&id, "Hello").await.unwrap();

        let outcome = engine.send_message(&id, "idk").await.unwrap();
        assert_eq!(outcome.state.step, 1);
        assert_eq!(outcome.state.vague_input_count, 1);
        assert!(outcome.messages[1].is_warning);
        assert!(outcome.chips.iter().any(|c| c == "I want a gaming PC"));

        engine.send_message(&id, "whatever").await.unwrap();
        let outcome = engine.send_message(&id, "dunno").await.unwrap();
        assert!(outcome.messages[1].content.contains("Having trouble"));

        let outcome = engine.send_message(&id, "Work").await.unwrap();
        assert_eq!(outcome.state.step, 2);
        assert_eq!(outcome.state.vague_input_count, 0);
    }

    #[tokio::test]
    async fn test_budget_out_of_range_is_rejected() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;
        for message in ["Hello", "Gaming", "AAA Titles"] {
            engine.send_message(&id, message).await.unwrap();
        }

        let outcome = engine.send_message(&id, "$300").await.unwrap();
        assert_eq!(outcome.state.step, 3);
        assert!(!outcome.state.completed);
        assert!(outcome.messages[1].is_warning);
        assert!(outcome.messages[1].content.contains("$300"));
        assert_eq!(outcome.chips, ["$400", "$750", "$1000", "Custom"]);

        let outcome = engine.send_message(&id, "50k").await.unwrap();
        assert_eq!(outcome.state.step, 3);
        assert!(outcome.chips.iter().any(|c| c == "$8000"));

        let outcome = engine.send_message(&id, "a reasonable amount").await.unwrap();
        assert_eq!(outcome.state.step, 3);
        assert!(outcome.recommendations.is_none());
    }

    #[tokio::test]
    async fn test_persona_pause_and_accept() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;

        let outcome = engine.send_message(&id, "I play valorant competitively").await.unwrap();
        let suggestion = outcome.persona_suggestion.expect("persona");
        assert_eq!(suggestion.persona_id, "competitive-gamer");
        assert_eq!(outcome.state.step, 0);
        assert_eq!(outcome.chips, [suggestion.accept_label.clone(), suggestion.decline_label.clone()]);

        let outcome = engine.accept_persona(&id).await.unwrap();
        let recommendations = outcome.recommendations.expect("builds");
        assert_eq!(recommendations.len(), 3);
        assert!(recommendations[2]
            .build
            .components
            .iter()
            .any(|c| c.name.contains("RTX 4090")));

        let session = engine.get_session(&id).await.unwrap().session;
        assert!(session.pending.is_none());

        let err = engine.accept_persona(&id).await.unwrap_err();
        assert!(matches!(err, ChatError::NoPendingPersona(_)));
    }

    #[tokio::test]
    async fn test_persona_at_budget_step_keeps_budget() {
        let (engine, _) = engine().await;

        async fn offer_at_budget_step(engine: &ChatEngine) -> String {
            let id = engine.start_session().await.unwrap().session.id;
            for message in ["Hello", "Gaming", "AAA Titles"] {
                engine.send_message(&id, message).await.unwrap();
            }
            let outcome = engine.send_message(&id, "$2,500 for valorant").await.unwrap();
            assert_eq!(outcome.persona_suggestion.unwrap().persona_id, "competitive-gamer");
            assert_eq!(outcome.state.step, 3);
            id
        }

        let id = offer_at_budget_step(&engine).await;
        let outcome = engine.accept_persona(&id).await.unwrap();
        assert_eq!(outcome.state.budget_range, Some(2500));
        assert!(outcome.messages[1].content.contains("around $2500"));
        assert!(outcome.recommendations.is_some());

        let id = offer_at_budget_step(&engine).await;
        let outcome = engine.decline_persona(&id).await.unwrap();
        assert!(outcome.state.completed);
        assert_eq!(outcome.state.budget_range, Some(2500));
    }

    #[tokio::test]
    async fn test_persona_decline_continues_flow() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;
        engine.send_message(&id, "Hello").await.unwrap();

        let outcome = engine.send_message(&id, "Mostly minecraft").await.unwrap();
        assert!(outcome.persona_suggestion.is_some());
        assert_eq!(outcome.state.step, 1);

        let outcome = engine.decline_persona(&id).await.unwrap();
        assert_eq!(outcome.state.step, 2);
        assert_eq!(outcome.state.use_case.as_deref(), Some("Mostly minecraft"));
    }

    #[tokio::test]
    async fn test_exhausted_retries_offer_escape_actions() {
        let (engine, responder) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;
        responder.simulate_network_error(true);

        let outcome = engine.send_message(&id, "Hello").await.unwrap();
        let error = &outcome.messages[1];
        assert!(error.is_error);
        assert!(error.retryable);
        assert_eq!(error.attempt_count, Some(3));
        assert_eq!(outcome.chips, ESCAPE_ACTIONS);
        assert_eq!(outcome.state.step, 0);

        responder.simulate_network_error(false);
        let outcome = engine.send_message(&id, "Hello").await.unwrap();
        assert_eq!(outcome.state.step, 1);
    }

    #[tokio::test]
    async fn test_reset_session() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;
        engine.send_message(&id, "Hello").await.unwrap();
        engine.set_panel_percent(&id, 60).await.unwrap();

        let view = engine.reset_session(&id).await.unwrap();
        assert_eq!(view.session.state, ConversationState::new());
        assert_eq!(view.session.panel_percent, 60);
        assert_eq!(engine.get_session(&id).await.unwrap().transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_turn_is_refused() {
        let (engine, _) = engine().await;
        let id = engine.start_session().await.unwrap().session.id;

        let _guard = engine.acquire(&id).unwrap();
        let err = engine.send_message(&id, "Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::SessionBusy(_)));
    }

    #[tokio::test]
    async fn test_list_and_delete_sessions() {
        let (engine, _) = engine().await;
        let first = engine.start_session().await.unwrap().session.id;
        let second = engine.start_session().await.unwrap().session.id;
        assert_eq!(engine.list_sessions().await.unwrap().len(), 2);

        engine.delete_session(&first).await.unwrap();
        assert_eq!(engine.list_sessions().await.unwrap(), vec![second]);

        let err = engine.delete_session(&first).await.unwrap_err();
        assert!(matches!(err, ChatError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let (engine, _) = engine().await;
        let err = engine.send_message("missing", "Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_missing_part_note() {
        let missing = CompatibilityWarning {
            component: "NVIDIA RTX 4080 Super".to_string(),
            issue: "Missing PSU".to_string(),
            severity: crate::builds::compatibility::Severity::Error,
            suggestions: vec!["Corsair RM750e 750W PSU".to_string()],
        };
        assert_eq!(
            missing_part_note(&missing).unwrap(),
            "ℹ️ PSU not included: pick one that can handle the NVIDIA RTX 4080 Super, e.g. Corsair RM750e 750W PSU"
        );

        let underpowered = CompatibilityWarning {
            issue: "The RTX 4080 needs at least a 750W power supply".to_string(),
            severity: crate::builds::compatibility::Severity::Warning,
            ..missing
        };
        assert!(missing_part_note(&underpowered).is_none());
    }

    #[test]
    fn test_infer_persona() {
        let state = |use_case: &str, needs: &str| ConversationState {
            use_case: Some(use_case.to_string()),
            specific_needs: Some(needs.to_string()),
            ..ConversationState::new()
        };

        assert_eq!(infer_persona(&state("Gaming", "AAA Titles")), "casual-gamer");
        assert_eq!(infer_persona(&state("Gaming", "Competitive (High FPS)")), "competitive-gamer");
        assert_eq!(infer_persona(&state("Content Creation", "Performance")), "content-creator");
        assert_eq!(infer_persona(&state("Work", "Office Work")), "workstation");
        assert_eq!(infer_persona(&state("Something", "Portability")), "workstation");
    }
}
