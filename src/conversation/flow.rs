//! The guided five-step conversation
//!
//! greeting → use case → specific needs → budget → done. Transitions are pure:
//! [`next_step`] takes the current state and returns the next one alongside
//! the response, so callers thread state forward explicitly.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{ConversationResponse, ConversationState};

pub const BUDGET_STEP: u32 = 3;

/// Budget used when the budget answer holds no number
pub const DEFAULT_BUDGET: u64 = 1000;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d+)").expect("integer pattern is valid"));

pub const USE_CASE_CHIPS: [&str; 5] = ["Gaming", "Work", "Content Creation", "Student", "AI/ML"];
pub const GAMING_CHIPS: [&str; 4] = ["Competitive (High FPS)", "AAA Titles", "Casual", "VR Gaming"];
pub const WORK_CHIPS: [&str; 4] = ["Office Work", "Programming", "3D Modeling", "Video Editing"];
pub const NEEDS_CHIPS: [&str; 4] = ["Performance", "Portability", "Budget-Friendly", "Future-Proof"];
pub const BUDGET_CHIPS: [&str; 5] = ["$500-$750", "$750-$1000", "$1000-$1500", "$1500-$2000", "$2000+"];

/// Advance the conversation with an accepted (non-vague) answer.
pub fn next_step(
    state: &ConversationState,
    user_message: Option<&str>,
) -> (ConversationState, ConversationResponse) {
    let mut next = state.clone();
    let message = user_message.unwrap_or_default();

    if let Some(text) = user_message {
        next.context.insert(
            format!("message_{}", state.step),
            Value::String(text.to_string()),
        );
    }
    next.vague_input_count = 0;
    next.last_input_was_vague = false;

    let response = match state.step {
        0 => {
            next.step = 1;
            ConversationResponse::new(
                "Great, let's find the right PC for you! What will you mainly use it for?",
            )
            .with_chips(USE_CASE_CHIPS)
        }
        1 => {
            next.step = 2;
            next.use_case = Some(message.to_string());
            use_case_follow_up(message)
        }
        2 => {
            next.step = 3;
            next.specific_needs = Some(message.to_string());
            ConversationResponse::new(
                "Got it. What's your budget for the whole build? A rough range is fine.",
            )
            .with_chips(BUDGET_CHIPS)
        }
        BUDGET_STEP => {
            let budget = FIRST_INTEGER
                .captures(message)
                .and_then(|caps| caps[1].parse().ok())
                .unwrap_or(DEFAULT_BUDGET);

            next.step = 4;
            next.budget_range = Some(budget);
            next.completed = true;

            ConversationResponse::new(format!(
                "Perfect! Here's what I've got:\n\
                 • Use: {}\n\
                 • Needs: {}\n\
                 • Budget: ${}\n\n\
                 I've put together three builds for you: an optimized pick, a performance pick and a featured pick.",
                next.use_case.as_deref().unwrap_or("General use"),
                next.specific_needs.as_deref().unwrap_or("Balanced"),
                budget
            ))
            .finished()
        }
        _ => ConversationResponse::new(
            "Your recommendations are ready! Take a look at the builds, or start over to try a different setup.",
        )
        .finished(),
    };

    (next, response)
}

/// Record a vague answer without advancing
pub fn register_vague_input(state: &ConversationState) -> ConversationState {
    let mut next = state.clone();
    next.vague_input_count += 1;
    next.last_input_was_vague = true;
    next
}

fn use_case_follow_up(use_case: &str) -> ConversationResponse {
    let lowered = use_case.to_lowercase();

    if lowered.contains("gaming") {
        ConversationResponse::new("Nice! What kind of gaming are you into?").with_chips(GAMING_CHIPS)
    } else if lowered.contains("work") {
        ConversationResponse::new("What kind of work will you be doing on it?").with_chips(WORK_CHIPS)
    } else {
        ConversationResponse::new("What matters most to you in this PC?").with_chips(NEEDS_CHIPS)
    }
}
