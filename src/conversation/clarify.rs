//! Re-prompts for vague answers and out-of-range budgets

use crate::validation::BudgetError;

use super::flow::BUDGET_CHIPS;
use super::{ConversationResponse, ConversationState};

/// Vague answers in a row before we switch to guided prompts
pub const ESCALATION_THRESHOLD: u32 = 3;

/// Step-aware nudge for a vague answer. Escalates to guided prompts once
/// the user has been vague [`ESCALATION_THRESHOLD`] times in a row.
pub fn clarification_message(state: &ConversationState, vague_input_count: u32) -> ConversationResponse {
    if vague_input_count >= ESCALATION_THRESHOLD {
        return ConversationResponse::new(
            "Having trouble narrowing it down? That's completely normal. Pick one of these to get started \
             and I'll take it from there.",
        )
        .with_chips([
            "What will you use the PC for?",
            "What's your budget range?",
            "Show me gaming builds",
            "Show me work builds",
            "Switch to Persona Mode",
        ]);
    }

    match state.step {
        0 | 1 => ConversationResponse::new(
            "No problem! To point you in the right direction, will this PC be mostly for gaming, work, \
             or content creation?",
        )
        .with_chips(["I want a gaming PC", "I need it for work", "Content creation", "A bit of everything"]),
        2 => ConversationResponse::new(
            "Could you give me a little more detail? Even one priority helps, like raw speed, \
             quiet operation or room to upgrade later.",
        )
        .with_chips(["Performance", "Quiet", "Upgradeable", "Compact"]),
        3 => ConversationResponse::new(
            "A rough budget is all I need. Even a ballpark figure lets me pick the right parts.",
        )
        .with_chips(["Under $1000", "$1000-$1500", "$1500-$2000", "$2000+"]),
        _ => ConversationResponse::new(
            "I didn't quite catch that. Could you tell me a bit more about what you're looking for?",
        )
        .with_chips(["Start Over", "Show my builds"]),
    }
}

/// Follow-up after a budget was rejected, with realistic alternatives
pub fn budget_guidance(error: BudgetError) -> ConversationResponse {
    match error {
        BudgetError::TooLow => ConversationResponse::new(
            "Budgets under $400 don't leave room for a complete new PC. At the entry-level you'd be \
             trading away a lot, so most people start around $400-750. Want to try one of these?",
        )
        .with_chips(["$400", "$750", "$1000", "Custom"]),
        BudgetError::TooHigh => ConversationResponse::new(
            "That's beyond a practical budget ceiling for a single PC. Even top-tier builds rarely need \
             more than $8,000. Want to pick a range that still gets you flagship parts?",
        )
        .with_chips(["$1500", "$3000", "$5000", "$8000", "Custom"]),
        BudgetError::InvalidFormat => ConversationResponse::new(
            "Try a dollar amount like \"$1200\" or \"1.5k\", or pick a range below.",
        )
        .with_chips(BUDGET_CHIPS),
    }
}
