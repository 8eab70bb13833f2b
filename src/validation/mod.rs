//! Free-text input checks that gate each chat turn
//!
//! Both checks are pure and run before anything is sent to the responder:
//! vague input is re-prompted, and at the budget step the amount must parse
//! and fall within bounds.

pub mod budget;
pub mod vague;

pub use budget::{validate_budget, BudgetError, BudgetValidationResult};
pub use vague::is_vague_input;
