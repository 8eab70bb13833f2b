//! Core advisor engine components
//!
//! Turn orchestration, session persistence and the retry engine.

mod chat;
mod memory;
pub mod retry;

pub use chat::{ChatEngine, ChatError, SessionView, TurnOutcome};
pub use memory::{SessionStore, StoreError};
pub use retry::RetryOptions;
