//! Runtime kernel: the turn engine and its trait seams.

pub mod interfaces;
pub mod metrics;
pub mod prompt;
pub mod turn_engine;

pub use interfaces::{CommandRunner, PromptGateway, RuntimeError};
pub use prompt::{build_continuation_prompt, build_initial_prompt};
pub use turn_engine::{TurnEngine, DEFAULT_MAX_MODEL_CALLS};
