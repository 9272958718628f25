//! Trait contracts between the turn engine and its collaborators.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Model error: {0}")]
    ModelError(String),
}

/// Produces a model response for a fully-built prompt. Backend choice,
/// fallback and timeouts live behind this seam.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RuntimeError>;
}

/// Executes one USER-owned shell command and returns its captured output.
///
/// Never fails the turn: execution problems come back as synthetic
/// output text for the next continuation prompt.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, last_output: &str) -> String;
}
