use async_trait::async_trait;

/// Sink for user-facing assistant output. Implementations decide how a
/// message reaches the user (terminal, notification, speech).
#[async_trait]
pub trait AssistantDisplay: Send + Sync {
    /// Present a message extracted from a model response.
    async fn show_output(&self, text: &str);

    /// Present a turn-ending failure. Failures are informational; the
    /// assistant stays alive and waits for the next command.
    async fn show_failure(&self, reason: &str);

    /// Short progress note while a turn is in flight.
    async fn show_status(&self, status: &str);
}

/// Source of user commands, already reduced to text. A microphone
/// pipeline and a typed console both sit behind this.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Next command from the user, or `None` when the source is closed.
    async fn next_utterance(&mut self) -> Option<String>;
}
