//! Text-generation backends and the ordered-fallback model gateway.

pub mod claude;
pub mod gateway;
pub mod gemini;
pub mod openai;
pub mod traits;

pub use claude::ClaudeBackend;
pub use gateway::{GatewayError, ModelGateway, DEFAULT_BACKEND_TIMEOUT};
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;
pub use traits::{ProviderError, TextGenerator};

use std::sync::Arc;
use tracing::warn;

/// Map a backend preference list onto constructed backends.
///
/// Unrecognized names are skipped with a warning; order is preserved.
pub fn build_backends(
    preference: &[String],
    gemini_key: Option<String>,
    chatgpt_key: Option<String>,
    claude_key: Option<String>,
) -> Vec<Arc<dyn TextGenerator>> {
    let mut backends: Vec<Arc<dyn TextGenerator>> = Vec::with_capacity(preference.len());
    for name in preference {
        match name.trim().to_lowercase().as_str() {
            "gemini" => backends.push(Arc::new(GeminiBackend::new(gemini_key.clone()))),
            "chatgpt" => backends.push(Arc::new(OpenAiBackend::new(chatgpt_key.clone()))),
            "claude" => backends.push(Arc::new(ClaudeBackend::new(claude_key.clone()))),
            other => warn!(backend = other, "unrecognized backend name, skipping"),
        }
    }
    backends
}
