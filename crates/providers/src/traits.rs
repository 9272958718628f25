use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Missing credential for {0}")]
    MissingCredential(&'static str),
}

/// One text-generation backend: prompt string in, raw text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    fn name(&self) -> &'static str;

    /// Backends without a configured credential are skipped, not retried.
    fn has_credentials(&self) -> bool;
}
