//! Ordered-fallback gateway over the configured text backends.

use crate::traits::TextGenerator;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("All model backends failed to generate text")]
    AllBackendsFailed,
}

/// Tries each backend in preference order, racing every call against a
/// wall-clock timeout. Backends are tried sequentially, never concurrently;
/// only one model call is in flight at a time.
pub struct ModelGateway {
    backends: Vec<Arc<dyn TextGenerator>>,
    backend_timeout: Duration,
}

impl ModelGateway {
    pub fn new(backends: Vec<Arc<dyn TextGenerator>>) -> Self {
        Self {
            backends,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, backend_timeout: Duration) -> Self {
        self.backend_timeout = backend_timeout;
        self
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Issue the prompt to the first backend that yields non-empty text
    /// within the deadline.
    ///
    /// A fired timeout abandons the in-flight worker without killing it; its
    /// eventual result is discarded. Errors and timeouts are treated alike:
    /// log and advance to the next backend.
    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        for backend in &self.backends {
            let name = backend.name();

            if !backend.has_credentials() {
                warn!(backend = name, "API key not available, trying next backend");
                continue;
            }

            info!(backend = name, "attempting to generate text");

            let worker = {
                let backend = Arc::clone(backend);
                let prompt = prompt.to_string();
                tokio::spawn(async move { backend.generate(&prompt).await })
            };

            match timeout(self.backend_timeout, worker).await {
                Ok(Ok(Ok(text))) if !text.trim().is_empty() => {
                    info!(backend = name, "successfully generated text");
                    return Ok(text.trim().to_string());
                }
                Ok(Ok(Ok(_))) => {
                    warn!(backend = name, "backend returned empty text, trying next");
                }
                Ok(Ok(Err(e))) => {
                    warn!(backend = name, error = %e, "backend failed, trying next");
                }
                Ok(Err(join_err)) => {
                    warn!(backend = name, error = %join_err, "backend worker panicked, trying next");
                }
                Err(_) => {
                    // Dropping the join handle abandons the worker; it is not
                    // aborted, and whatever it returns later is discarded.
                    warn!(
                        backend = name,
                        timeout_secs = self.backend_timeout.as_secs(),
                        "backend timed out, trying next"
                    );
                }
            }
        }

        Err(GatewayError::AllBackendsFailed)
    }
}
