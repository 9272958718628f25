//! Bridges between the runtime trait seams and the concrete crates.

use async_trait::async_trait;
use kilovox_executor::ShellExecutor;
use kilovox_providers::ModelGateway;
use kilovox_runtime::{CommandRunner, PromptGateway, RuntimeError};

pub struct GatewayAdapter {
    inner: ModelGateway,
}

impl GatewayAdapter {
    pub fn new(inner: ModelGateway) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PromptGateway for GatewayAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, RuntimeError> {
        self.inner
            .generate(prompt)
            .await
            .map_err(|e| RuntimeError::ModelError(e.to_string()))
    }
}

pub struct RunnerAdapter {
    inner: ShellExecutor,
}

impl RunnerAdapter {
    pub fn new(inner: ShellExecutor) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CommandRunner for RunnerAdapter {
    async fn run(&self, command: &str, last_output: &str) -> String {
        self.inner.run(command, last_output).await
    }
}
