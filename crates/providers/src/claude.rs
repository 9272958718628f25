use crate::traits::*;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const CLAUDE_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct ClaudeBackend {
    client: Client,
    api_key: Option<String>,
}

impl ClaudeBackend {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("claude"))?;

        let body = json!({
            "model": CLAUDE_MODEL,
            "max_tokens": 4096,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("{}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text = json["content"]
            .get(0)
            .and_then(|block| block["text"].as_str())
            .ok_or_else(|| ProviderError::Parse("No text block in response".to_string()))?;

        Ok(text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "claude"
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
