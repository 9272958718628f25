use crate::traits::*;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const CHATGPT_MODEL: &str = "gpt-3.5-turbo";

pub struct OpenAiBackend {
    client: Client,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("chatgpt"))?;

        let body = json!({
            "model": CHATGPT_MODEL,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
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

        let content = json["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| ProviderError::Parse("No choices in response".to_string()))?;

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "chatgpt"
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
