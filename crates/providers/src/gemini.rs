use crate::traits::*;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiBackend {
    client: Client,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("gemini"))?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            GEMINI_MODEL, api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(&url)
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

        let text = json["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].get(0))
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| ProviderError::Parse("No text in candidates".to_string()))?;

        Ok(text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
