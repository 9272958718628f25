//! Configuration loaded from one small text file per key.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

const DEFAULT_AI_PREFERENCE: &str = "gemini, chatgpt, claude";
const DEFAULT_WAKE_WORD: &str = "computer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChannel {
    Release,
    PreRelease,
}

#[derive(Debug)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub chatgpt_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub ai_preference: Vec<String>,
    pub system_prompt: String,
    pub wake_word: String,
    pub os_descriptor: Option<String>,
    pub update_channel: UpdateChannel,
    pub version: Option<String>,
}

/// Read one config file. Missing files, empty content, and the literal
/// strings "null" / "none" all mean the key is unset.
fn read_key(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    let raw = std::fs::read_to_string(&path).ok()?;
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("none")
    {
        return None;
    }
    Some(value.to_string())
}

impl AppConfig {
    pub fn load(dir: &Path) -> Result<Self> {
        let system_prompt = read_key(dir, "prompt").with_context(|| {
            format!(
                "Required config file 'prompt' missing or empty in {}",
                dir.display()
            )
        })?;

        let ai_preference_raw = read_key(dir, "ai_preference").unwrap_or_else(|| {
            warn!("ai_preference not set, using default backend order");
            DEFAULT_AI_PREFERENCE.to_string()
        });
        let ai_preference = ai_preference_raw
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let update_channel = match read_key(dir, "updates").as_deref() {
            Some("pre-release") => UpdateChannel::PreRelease,
            Some("release") | None => UpdateChannel::Release,
            Some(other) => {
                warn!(channel = other, "unknown update channel, using release");
                UpdateChannel::Release
            }
        };

        Ok(Self {
            gemini_api_key: read_key(dir, "gemini_api_key"),
            chatgpt_api_key: read_key(dir, "chatgpt_api_key"),
            claude_api_key: read_key(dir, "claude_api_key"),
            ai_preference,
            system_prompt,
            wake_word: read_key(dir, "wake_word")
                .unwrap_or_else(|| DEFAULT_WAKE_WORD.to_string()),
            os_descriptor: read_key(dir, "os_version"),
            update_channel,
            version: read_key(dir, "version"),
        })
    }
}
