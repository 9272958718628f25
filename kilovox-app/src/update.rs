//! Release update check against the GitHub releases API.

use crate::config::UpdateChannel;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

const RELEASES_URL: &str = "https://api.github.com/repos/kilovox/kilovox/releases";

/// Latest release tag for the chosen channel, or `None` when the
/// installed version is already current.
pub async fn check_for_update(
    client: &reqwest::Client,
    channel: UpdateChannel,
    current_version: Option<&str>,
) -> Result<Option<String>> {
    let url = match channel {
        UpdateChannel::Release => format!("{}/latest", RELEASES_URL),
        UpdateChannel::PreRelease => RELEASES_URL.to_string(),
    };

    // GitHub rejects requests without a user agent.
    let response = client
        .get(&url)
        .header("User-Agent", "kilovox")
        .send()
        .await
        .context("Update check request failed")?;
    if !response.status().is_success() {
        return Err(anyhow!("Update check returned HTTP {}", response.status()));
    }
    let body: Value = response
        .json()
        .await
        .context("Update check returned invalid JSON")?;

    let latest = latest_tag(&body, channel)
        .ok_or_else(|| anyhow!("No release found for the configured channel"))?;
    debug!(latest, ?current_version, "update check complete");

    match current_version {
        Some(current) if current == latest => Ok(None),
        _ => Ok(Some(latest.to_string())),
    }
}

/// Releases are newest-first; the pre-release channel takes the head of
/// the list, the release channel gets a single object back.
fn latest_tag(body: &Value, channel: UpdateChannel) -> Option<&str> {
    match channel {
        UpdateChannel::Release => body.get("tag_name")?.as_str(),
        UpdateChannel::PreRelease => body.as_array()?.first()?.get("tag_name")?.as_str(),
    }
}
