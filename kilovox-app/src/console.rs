//! Typed-command loop shared by the primary and attached consoles.

use kilovox_interfaces::{AssistantDisplay, TranscriptSource};
use kilovox_runtime::{CommandRunner, PromptGateway, TurnEngine};
use tracing::debug;

/// Strip a leading wake word so "computer, open firefox" and
/// "open firefox" behave the same when typed.
pub fn strip_wake_word(utterance: &str, wake_word: &str) -> String {
    let trimmed = utterance.trim();
    if let Some(rest) = strip_prefix_ignore_case(trimmed, wake_word) {
        if rest.is_empty() || rest.starts_with([' ', ',']) {
            return rest.trim_start_matches([' ', ',']).to_string();
        }
    }
    trimmed.to_string()
}

// Walks char by char so the split point is always a boundary of `text`;
// lowercasing can change a char's UTF-8 byte length, so byte offsets from
// the lowered strings must not be used to slice the original.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text;
    for pc in prefix.chars() {
        let tc = rest.chars().next()?;
        if !tc.to_lowercase().eq(pc.to_lowercase()) {
            return None;
        }
        rest = &rest[tc.len_utf8()..];
    }
    Some(rest)
}

pub async fn command_loop<G, C, D, S>(
    engine: &TurnEngine<G, C, D>,
    source: &mut S,
    wake_word: &str,
) where
    G: PromptGateway,
    C: CommandRunner,
    D: AssistantDisplay,
    S: TranscriptSource,
{
    while let Some(utterance) = source.next_utterance().await {
        if matches!(utterance.as_str(), "exit" | "quit") {
            break;
        }
        let command = strip_wake_word(&utterance, wake_word);
        if command.is_empty() {
            debug!("wake word alone, waiting for a command");
            continue;
        }
        engine.run_turn(&command).await;
    }
}
