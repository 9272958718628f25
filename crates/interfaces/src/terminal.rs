//! Plain-terminal interface: typed commands in, framed text out.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::traits::{AssistantDisplay, TranscriptSource};

pub struct TerminalInterface {
    lines: Lines<BufReader<Stdin>>,
    prompt: String,
}

impl TerminalInterface {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            prompt: prompt.into(),
        }
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new("> ")
    }
}

#[async_trait]
impl AssistantDisplay for TerminalInterface {
    async fn show_output(&self, text: &str) {
        println!("\n=== Output ===\n{}\n==============\n", text);
    }

    async fn show_failure(&self, reason: &str) {
        eprintln!("\n[!] {}\n", reason);
    }

    async fn show_status(&self, status: &str) {
        println!("... {}", status);
    }
}

#[async_trait]
impl TranscriptSource for TerminalInterface {
    async fn next_utterance(&mut self) -> Option<String> {
        use std::io::Write;
        print!("{}", self.prompt);
        let _ = std::io::stdout().flush();

        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    debug!(utterance = trimmed, "terminal command received");
                    return Some(trimmed.to_string());
                }
                Ok(None) => return None,
                Err(_) => return None,
            }
        }
    }
}
