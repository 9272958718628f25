use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deny-list of command fragments that must not run without elevation.
///
/// Matching is a case-insensitive substring check against the full command
/// text after placeholder substitution. The list covers privilege
/// escalation, destructive filesystem and disk utilities, power control,
/// firewall toggles, and low-level system mutators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DangerPolicy {
    patterns: Vec<String>,
}

impl DangerPolicy {
    pub fn new() -> Self {
        Self {
            patterns: Self::default_patterns(),
        }
    }

    pub fn with_patterns(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns.into_iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    fn default_patterns() -> Vec<String> {
        [
            "sudo",
            "rm",
            "del",
            "erase",
            "dd",
            "diskpart",
            "format",
            "shutdown",
            "reboot",
            "poweroff",
            "mkfs",
            "reg delete",
            "sysctl -w",
            "launchctl",
            "iptables -F",
            "ufw disable",
            "netsh",
        ]
        .iter()
        .map(|p| p.to_lowercase())
        .collect()
    }

    /// True if any deny-list entry appears anywhere in the command text.
    pub fn is_dangerous(&self, command: &str) -> bool {
        let lowered = command.to_lowercase();
        match self.patterns.iter().find(|p| lowered.contains(p.as_str())) {
            Some(pattern) => {
                debug!(%pattern, "command matched deny-list");
                true
            }
            None => false,
        }
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into().to_lowercase());
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for DangerPolicy {
    fn default() -> Self {
        Self::new()
    }
}
