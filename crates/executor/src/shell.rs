//! Shell execution of USER-owned tasks, with placeholder substitution and
//! dangerous-command interception.

use crate::elevation::ElevationStrategy;
use kilovox_policy::DangerPolicy;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Literal token inside a command that is replaced with the last published
/// user-facing output before execution.
pub const PLACEHOLDER_TOKEN: &str = "$LAST_OUTPUT";

/// Execution ceiling for both direct and elevated commands.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(45);

/// Build a command that runs `command_text` through the OS shell in shell
/// mode, so pipes and redirection behave as typed.
pub fn shell_command(command_text: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_text]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_text]);
        cmd
    }
}

/// Which path a command takes through the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionRoute {
    Direct,
    Elevated,
}

pub struct ShellExecutor {
    policy: DangerPolicy,
    elevation: Box<dyn ElevationStrategy>,
    command_timeout: Duration,
}

impl ShellExecutor {
    pub fn new(policy: DangerPolicy, elevation: Box<dyn ElevationStrategy>) -> Self {
        Self {
            policy,
            elevation,
            command_timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, command_timeout: Duration) -> Self {
        self.command_timeout = command_timeout;
        self
    }

    /// Routing decision for a post-substitution command.
    pub fn route(&self, command_text: &str) -> ExecutionRoute {
        if self.policy.is_dangerous(command_text) && self.elevation.elevates() {
            ExecutionRoute::Elevated
        } else {
            ExecutionRoute::Direct
        }
    }

    /// Run one USER-owned task command and capture its stdout.
    ///
    /// Failures are contained: timeouts, elevation refusals, and non-zero
    /// exits all come back as synthetic output strings so the next model
    /// turn can react to them. This method never errors.
    pub async fn run(&self, command_text: &str, last_output: &str) -> String {
        let mut command_text = command_text.to_string();
        if command_text.contains(PLACEHOLDER_TOKEN) {
            command_text = command_text.replace(PLACEHOLDER_TOKEN, last_output);
            info!("substituted {} in command", PLACEHOLDER_TOKEN);
        }

        if self.policy.is_dangerous(&command_text) {
            if self.elevation.elevates() {
                warn!(
                    elevation = self.elevation.describe(),
                    "dangerous command detected, prompting for administrator confirmation"
                );
                return self.run_elevated(&command_text).await;
            }
            warn!("unknown operating system: running dangerous command without elevation");
        }

        info!(command = %command_text, "running USER command");
        self.run_direct(&command_text).await
    }

    async fn run_elevated(&self, command_text: &str) -> String {
        let expanded = self.elevation.expand_home(command_text);
        let mut cmd = self.elevation.elevated_command(&expanded);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.command_timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!(error = %e, "failed to prompt for administrator confirmation");
                return "Failed to authenticate as administrator".to_string();
            }
            Err(_) => {
                error!("administrator authentication timed out");
                return "Command timed out during authentication".to_string();
            }
        };

        if output.status.success() {
            info!("dangerous command executed with administrator privileges");
            String::from_utf8_lossy(&output.stdout).to_string()
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(%stderr, "dangerous command failed or was cancelled");
            format!("Command cancelled or failed: {}", stderr)
        }
    }

    async fn run_direct(&self, command_text: &str) -> String {
        let mut cmd = shell_command(command_text);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Exit code is deliberately ignored and stderr is not merged here;
        // the raw stdout is what flows back into the next model turn.
        match timeout(self.command_timeout, cmd.output()).await {
            Ok(Ok(output)) => String::from_utf8_lossy(&output.stdout).to_string(),
            Ok(Err(e)) => {
                error!(error = %e, "failed to run command");
                format!("Command failed to start: {}", e)
            }
            Err(_) => {
                error!(
                    timeout_secs = self.command_timeout.as_secs(),
                    "command timed out"
                );
                format!(
                    "Command timed out after {} seconds",
                    self.command_timeout.as_secs()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::{select_strategy, NoElevation};

    fn direct_executor() -> ShellExecutor {
        ShellExecutor::new(DangerPolicy::new(), Box::new(NoElevation))
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_captures_stdout() {
        let out = direct_executor().run("echo hello", "").await;
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_placeholder_substituted_before_execution() {
        let out = direct_executor()
            .run("echo $LAST_OUTPUT", "previous answer")
            .await;
        assert_eq!(out.trim(), "previous answer");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_shell_mode_supports_pipes() {
        let out = direct_executor().run("printf 'a\\nb\\n' | wc -l", "").await;
        assert_eq!(out.trim(), "2");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_stderr_not_merged_into_direct_output() {
        let out = direct_executor().run("echo visible; echo hidden 1>&2", "").await;
        assert_eq!(out.trim(), "visible");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_timeout_yields_synthetic_output() {
        let executor = direct_executor().with_timeout(Duration::from_millis(100));
        let out = executor.run("sleep 5", "").await;
        assert!(out.contains("timed out"));
    }

    #[test]
    fn test_dangerous_command_routes_through_elevation_on_linux() {
        let executor = ShellExecutor::new(DangerPolicy::new(), select_strategy("linux-fedora"));
        assert_eq!(
            executor.route("sudo rm -rf /tmp/x"),
            ExecutionRoute::Elevated
        );
    }

    #[test]
    fn test_safe_command_routes_direct() {
        let executor = ShellExecutor::new(DangerPolicy::new(), select_strategy("linux-fedora"));
        assert_eq!(executor.route("ls -la"), ExecutionRoute::Direct);
    }

    #[test]
    fn test_unknown_os_routes_dangerous_command_direct() {
        let executor = ShellExecutor::new(DangerPolicy::new(), select_strategy("temple-os"));
        assert_eq!(executor.route("sudo id"), ExecutionRoute::Direct);
    }
}
