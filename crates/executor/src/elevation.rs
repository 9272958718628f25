//! Per-platform privilege elevation, selected once at startup from the OS
//! descriptor.

use tokio::process::Command;
use tracing::warn;

fn invoking_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.is_empty())
}

/// How a dangerous command is wrapped for administrator execution.
pub trait ElevationStrategy: Send + Sync {
    fn describe(&self) -> &'static str;

    /// False for the unrecognized-OS fallback, which runs dangerous
    /// commands unelevated.
    fn elevates(&self) -> bool {
        true
    }

    /// Expand the home-directory placeholder for the invoking user so the
    /// elevated shell does not resolve it to root's home.
    fn expand_home(&self, command: &str) -> String;

    fn elevated_command(&self, command: &str) -> Command;
}

/// Linux: polkit prompt via `pkexec`.
pub struct PolkitElevation;

impl ElevationStrategy for PolkitElevation {
    fn describe(&self) -> &'static str {
        "pkexec"
    }

    fn expand_home(&self, command: &str) -> String {
        match invoking_user() {
            Some(user) if user != "root" => command.replace("~/", &format!("/home/{}/", user)),
            _ => command.to_string(),
        }
    }

    fn elevated_command(&self, command: &str) -> Command {
        let mut cmd = Command::new("pkexec");
        cmd.args(["bash", "-c", command]);
        cmd
    }
}

/// macOS: `sudo` prompt.
pub struct SudoElevation;

impl ElevationStrategy for SudoElevation {
    fn describe(&self) -> &'static str {
        "sudo"
    }

    fn expand_home(&self, command: &str) -> String {
        match invoking_user() {
            Some(user) if user != "root" => command.replace("~/", &format!("/Users/{}/", user)),
            _ => command.to_string(),
        }
    }

    fn elevated_command(&self, command: &str) -> Command {
        let mut cmd = Command::new("sudo");
        cmd.args(["bash", "-c", command]);
        cmd
    }
}

/// Windows: UAC prompt via PowerShell `Start-Process -Verb RunAs`.
pub struct RunAsElevation;

impl ElevationStrategy for RunAsElevation {
    fn describe(&self) -> &'static str {
        "powershell RunAs"
    }

    fn expand_home(&self, command: &str) -> String {
        match std::env::var("USERNAME").ok().filter(|u| !u.is_empty()) {
            Some(user) => command.replace("%USERPROFILE%", &format!("C:\\Users\\{}", user)),
            None => command.to_string(),
        }
    }

    fn elevated_command(&self, command: &str) -> Command {
        let ps_command = format!(
            "Start-Process -FilePath \"cmd\" -ArgumentList \"/c {}\" -Verb RunAs -Wait -PassThru",
            command
        );
        let mut cmd = Command::new("powershell");
        cmd.args(["-Command", &ps_command]);
        cmd
    }
}

/// Unrecognized OS: dangerous commands run without elevation. This is a
/// deliberate permissive policy carried over from the original behavior,
/// announced loudly at selection time.
pub struct NoElevation;

impl ElevationStrategy for NoElevation {
    fn describe(&self) -> &'static str {
        "none"
    }

    fn elevates(&self) -> bool {
        false
    }

    fn expand_home(&self, command: &str) -> String {
        command.to_string()
    }

    fn elevated_command(&self, command: &str) -> Command {
        super::shell::shell_command(command)
    }
}

/// Pick the elevation strategy for an OS descriptor such as
/// `linux-arch`, `macos-14.2`, or `windows-11`.
pub fn select_strategy(os_descriptor: &str) -> Box<dyn ElevationStrategy> {
    let os = os_descriptor.to_lowercase();
    if os.starts_with("linux") {
        Box::new(PolkitElevation)
    } else if os.starts_with("macos") || os.starts_with("darwin") {
        Box::new(SudoElevation)
    } else if os.starts_with("windows") {
        Box::new(RunAsElevation)
    } else {
        warn!(
            os = os_descriptor,
            "unknown operating system: dangerous commands will run WITHOUT elevation"
        );
        Box::new(NoElevation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_selects_polkit() {
        let strategy = select_strategy("linux-ubuntu");
        assert_eq!(strategy.describe(), "pkexec");
        assert!(strategy.elevates());
    }

    #[test]
    fn test_macos_selects_sudo() {
        assert_eq!(select_strategy("macos-14.2").describe(), "sudo");
        assert_eq!(select_strategy("darwin").describe(), "sudo");
    }

    #[test]
    fn test_windows_selects_runas() {
        assert_eq!(select_strategy("windows-11").describe(), "powershell RunAs");
    }

    #[test]
    fn test_unknown_os_does_not_elevate() {
        let strategy = select_strategy("plan9");
        assert!(!strategy.elevates());
    }

    #[test]
    fn test_windows_profile_expansion() {
        std::env::set_var("USERNAME", "kim");
        let strategy = RunAsElevation;
        let expanded = strategy.expand_home("dir %USERPROFILE%\\Desktop");
        assert_eq!(expanded, "dir C:\\Users\\kim\\Desktop");
    }
}
