//! Host OS detection for the prompt header and elevation strategy choice.

use sysinfo::System;

/// Descriptor like "linux-fedora", "macos-14.2" or "windows-10".
/// Hosts that fit no known family report "unknown".
pub fn detect_os_descriptor() -> String {
    match std::env::consts::OS {
        "linux" => format!("linux-{}", System::distribution_id()),
        "macos" => format!("macos-{}", version_or_unknown()),
        "windows" => format!("windows-{}", version_or_unknown()),
        _ => "unknown".to_string(),
    }
}

fn version_or_unknown() -> String {
    System::os_version().unwrap_or_else(|| "unknown".to_string())
}
