//! Shell executor for USER-owned tasks: placeholder substitution, deny-list
//! interception, and per-platform privilege elevation.

pub mod elevation;
pub mod shell;

pub use elevation::{select_strategy, ElevationStrategy, NoElevation, PolkitElevation, RunAsElevation, SudoElevation};
pub use shell::{shell_command, ExecutionRoute, ShellExecutor, COMMAND_TIMEOUT, PLACEHOLDER_TOKEN};
