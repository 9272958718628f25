//! User-facing surfaces: output display and command input seams.

pub mod terminal;
pub mod traits;

pub use terminal::TerminalInterface;
pub use traits::{AssistantDisplay, TranscriptSource};
