use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown task owner: {0}")]
    UnknownOwner(String),
    #[error("Unknown task status: {0}")]
    UnknownStatus(String),
}

/// Who executes a task: the local shell or the remote model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskOwner {
    User,
    Ai,
}

impl TaskOwner {
    pub fn as_wire(&self) -> &'static str {
        match self {
            TaskOwner::User => "USER",
            TaskOwner::Ai => "AI",
        }
    }

    pub fn from_wire(token: &str) -> Result<Self, ProtocolError> {
        match token {
            "USER" => Ok(TaskOwner::User),
            "AI" => Ok(TaskOwner::Ai),
            other => Err(ProtocolError::UnknownOwner(other.to_string())),
        }
    }
}

impl fmt::Display for TaskOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    DoNext,
    Done,
    Skipped,
}

impl TaskStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::DoNext => "DO NEXT",
            TaskStatus::Done => "DONE",
            TaskStatus::Skipped => "SKIPPED",
        }
    }

    pub fn from_wire(token: &str) -> Result<Self, ProtocolError> {
        match token {
            "PENDING" => Ok(TaskStatus::Pending),
            "DO NEXT" => Ok(TaskStatus::DoNext),
            "DONE" => Ok(TaskStatus::Done),
            "SKIPPED" => Ok(TaskStatus::Skipped),
            other => Err(ProtocolError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One entry of the model-emitted todo list.
///
/// Step numbers are unique within a list but carry no ordering guarantee;
/// list position is extraction order from the response text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub step_number: u32,
    pub command: String,
    pub owner: TaskOwner,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(step_number: u32, command: impl Into<String>, owner: TaskOwner, status: TaskStatus) -> Self {
        Self {
            step_number,
            command: command.into(),
            owner,
            status,
        }
    }
}

/// Serialize a task list into the framed wire form the model is instructed
/// to emit:
///
/// ```text
/// >>
/// [1] ls -la # USER --- DONE
/// <<
/// ```
pub fn format_task_list(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 2);
    lines.push(">>".to_string());
    for task in tasks {
        lines.push(format!(
            "[{}] {} # {} --- {}",
            task.step_number,
            task.command,
            task.owner.as_wire(),
            task.status.as_wire()
        ));
    }
    lines.push("<<".to_string());
    lines.join("\n")
}
