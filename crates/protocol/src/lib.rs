//! Wire protocol between the assistant core and the model: the task-list
//! grammar, the user-output delimiters, and their parser/serializer.

pub mod parser;
pub mod task;

pub use parser::{parse_response, ParsedResponse};
pub use task::{format_task_list, ProtocolError, Task, TaskOwner, TaskStatus};
