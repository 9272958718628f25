//! Prompt assembly for the initial request and task-list continuations.

/// Prompt for the first model call of a turn.
pub fn build_initial_prompt(os_descriptor: &str, system_prompt: &str, command: &str) -> String {
    format!(
        "OS: {}\n\n{}\n\nUser Command: {}",
        os_descriptor, system_prompt, command
    )
}

/// Prompt for a continuation call: carries the previous command output
/// and the serialized task list so the model can pick up the DO NEXT task.
pub fn build_continuation_prompt(
    os_descriptor: &str,
    system_prompt: &str,
    previous_output: &str,
    formatted_tasks: &str,
) -> String {
    format!(
        "OS: {}\n\n{}\n\nPrevious Command Output:\n{}\n\nTodo List:\n{}\n\n\
         This is a continuation of a previous task. Continue the task list \
         by fulfilling the task marked 'DO NEXT'.",
        os_descriptor, system_prompt, previous_output, formatted_tasks
    )
}
