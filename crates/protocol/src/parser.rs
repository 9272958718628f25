//! Regex extraction of the task-list protocol from raw model output.

use crate::task::{Task, TaskOwner, TaskStatus};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Whitespace between tokens is flexible; the command text is captured
// non-greedily up to the ` # ` separator.
static TASK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d+)\]\s+(.+?)\s+#\s+(USER|AI)\s+---\s+(DONE|DO NEXT|PENDING|SKIPPED)")
        .expect("task pattern is valid")
});

static USER_OUTPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)"""(.*?)""""#).expect("user output pattern is valid"));

/// Everything the core extracts from one raw model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub user_output: Option<String>,
    pub tasks: Vec<Task>,
}

impl ParsedResponse {
    /// A response with neither a user message nor tasks is a valid no-op.
    pub fn is_empty(&self) -> bool {
        self.user_output.is_none() && self.tasks.is_empty()
    }
}

/// Extract the user-facing message and the task list from a raw response.
///
/// The user message is the trimmed content between the first pair of `"""`
/// delimiters. Tasks are every non-overlapping grammar match, in textual
/// order. No semantic validation of step numbers happens here; the state
/// machine tolerates duplicates and gaps.
pub fn parse_response(response: &str) -> ParsedResponse {
    let user_output = USER_OUTPUT_RE
        .captures(response)
        .map(|caps| caps[1].trim().to_string());

    let tasks: Vec<Task> = TASK_RE
        .captures_iter(response)
        .filter_map(|caps| {
            let step_number: u32 = caps[1].parse().ok()?;
            let owner = TaskOwner::from_wire(&caps[3]).ok()?;
            let status = TaskStatus::from_wire(&caps[4]).ok()?;
            Some(Task::new(step_number, &caps[2], owner, status))
        })
        .collect();

    debug!(
        tasks = tasks.len(),
        has_user_output = user_output.is_some(),
        "parsed model response"
    );

    ParsedResponse { user_output, tasks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::format_task_list;
    use proptest::prelude::*;

    #[test]
    fn test_parse_single_task() {
        let parsed = parse_response("[1] ls -la # USER --- DO NEXT");
        assert_eq!(parsed.tasks.len(), 1);
        assert_eq!(parsed.tasks[0].step_number, 1);
        assert_eq!(parsed.tasks[0].command, "ls -la");
        assert_eq!(parsed.tasks[0].owner, TaskOwner::User);
        assert_eq!(parsed.tasks[0].status, TaskStatus::DoNext);
    }

    #[test]
    fn test_parse_preserves_textual_order() {
        let response = "\
>>
[3] echo last # AI --- PENDING
[1] echo first # USER --- DONE
[2] echo middle # USER --- DO NEXT
<<";
        let parsed = parse_response(response);
        let steps: Vec<u32> = parsed.tasks.iter().map(|t| t.step_number).collect();
        assert_eq!(steps, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_flexible_whitespace() {
        let parsed = parse_response("[7]   df -h   #   USER   ---   PENDING");
        assert_eq!(parsed.tasks.len(), 1);
        assert_eq!(parsed.tasks[0].command, "df -h");
        assert_eq!(parsed.tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_parse_user_output_first_pair_wins() {
        let response = r#"intro """first message""" noise """second""""#;
        let parsed = parse_response(response);
        assert_eq!(parsed.user_output.as_deref(), Some("first message"));
    }

    #[test]
    fn test_parse_user_output_multiline_trimmed() {
        let response = "\"\"\"\n  Disk usage is fine.\nNothing to clean.\n\"\"\"";
        let parsed = parse_response(response);
        assert_eq!(
            parsed.user_output.as_deref(),
            Some("Disk usage is fine.\nNothing to clean.")
        );
    }

    #[test]
    fn test_parse_no_markers_is_empty_not_error() {
        let parsed = parse_response("The weather is lovely today.");
        assert!(parsed.user_output.is_none());
        assert!(parsed.tasks.is_empty());
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_unmatched_triple_quote_ignored() {
        let parsed = parse_response(r#"broken """half open"#);
        assert!(parsed.user_output.is_none());
    }

    #[test]
    fn test_parse_mixed_output_and_tasks() {
        let response = r#"
"""
Cleaning temp files now.
"""
>>
[1] du -sh /tmp # USER --- DO NEXT
[2] review the sizes # AI --- PENDING
<<
"#;
        let parsed = parse_response(response);
        assert_eq!(parsed.user_output.as_deref(), Some("Cleaning temp files now."));
        assert_eq!(parsed.tasks.len(), 2);
        assert_eq!(parsed.tasks[1].owner, TaskOwner::Ai);
    }

    #[test]
    fn test_parse_duplicate_step_numbers_kept() {
        // The parser does not validate uniqueness; the state machine copes.
        let response = "[1] a # USER --- DONE\n[1] b # USER --- PENDING";
        let parsed = parse_response(response);
        assert_eq!(parsed.tasks.len(), 2);
    }

    #[test]
    fn test_serialize_then_parse_round_trip() {
        let tasks = vec![
            Task::new(1, "apt list --upgradable", TaskOwner::User, TaskStatus::Done),
            Task::new(2, "summarize the package list", TaskOwner::Ai, TaskStatus::DoNext),
            Task::new(5, "echo $LAST_OUTPUT", TaskOwner::User, TaskStatus::Pending),
        ];
        let parsed = parse_response(&format_task_list(&tasks));
        assert_eq!(parsed.tasks, tasks);
    }

    fn arb_command() -> impl Strategy<Value = String> {
        // Command text may not contain the ` # ` separator or newlines, and
        // the grammar requires it to be non-empty without edge whitespace.
        "[a-zA-Z0-9 ./_-]{1,40}"
            .prop_map(|s| s.trim().to_string())
            .prop_filter("non-empty", |s| !s.is_empty())
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (
            1u32..10_000,
            arb_command(),
            prop_oneof![Just(TaskOwner::User), Just(TaskOwner::Ai)],
            prop_oneof![
                Just(TaskStatus::Pending),
                Just(TaskStatus::DoNext),
                Just(TaskStatus::Done),
                Just(TaskStatus::Skipped),
            ],
        )
            .prop_map(|(n, cmd, owner, status)| Task::new(n, cmd, owner, status))
    }

    proptest! {
        #[test]
        fn prop_format_parse_round_trip(tasks in proptest::collection::vec(arb_task(), 0..8)) {
            let parsed = parse_response(&format_task_list(&tasks));
            prop_assert_eq!(parsed.tasks, tasks);
        }
    }
}
