//! Turn engine - the core runtime kernel.

use crate::interfaces::{CommandRunner, PromptGateway};
use crate::metrics::{MetricTimer, TimedMetric};
use crate::prompt::{build_continuation_prompt, build_initial_prompt};
use kilovox_interfaces::AssistantDisplay;
use kilovox_protocol::{format_task_list, parse_response, TaskOwner, TaskStatus};
use kilovox_session::SessionState;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ceiling on model calls within a single turn. A well-behaved model
/// shrinks its AI-owned tail each round; this stops the ones that don't.
pub const DEFAULT_MAX_MODEL_CALLS: usize = 16;

/// Drives one user command to completion: model call, task-list
/// bookkeeping, USER command execution, continuation calls.
pub struct TurnEngine<G, C, D>
where
    G: PromptGateway,
    C: CommandRunner,
    D: AssistantDisplay,
{
    gateway: Arc<G>,
    runner: Arc<C>,
    display: Arc<D>,
    session: Arc<SessionState>,
    os_descriptor: String,
    system_prompt: String,
    max_model_calls: usize,
}

impl<G, C, D> TurnEngine<G, C, D>
where
    G: PromptGateway,
    C: CommandRunner,
    D: AssistantDisplay,
{
    pub fn new(
        gateway: Arc<G>,
        runner: Arc<C>,
        display: Arc<D>,
        session: Arc<SessionState>,
        os_descriptor: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            runner,
            display,
            session,
            os_descriptor: os_descriptor.into(),
            system_prompt: system_prompt.into(),
            max_model_calls: DEFAULT_MAX_MODEL_CALLS,
        }
    }

    pub fn with_max_model_calls(mut self, max: usize) -> Self {
        self.max_model_calls = max;
        self
    }

    /// Run one turn for a user command. Failures end the turn but never
    /// the process; they are shown on the display and the engine waits
    /// for the next command.
    pub async fn run_turn(&self, utterance: &str) {
        let _turn_timer = MetricTimer::new(TimedMetric::Turn);
        info!(utterance, "turn started");
        self.display.show_status("working on it").await;

        let prompt = build_initial_prompt(&self.os_descriptor, &self.system_prompt, utterance);
        let mut model_calls = 1usize;
        let response = {
            let _timer = MetricTimer::new(TimedMetric::ModelRequest);
            match self.gateway.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "initial model call failed, ending turn");
                    self.display.show_failure(&e.to_string()).await;
                    return;
                }
            }
        };

        let parsed = parse_response(&response);
        if let Some(text) = &parsed.user_output {
            self.session.publish_output(text);
            self.display.show_output(text).await;
        }
        let mut tasks = parsed.tasks;

        loop {
            if tasks.is_empty() {
                break;
            }

            // Exactly one DO NEXT at a time; promote the first PENDING
            // when the model left none marked.
            if !tasks.iter().any(|t| t.status == TaskStatus::DoNext) {
                match tasks.iter_mut().find(|t| t.status == TaskStatus::Pending) {
                    Some(task) => {
                        debug!(step = task.step_number, "promoting pending task");
                        task.status = TaskStatus::DoNext;
                    }
                    None => break,
                }
            }

            let Some(idx) = tasks.iter().position(|t| t.status == TaskStatus::DoNext) else {
                break;
            };

            match tasks[idx].owner {
                TaskOwner::User => {
                    let command = tasks[idx].command.clone();
                    info!(step = tasks[idx].step_number, command, "executing task");
                    self.display.show_status(&format!("running: {}", command)).await;

                    let output = {
                        let _timer = MetricTimer::new(TimedMetric::CommandExecution);
                        self.runner.run(&command, &self.session.last_output()).await
                    };
                    self.session.set_command_output(&output);

                    tasks[idx].status = TaskStatus::Done;
                    if let Some(next) = tasks.get_mut(idx + 1) {
                        if next.status == TaskStatus::Pending {
                            next.status = TaskStatus::DoNext;
                        }
                    }
                }
                TaskOwner::Ai => {
                    if model_calls >= self.max_model_calls {
                        warn!(
                            max = self.max_model_calls,
                            "model call ceiling reached, abandoning task list"
                        );
                        break;
                    }

                    let prompt = build_continuation_prompt(
                        &self.os_descriptor,
                        &self.system_prompt,
                        &self.session.command_output(),
                        &format_task_list(&tasks),
                    );
                    model_calls += 1;

                    let response = {
                        let _timer = MetricTimer::new(TimedMetric::ModelRequest);
                        match self.gateway.generate(&prompt).await {
                            Ok(text) => text,
                            Err(e) => {
                                warn!(error = %e, "continuation call failed, ending turn");
                                self.display.show_failure(&e.to_string()).await;
                                return;
                            }
                        }
                    };

                    // The model returns the full revised list; it replaces
                    // the working copy wholesale.
                    let parsed = parse_response(&response);
                    if let Some(text) = &parsed.user_output {
                        self.session.publish_output(text);
                        self.display.show_output(text).await;
                    }
                    tasks = parsed.tasks;
                }
            }
        }

        crate::metrics::increment_turn_count();
        info!(model_calls, "turn finished");
    }
}
