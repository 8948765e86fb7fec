//! The handler execution loop.
//!
//! `Handler` is the central orchestrator:
//! 1. Runs a task's steps strictly in sequence, dispatching each via
//!    `Action`.
//! 2. Passes the previous step's JSON output as input to the next step.
//! 3. Classifies every failure against the worker error taxonomy.
//! 4. Decides, per classification, whether to halt quietly and whether
//!    (and with how much detail) to notify the remote tracking service.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use actions::{classify, Action, ErrorKind, TaskContext};

use crate::models::{StepDefinition, TaskDescription};
use crate::notify::{Notification, Notifier};

// ---------------------------------------------------------------------------
// Action registry
// ---------------------------------------------------------------------------

/// Maps `action_type` strings to boxed `Action` implementations.
pub type ActionRegistry = HashMap<String, Arc<dyn Action>>;

// ---------------------------------------------------------------------------
// Outcome of a processed task
// ---------------------------------------------------------------------------

/// Terminal outcome of one task's processing sequence.
///
/// `Halted` counts as success from the caller's point of view (a step
/// asked for a gentle stop and handled everything itself) but is kept
/// distinct from `Completed` for telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Every step ran to completion.
    Completed,
    /// A step requested a silent stop; later steps never ran.
    Halted,
    /// A step failed; the classified exit code is the process outcome.
    /// `exit_code` is `None` only for failures the taxonomy cannot place.
    Failed { exit_code: Option<i32> },
}

// ---------------------------------------------------------------------------
// Step failure
// ---------------------------------------------------------------------------

/// How a step came to fail: an error value returned by the action itself,
/// or a fault in the worker's own dispatch machinery. The two drive
/// different diagnostics policy.
enum StepFailure {
    Action(anyhow::Error),
    Dispatch { detail: String },
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Stateless orchestrator that processes tasks one step at a time.
///
/// A single `Handler` may serve many tasks concurrently: it holds only the
/// immutable registry and the notifier, so instances can be shared behind
/// an `Arc` without locks.
pub struct Handler {
    registry: ActionRegistry,
    notifier: Arc<dyn Notifier>,
}

impl Handler {
    /// Create a new handler.
    pub fn new(registry: ActionRegistry, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }

    /// Process the task's steps in order and return the terminal outcome.
    ///
    /// Never returns an error: every failure is classified, reported per
    /// its kind's policy, and folded into the outcome.
    #[instrument(skip(self, task, initial_input), fields(task = %task.name))]
    pub async fn run(&self, task: &TaskDescription, initial_input: Value) -> TaskOutcome {
        let ctx = TaskContext {
            task_name: task.name.clone(),
            execution_id: Uuid::new_v4(),
            payload: task.payload.clone(),
        };

        info!("processing {} steps", task.steps.len());

        let mut current_input = initial_input;

        for step in &task.steps {
            let failure = match self.dispatch(step, current_input.clone(), &ctx).await {
                Ok(output) => {
                    info!("step '{}' succeeded", step.id);
                    current_input = output;
                    continue;
                }
                Err(failure) => failure,
            };

            return self.settle(step, failure).await;
        }

        info!("task '{}' completed", task.name);
        TaskOutcome::Completed
    }

    // -----------------------------------------------------------------------
    // Internal: invoke a single step, folding faults of the invocation
    // machinery itself into `StepFailure::Dispatch`.
    // -----------------------------------------------------------------------

    async fn dispatch(
        &self,
        step: &StepDefinition,
        input: Value,
        ctx: &TaskContext,
    ) -> Result<Value, StepFailure> {
        let action = self
            .registry
            .get(&step.action_type)
            .ok_or_else(|| StepFailure::Dispatch {
                detail: format!(
                    "no action registered for action_type '{}'",
                    step.action_type
                ),
            })?;

        // Run the action on its own task so a panicking step surfaces as a
        // dispatch fault instead of tearing down the handler.
        let action = Arc::clone(action);
        let ctx = ctx.clone();
        let joined = tokio::spawn(async move { action.execute(input, &ctx).await }).await;

        match joined {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => Err(StepFailure::Action(err)),
            Err(join_err) => Err(StepFailure::Dispatch {
                detail: panic_detail(join_err),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Internal: classify a step failure and apply its notification policy.
    // -----------------------------------------------------------------------

    async fn settle(&self, step: &StepDefinition, failure: StepFailure) -> TaskOutcome {
        let kind = match &failure {
            StepFailure::Dispatch { .. } => ErrorKind::HandlerExecution,
            StepFailure::Action(err) => classify(err),
        };

        if kind == ErrorKind::StopProcessing {
            warn!("step '{}' requested a stop; halting the sequence", step.id);
            return TaskOutcome::Halted;
        }

        match &failure {
            StepFailure::Action(err) => error!("step '{}' failed ({kind:?}): {err:#}", step.id),
            StepFailure::Dispatch { detail } => {
                error!("step '{}' dispatch fault: {detail}", step.id);
            }
        }

        if kind.notify_remote() {
            let (message, detail) = match &failure {
                StepFailure::Action(err) => (err.to_string(), format!("{err:?}")),
                StepFailure::Dispatch { detail } => (
                    format!("internal error while executing step '{}'", step.id),
                    detail.clone(),
                ),
            };
            let diagnostics = kind.include_diagnostics().then_some(detail);
            let notification = Notification::new(kind.exit_code(), message, diagnostics);

            // A broken notifier must not trigger a second classification
            // pass; log it and carry on with the original exit code.
            if let Err(delivery_err) = self.notifier.notify_failure(&notification).await {
                error!("failed to deliver failure notification: {delivery_err}");
            }
        }

        TaskOutcome::Failed {
            exit_code: kind.exit_code(),
        }
    }
}

/// Human-readable rendering of a crashed step's join error.
fn panic_detail(join_err: tokio::task::JoinError) -> String {
    if join_err.is_panic() {
        let payload = join_err.into_panic();
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        format!("action panicked: {msg}")
    } else {
        format!("action task failed to join: {join_err}")
    }
}
