//! The `Action` trait — the contract every handler step must fulfil.

use async_trait::async_trait;
use serde_json::Value;

/// Shared context passed to every action while a task is being processed.
///
/// Defined here (in the actions crate) so both the handler and individual
/// action implementations can import it without a circular dependency.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Name of the task, as assigned by the remote submission service.
    pub task_name: String,
    /// ID of the current handler run.
    pub execution_id: uuid::Uuid,
    /// The job-description blob submitted with the task. The worker never
    /// reads into it; actions may forward it verbatim to the submission
    /// service.
    pub payload: Value,
}

/// The core action trait.
///
/// One discrete unit of work in a task's processing sequence. Actions run
/// strictly one after another; each receives the previous action's output
/// as `input` and returns its own output for the next.
#[async_trait]
pub trait Action: Send + Sync {
    /// Execute the step.
    ///
    /// Anticipated failures should be raised as [`crate::WorkerError`] so
    /// the handler reports a clean message under a stable exit code; any
    /// other error is reported with full diagnostics attached.
    async fn execute(&self, input: Value, ctx: &TaskContext) -> anyhow::Result<Value>;
}
