//! Handler-level error types.

use thiserror::Error;

/// Errors produced when validating a task definition.
///
/// Failures *during* a run never surface here: the run loop classifies them
/// against the worker taxonomy and reports them through the notifier.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Two or more steps share the same ID.
    #[error("duplicate step ID: '{0}'")]
    DuplicateStepId(String),

    /// A step references an action type with no registered implementation.
    #[error("step '{step_id}' references unknown action type '{action_type}'")]
    UnknownActionType {
        step_id: String,
        action_type: String,
    },
}
