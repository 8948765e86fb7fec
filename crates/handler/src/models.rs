//! Core domain models for the task worker.
//!
//! These types are the source of truth for what a task looks like in
//! memory; they serialise to/from the JSON task definitions the worker
//! is handed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// StepDefinition
// ---------------------------------------------------------------------------

/// A single step in a task's processing sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Unique identifier within this task.
    pub id: String,
    /// Maps to a registered `Action` implementation.
    pub action_type: String,
}

// ---------------------------------------------------------------------------
// TaskDescription
// ---------------------------------------------------------------------------

/// A complete task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescription {
    /// Task name assigned by the remote submission service.
    pub name: String,
    /// Opaque job-description blob. Made available to actions untouched;
    /// the worker never interprets its fields.
    #[serde(default)]
    pub payload: Value,
    /// Steps, already in execution order.
    pub steps: Vec<StepDefinition>,
}

impl TaskDescription {
    /// Convenience constructor for testing.
    pub fn new(name: impl Into<String>, payload: Value, steps: Vec<StepDefinition>) -> Self {
        Self {
            name: name.into(),
            payload,
            steps,
        }
    }
}
