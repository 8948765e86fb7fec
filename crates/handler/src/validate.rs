//! Task-definition validation.

use std::collections::HashSet;

use crate::executor::ActionRegistry;
use crate::models::TaskDescription;
use crate::HandlerError;

/// Check a task definition against a registry before running it.
///
/// Returns the step IDs in execution order. Rejects duplicate step IDs and
/// steps whose `action_type` has no registered implementation.
pub fn validate_task(
    task: &TaskDescription,
    registry: &ActionRegistry,
) -> Result<Vec<String>, HandlerError> {
    let mut seen = HashSet::new();

    for step in &task.steps {
        if !seen.insert(step.id.as_str()) {
            return Err(HandlerError::DuplicateStepId(step.id.clone()));
        }
        if !registry.contains_key(&step.action_type) {
            return Err(HandlerError::UnknownActionType {
                step_id: step.id.clone(),
                action_type: step.action_type.clone(),
            });
        }
    }

    Ok(task.steps.iter().map(|s| s.id.clone()).collect())
}
