//! Built-in actions.
//!
//! Real processing sequences are assembled by whatever scheduler owns this
//! worker; the built-ins here are the ones the standalone CLI can run
//! without one.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{Action, TaskContext};

/// Passes its input through unchanged.
///
/// A placeholder step, handy for dry-running a task definition end to end.
#[derive(Debug, Default)]
pub struct EchoAction;

#[async_trait]
impl Action for EchoAction {
    async fn execute(&self, input: Value, ctx: &TaskContext) -> anyhow::Result<Value> {
        info!(task = %ctx.task_name, "echo: {input}");
        Ok(input)
    }
}
