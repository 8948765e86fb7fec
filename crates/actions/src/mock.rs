//! `MockAction` — a test double for `Action`.
//!
//! Useful in unit and integration tests where a real action implementation
//! is either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{Action, TaskContext, WorkerError};

/// Behaviour injected into `MockAction` at construction time.
pub enum MockBehaviour {
    /// Return a specific JSON value.
    ReturnValue(Value),
    /// Fail with the given taxonomy error.
    FailWorker(WorkerError),
    /// Fail with an error value the taxonomy does not recognise.
    FailUnclassified(String),
    /// Panic mid-execution, as a crashed step would.
    Panic(String),
}

/// A mock action that records every call it receives and returns a
/// programmer-specified result.
pub struct MockAction {
    /// Label used in test assertions.
    pub name: String,
    /// What the action will do when `execute` is called.
    pub behaviour: MockBehaviour,
    /// All inputs seen by this action (in call order).
    pub calls: Arc<Mutex<Vec<Value>>>,
}

impl MockAction {
    /// Create a mock that always succeeds with the given value.
    pub fn returning(name: impl Into<String>, value: Value) -> Self {
        Self::with_behaviour(name, MockBehaviour::ReturnValue(value))
    }

    /// Create a mock that always fails with the given taxonomy error.
    pub fn failing(name: impl Into<String>, err: WorkerError) -> Self {
        Self::with_behaviour(name, MockBehaviour::FailWorker(err))
    }

    /// Create a mock that fails with an error outside the taxonomy.
    pub fn failing_unclassified(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with_behaviour(name, MockBehaviour::FailUnclassified(msg.into()))
    }

    /// Create a mock that panics, as a crashed step would.
    pub fn panicking(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with_behaviour(name, MockBehaviour::Panic(msg.into()))
    }

    fn with_behaviour(name: impl Into<String>, behaviour: MockBehaviour) -> Self {
        Self {
            name: name.into(),
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times this action has been executed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Action for MockAction {
    async fn execute(&self, input: Value, _ctx: &TaskContext) -> anyhow::Result<Value> {
        self.calls.lock().unwrap().push(input.clone());

        match &self.behaviour {
            MockBehaviour::ReturnValue(v) => {
                // Merge the incoming input with the action's own fields so
                // tests can trace the data flowing through the sequence.
                let mut out = json!({ "action": self.name });
                if let (Some(out_obj), Some(v_obj)) = (out.as_object_mut(), v.as_object()) {
                    for (k, val) in v_obj {
                        out_obj.insert(k.clone(), val.clone());
                    }
                }
                Ok(out)
            }
            MockBehaviour::FailWorker(err) => Err(err.clone().into()),
            MockBehaviour::FailUnclassified(msg) => Err(anyhow::anyhow!("{msg}")),
            MockBehaviour::Panic(msg) => panic!("{msg}"),
        }
    }
}
