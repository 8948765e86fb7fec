//! `handler` crate — task models, validation, and the handler execution
//! loop.

pub mod error;
pub mod executor;
pub mod models;
pub mod notify;
pub mod validate;

pub use error::HandlerError;
pub use executor::{ActionRegistry, Handler, TaskOutcome};
pub use models::{StepDefinition, TaskDescription};
pub use notify::{LogNotifier, MockNotifier, Notification, Notifier, NotifyError};
pub use validate::validate_task;
