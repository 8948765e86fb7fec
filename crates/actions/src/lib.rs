//! `actions` crate — the `Action` trait, the shared task context, and the
//! worker error taxonomy.
//!
//! Every handler step — built-in and task-specific alike — must implement
//! [`Action`]. The handler crate dispatches execution through this trait
//! object and classifies failures against [`ErrorKind`].

pub mod builtin;
pub mod error;
pub mod mock;
pub mod traits;

pub use error::{classify, ErrorKind, WorkerError};
pub use traits::{Action, TaskContext};
