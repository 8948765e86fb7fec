//! The worker error taxonomy: the closed set of failure kinds and the
//! classification contract used by the handler loop.
//!
//! Actions fail with `anyhow::Error`. Failures a task's business logic
//! anticipates are raised as [`WorkerError`] so the handler can map them to
//! a stable exit code and a clean message for the remote tracking service.
//! Anything else classifies as the catch-all [`ErrorKind::Unclassified`],
//! which always ships full diagnostics.

use strum_macros::EnumIter;
use thiserror::Error;

/// Errors raised intentionally by action business logic.
///
/// The message text is what the remote tracking service shows to the user,
/// so it must be clean and actionable on its own.
#[derive(Debug, Error, Clone)]
pub enum WorkerError {
    /// Problem with the worker's input task configuration.
    #[error("invalid task configuration: {0}")]
    Config(String),

    /// Gentle stop: halt the remaining steps without reporting an error.
    /// Whatever needed handling was already handled inside the action.
    #[error("processing stopped: {0}")]
    StopProcessing(String),

    /// Generic failure interacting with the external job-submission service.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// The external service returned or expected identifiers that do not
    /// line up with ours.
    #[error("external service identifier error: {0}")]
    ExternalServiceIdentifier(String),

    /// No resource is currently available to run the task's jobs.
    #[error("no resource available: {0}")]
    NoResourceAvailable(String),
}

impl WorkerError {
    /// The taxonomy kind this error classifies as.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            WorkerError::Config(_) => ErrorKind::Config,
            WorkerError::StopProcessing(_) => ErrorKind::StopProcessing,
            WorkerError::ExternalService(_) => ErrorKind::ExternalService,
            WorkerError::ExternalServiceIdentifier(_) => ErrorKind::ExternalServiceIdentifier,
            WorkerError::NoResourceAvailable(_) => ErrorKind::NoResourceAvailable,
        }
    }
}

/// The closed set of failure classifications.
///
/// Each kind statically carries its exit code and notification policy.
/// [`ErrorKind::Unclassified`] is the root of the kind tree and the fallback
/// for any error value the taxonomy does not recognise;
/// [`ErrorKind::HandlerExecution`] is reserved for faults of the dispatch
/// machinery itself and is assigned by the handler, never raised by an
/// action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ErrorKind {
    Unclassified,
    Config,
    StopProcessing,
    ExternalService,
    ExternalServiceIdentifier,
    NoResourceAvailable,
    HandlerExecution,
}

impl ErrorKind {
    /// Stable exit code reported to external callers.
    ///
    /// `None` only for the abstract root; once a code ships for a kind it
    /// is never reused with a different meaning.
    pub const fn exit_code(self) -> Option<i32> {
        match self {
            ErrorKind::Unclassified => None,
            ErrorKind::Config => Some(4000),
            ErrorKind::StopProcessing => Some(6667),
            ErrorKind::ExternalService => Some(5000),
            ErrorKind::ExternalServiceIdentifier => Some(5001),
            ErrorKind::NoResourceAvailable => Some(5002),
            ErrorKind::HandlerExecution => Some(6666),
        }
    }

    /// Whether occurrences of this kind are reported to the remote service.
    pub const fn notify_remote(self) -> bool {
        !matches!(self, ErrorKind::StopProcessing)
    }

    /// Whether the remote notification carries the full diagnostic trace,
    /// or only the clean message text.
    pub const fn include_diagnostics(self) -> bool {
        matches!(self, ErrorKind::Unclassified | ErrorKind::HandlerExecution)
    }

    /// Parent in the kind tree; `None` only at the root.
    pub const fn parent(self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Unclassified => None,
            ErrorKind::ExternalServiceIdentifier | ErrorKind::NoResourceAvailable => {
                Some(ErrorKind::ExternalService)
            }
            _ => Some(ErrorKind::Unclassified),
        }
    }
}

/// Classify an action failure against the taxonomy.
///
/// A [`WorkerError`] anywhere in the error's context chain classifies as
/// its own kind; any other error value is [`ErrorKind::Unclassified`].
pub fn classify(err: &anyhow::Error) -> ErrorKind {
    match err.downcast_ref::<WorkerError>() {
        Some(worker_err) => worker_err.kind(),
        None => ErrorKind::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use anyhow::Context;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn exit_codes_are_unique_among_concrete_kinds() {
        let mut seen = HashSet::new();
        for kind in ErrorKind::iter() {
            if let Some(code) = kind.exit_code() {
                assert!(
                    seen.insert(code),
                    "exit code {code} assigned to more than one kind"
                );
            }
        }
        // Only the abstract root goes without a code.
        assert_eq!(
            ErrorKind::iter().filter(|k| k.exit_code().is_none()).count(),
            1
        );
    }

    #[test]
    fn only_the_stop_kind_is_silent() {
        for kind in ErrorKind::iter() {
            assert_eq!(kind.notify_remote(), kind != ErrorKind::StopProcessing);
        }
    }

    #[test]
    fn diagnostics_are_reserved_for_unanticipated_failures() {
        let with_diagnostics: Vec<_> = ErrorKind::iter()
            .filter(|k| k.include_diagnostics())
            .collect();
        assert_eq!(
            with_diagnostics,
            vec![ErrorKind::Unclassified, ErrorKind::HandlerExecution]
        );
    }

    #[test]
    fn kind_tree_is_rooted_and_acyclic() {
        let kind_count = ErrorKind::iter().count();
        for kind in ErrorKind::iter() {
            let mut current = kind;
            let mut hops = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                hops += 1;
                assert!(hops <= kind_count, "cycle in kind tree at {kind:?}");
            }
            assert_eq!(current, ErrorKind::Unclassified);
        }
    }

    #[test]
    fn worker_errors_classify_as_their_own_kind() {
        let err = anyhow::Error::new(WorkerError::Config("missing splitting parameters".into()));
        assert_eq!(classify(&err), ErrorKind::Config);

        let err =
            anyhow::Error::new(WorkerError::NoResourceAvailable("all sites draining".into()));
        assert_eq!(classify(&err), ErrorKind::NoResourceAvailable);
    }

    #[test]
    fn worker_errors_survive_context_wrapping() {
        let err = Err::<(), _>(WorkerError::ExternalService("submission refused".into()))
            .context("while submitting task jobs")
            .unwrap_err();
        assert_eq!(classify(&err), ErrorKind::ExternalService);
    }

    #[test]
    fn unrecognised_errors_fall_back_to_the_catch_all() {
        let err = anyhow::anyhow!("something nobody anticipated");
        let kind = classify(&err);
        assert_eq!(kind, ErrorKind::Unclassified);
        assert!(kind.notify_remote());
        assert!(kind.include_diagnostics());
    }
}
