//! The notification collaborator — how task failures reach the remote
//! tracking service.
//!
//! The transport itself lives outside this crate; the handler only knows
//! the [`Notifier`] trait. Delivery failures are logged by the caller and
//! never re-enter the classification loop.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A structured failure report for the remote tracking service.
///
/// The remote side sees at most one of these per task failure: a stable
/// exit code for programmatic handling, a clean message, and a diagnostic
/// trace only when the failure's kind asks for one.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Stable exit code of the classified kind; `None` only for failures
    /// the taxonomy cannot place.
    pub exit_code: Option<i32>,
    /// Human-readable description of the failure.
    pub message: String,
    /// Internal trace/context, attached only when the kind requests it.
    pub diagnostics: Option<String>,
    /// When the failure was classified.
    pub occurred_at: DateTime<Utc>,
}

impl Notification {
    /// Build a report stamped with the current time.
    pub fn new(
        exit_code: Option<i32>,
        message: impl Into<String>,
        diagnostics: Option<String>,
    ) -> Self {
        Self {
            exit_code,
            message: message.into(),
            diagnostics,
            occurred_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Delivery failure reported by a notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The report could not be delivered to the remote service.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// The notification collaborator trait.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a failure report to the remote tracking service.
    async fn notify_failure(&self, notification: &Notification) -> Result<(), NotifyError>;
}

// ---------------------------------------------------------------------------
// LogNotifier
// ---------------------------------------------------------------------------

/// Delivers failure reports by emitting a local log event.
///
/// Stands in for the remote tracking-service client when the worker runs
/// without one, e.g. from the CLI.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_failure(&self, notification: &Notification) -> Result<(), NotifyError> {
        error!(
            exit_code = ?notification.exit_code,
            diagnostics = notification.diagnostics.as_deref().unwrap_or("<none>"),
            "task failure: {}",
            notification.message
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockNotifier
// ---------------------------------------------------------------------------

/// A notifier test double that records every report it receives and can be
/// told to fail delivery.
pub struct MockNotifier {
    /// All reports seen (in delivery order).
    pub deliveries: Arc<Mutex<Vec<Notification>>>,
    /// Whether `notify_failure` should report a delivery failure.
    pub fail_delivery: bool,
}

impl MockNotifier {
    /// A mock whose deliveries always succeed.
    pub fn new() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
            fail_delivery: false,
        }
    }

    /// A mock whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            fail_delivery: true,
            ..Self::new()
        }
    }

    /// Number of reports this notifier has received.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    /// Snapshot of the received reports.
    pub fn delivered(&self) -> Vec<Notification> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify_failure(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.deliveries.lock().unwrap().push(notification.clone());

        if self.fail_delivery {
            Err(NotifyError::Delivery("mock delivery failure".into()))
        } else {
            Ok(())
        }
    }
}
