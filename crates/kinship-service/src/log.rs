//! Outcome logging capability

use crate::{ErrorKind, ServiceError};
use std::sync::Arc;

/// Receives failed outcomes; fire-and-forget
///
/// Injected into the service so callers decide where failures go.
/// [`TracingOutcomeLog`] is the default.
pub trait OutcomeLog {
    /// An expected failure (validation, not found)
    fn warn(&self, operation: &'static str, error: &ServiceError);

    /// A collaborator failure
    fn error(&self, operation: &'static str, error: &ServiceError);
}

/// Emits failures as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOutcomeLog;

impl OutcomeLog for TracingOutcomeLog {
    fn warn(&self, operation: &'static str, error: &ServiceError) {
        tracing::warn!(operation, kind = ?error.kind(), "{}", error);
    }

    fn error(&self, operation: &'static str, error: &ServiceError) {
        tracing::error!(
            operation,
            kind = ?error.kind(),
            details = error.details().as_deref().unwrap_or(""),
            "{}",
            error
        );
    }
}

impl<T: OutcomeLog + ?Sized> OutcomeLog for Arc<T> {
    fn warn(&self, operation: &'static str, error: &ServiceError) {
        (**self).warn(operation, error)
    }

    fn error(&self, operation: &'static str, error: &ServiceError) {
        (**self).error(operation, error)
    }
}

/// Route a failed result to the log by severity, then hand it back
pub(crate) fn report<T, L: OutcomeLog + ?Sized>(
    log: &L,
    operation: &'static str,
    result: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    if let Err(error) = &result {
        match error.kind() {
            ErrorKind::Server => log.error(operation, error),
            ErrorKind::Validation | ErrorKind::NotFound => log.warn(operation, error),
        }
    }
    result
}
