use std::any::Any;
use std::io;

use thiserror::Error;

/// Error type for pool-level operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The pool was constructed with zero workers.
    #[error("thread pool requires at least one worker")]
    ZeroWorkers,

    /// A submission was attempted after shutdown had begun.
    #[error("thread pool is shut down")]
    PoolClosed,

    /// `start` was called on a pool that is already running.
    #[error("thread pool has already been started")]
    AlreadyStarted,

    /// A worker thread could not be spawned during `start`.
    #[error("failed to spawn worker thread: {0}")]
    ThreadStart(#[from] io::Error),
}

/// A failure stored in a task's [`TaskHandle`](crate::TaskHandle).
///
/// Either a panic raised by the task body, captured at the worker boundary,
/// or the record of a task discarded before it could run. Surfaced to the
/// caller on every `get`; never propagated to the worker loop.
#[derive(Error, Debug, Clone)]
#[error("task failed: {message}")]
pub struct TaskError {
    message: String,
}

impl TaskError {
    /// Converts a panic payload into a stored failure.
    ///
    /// String payloads (the common case from `panic!` and `assert!`) are
    /// preserved verbatim; anything else gets a generic message since the
    /// payload itself is not `Clone`.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked with a non-string payload".to_string()
        };
        TaskError { message }
    }

    /// Failure recorded when a task is discarded while still queued, e.g.
    /// on a pool that was shut down or dropped without ever being started.
    pub(crate) fn dropped() -> Self {
        TaskError {
            message: "task dropped before running".to_string(),
        }
    }

    /// The captured failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
