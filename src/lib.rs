#![deny(missing_docs)]

//! A fixed-size worker thread pool with per-task result handles.
//!
//! Callables are submitted with [`ThreadPool::submit`] and executed
//! asynchronously on a bounded set of worker threads. Each submission
//! returns a [`TaskHandle`] that resolves to the callable's return value,
//! or to the captured failure if it panicked. Dispatch is strictly FIFO;
//! shutdown drains every queued task before the workers exit.

mod error;
mod handle;
mod pool;
mod queue;
mod worker;

pub use error::{PoolError, Result, TaskError};
pub use handle::{TaskHandle, TaskOutcome};
pub use pool::ThreadPool;
