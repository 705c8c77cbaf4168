use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::error::TaskError;

/// The eventual outcome of one task: its return value or its captured failure.
pub type TaskOutcome<T> = std::result::Result<T, TaskError>;

/// One-shot slot shared between a task and its handle.
struct Slot<T> {
    outcome: Mutex<Option<TaskOutcome<T>>>,
    resolved: Condvar,
}

/// Handle to the result of one submitted task.
///
/// Created by [`ThreadPool::submit`](crate::ThreadPool::submit), paired 1:1
/// with the task it was returned for. The task writes its outcome into the
/// handle exactly once, on completion; the caller may read it any number of
/// times after that. Reads before completion block.
pub struct TaskHandle<T> {
    slot: Arc<Slot<T>>,
}

/// Write half of a handle, moved into the task wrapper at submission.
///
/// Consumed by [`complete`](Completer::complete), so the one-shot discipline
/// is enforced by ownership rather than by a runtime check. A completer
/// dropped without completing — its task was discarded while still queued —
/// resolves the slot with a failure, so no handle is ever left blocking on
/// a task that will never run.
pub(crate) struct Completer<T> {
    slot: Option<Arc<Slot<T>>>,
}

impl<T> TaskHandle<T> {
    /// Creates a fresh unresolved handle and its paired write half.
    pub(crate) fn pair() -> (TaskHandle<T>, Completer<T>) {
        let slot = Arc::new(Slot {
            outcome: Mutex::new(None),
            resolved: Condvar::new(),
        });
        let completer = Completer {
            slot: Some(Arc::clone(&slot)),
        };
        (TaskHandle { slot }, completer)
    }

    /// Blocks until the paired task has finished, ignoring its outcome.
    ///
    /// After `wait` returns, every write the task made through shared state
    /// (e.g. an `Arc<Mutex<_>>` output cell) is visible to the caller.
    pub fn wait(&self) {
        drop(self.block_until_resolved());
    }

    /// Whether the paired task has finished. Advisory snapshot.
    pub fn is_finished(&self) -> bool {
        self.lock_slot().is_some()
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<TaskOutcome<T>>> {
        self.slot.outcome.lock().expect("result slot lock poisoned")
    }

    /// Blocks until the paired task has finished, then consumes the handle
    /// and returns the stored outcome.
    ///
    /// Unlike [`get`](TaskHandle::get), this moves the value out instead of
    /// cloning it, so it works for results that are not `Clone`.
    pub fn into_result(self) -> TaskOutcome<T> {
        let mut outcome = self.block_until_resolved();
        outcome.take().expect("resolved above")
    }

    fn block_until_resolved(&self) -> MutexGuard<'_, Option<TaskOutcome<T>>> {
        let mut outcome = self.lock_slot();
        while outcome.is_none() {
            outcome = self
                .slot
                .resolved
                .wait(outcome)
                .expect("result slot lock poisoned");
        }
        outcome
    }
}

impl<T: Clone> TaskHandle<T> {
    /// Blocks until the paired task has finished, then returns its outcome.
    ///
    /// Idempotent: the outcome stays in the handle, and every call returns a
    /// clone of the same stored value (or the same [`TaskError`] if the task
    /// panicked). The task is never re-executed.
    pub fn get(&self) -> TaskOutcome<T> {
        let outcome = self.block_until_resolved();
        outcome.as_ref().expect("checked above").clone()
    }

    /// Returns the outcome if the task has already finished, `None` otherwise.
    /// Never blocks.
    pub fn try_get(&self) -> Option<TaskOutcome<T>> {
        self.lock_slot().as_ref().cloned()
    }
}

impl<T> Completer<T> {
    /// Writes the task's outcome into the slot and wakes every reader.
    pub(crate) fn complete(mut self, outcome: TaskOutcome<T>) {
        let slot = self.slot.take().expect("completer used twice");
        Self::resolve(&slot, outcome);
    }

    fn resolve(slot: &Slot<T>, outcome: TaskOutcome<T>) {
        let mut guard = slot.outcome.lock().expect("result slot lock poisoned");
        debug_assert!(guard.is_none(), "task outcome written twice");
        *guard = Some(outcome);
        drop(guard);
        slot.resolved.notify_all();
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            Self::resolve(&slot, Err(TaskError::dropped()));
        }
    }
}
