use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use log::{debug, error};

use crate::pool::PoolShared;

/// One worker: an ordinal identity bound to exactly one OS thread for the
/// pool's lifetime.
pub(crate) struct Worker {
    id: u32,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    /// Spawns the worker's thread, running the dequeue-execute loop until
    /// shutdown is observed.
    pub(crate) fn start(id: u32, shared: Arc<PoolShared>) -> io::Result<Worker> {
        let thread = thread::Builder::new()
            .name(format!("pool-worker-{id}"))
            .spawn(move || run(id, &shared))?;
        Ok(Worker { id, thread })
    }

    /// Blocks until the worker's thread has exited.
    pub(crate) fn join(self) {
        if self.thread.join().is_err() {
            // Task panics are contained in `run`, so this only fires if the
            // loop itself has a bug.
            error!("Worker {} thread exited by panic", self.id);
        }
    }
}

/// The worker loop: `Running → (Idle ⇄ Executing) → Stopped`.
///
/// The condvar wait is predicate-guarded: a woken worker re-checks "task
/// available or shutdown requested" before doing anything, so a missed
/// notification or spurious wake cannot strand it or spin it on an empty
/// queue. The shutdown flag is read under the same lock as the queue, and
/// only once the queue is empty, so the queue fully drains before any
/// worker exits.
fn run(id: u32, shared: &PoolShared) {
    loop {
        let task = {
            let mut state = shared.lock();
            while state.queue.is_empty() {
                if state.shutdown {
                    debug!("Worker {id}: shutdown requested, stopping");
                    return;
                }
                state = shared.wait_for_work(state);
            }
            state.queue.dequeue().expect("queue non-empty under lock")
        };

        // Execute outside the lock. Submission already wraps the task body
        // in catch_unwind to route failures into the handle; this outer
        // catch keeps the loop alive even if that wrapper itself panics.
        debug!("Worker {id} executing task");
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            error!("Worker {id}: task panicked, continuing");
        }
    }
}
