use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use log::debug;

use crate::error::{PoolError, Result, TaskError};
use crate::handle::TaskHandle;
use crate::queue::{Task, TaskQueue};
use crate::worker::Worker;

/// Everything guarded by the pool's single lock.
///
/// The queue and the shutdown flag share one mutex on purpose: a worker
/// that observes `shutdown` under this lock cannot race with a submission
/// that enqueues under the same lock.
pub(crate) struct PoolState {
    pub(crate) queue: TaskQueue,
    pub(crate) shutdown: bool,
}

/// State shared between the pool handle and its workers.
pub(crate) struct PoolShared {
    state: Mutex<PoolState>,
    work_available: Condvar,
}

impl PoolShared {
    fn new() -> Self {
        PoolShared {
            state: Mutex::new(PoolState {
                queue: TaskQueue::new(),
                shutdown: false,
            }),
            work_available: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().expect("pool lock poisoned")
    }

    /// Releases the guard and suspends until notified; re-acquires on wake.
    /// Callers must re-check their predicate — wakes may be spurious.
    pub(crate) fn wait_for_work<'a>(
        &self,
        guard: MutexGuard<'a, PoolState>,
    ) -> MutexGuard<'a, PoolState> {
        self.work_available
            .wait(guard)
            .expect("pool lock poisoned")
    }
}

/// A fixed-size pool of worker threads executing submitted tasks.
///
/// The pool is the unique owner of its workers and shared queue: it is not
/// `Clone`, and all lifecycle operations take it exclusively. Construct with
/// [`new`](ThreadPool::new), spawn the workers with
/// [`start`](ThreadPool::start) exactly once, then
/// [`submit`](ThreadPool::submit) work freely from any thread. Tasks are
/// dispatched to workers in strict submission order, though completion order
/// depends on task durations.
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    workers: Vec<Worker>,
    threads: u32,
    started: bool,
}

impl ThreadPool {
    /// Creates a pool that will run `threads` workers.
    ///
    /// No threads are spawned until [`start`](ThreadPool::start) is called.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ZeroWorkers`] if `threads` is zero.
    pub fn new(threads: u32) -> Result<ThreadPool> {
        if threads == 0 {
            return Err(PoolError::ZeroWorkers);
        }
        Ok(ThreadPool {
            shared: Arc::new(PoolShared::new()),
            workers: Vec::new(),
            threads,
            started: false,
        })
    }

    /// Creates a pool sized to the number of logical CPUs.
    pub fn with_cpu_count() -> Result<ThreadPool> {
        Self::new(num_cpus::get() as u32)
    }

    /// Spawns the pool's worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AlreadyStarted`] if called a second time, or
    /// [`PoolError::ThreadStart`] if the OS refuses a thread. A spawn
    /// failure is fatal: workers spawned so far are shut down and joined
    /// before the error is returned, and the pool accepts no further work.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(PoolError::AlreadyStarted);
        }
        self.started = true;

        for id in 0..self.threads {
            match Worker::start(id, Arc::clone(&self.shared)) {
                Ok(worker) => self.workers.push(worker),
                Err(e) => {
                    self.shutdown();
                    return Err(PoolError::ThreadStart(e));
                }
            }
        }

        debug!("Started {} worker threads", self.threads);
        Ok(())
    }

    /// Submits a task for execution and returns the handle to its result.
    ///
    /// The callable and everything it captures are moved into the task, so
    /// a task cannot borrow the caller's locals; results that must be
    /// written back to shared state go through jointly-owned cells such as
    /// `Arc<Mutex<T>>`, with the handle's completion providing the
    /// happens-before edge for the caller's reads.
    ///
    /// The task is appended to the FIFO queue and exactly one idle worker
    /// is woken. Returns immediately; a panic inside the task is captured
    /// and surfaced through the handle, never through the worker thread.
    /// Tasks submitted before [`start`](ThreadPool::start) simply wait in
    /// the queue until workers exist.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::PoolClosed`] once shutdown has begun.
    pub fn submit<F, R>(&self, job: F) -> Result<TaskHandle<R>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (handle, completer) = TaskHandle::pair();
        let task: Task = Box::new(move || {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(job)).map_err(TaskError::from_panic);
            completer.complete(outcome);
        });

        {
            let mut state = self.shared.lock();
            if state.shutdown {
                return Err(PoolError::PoolClosed);
            }
            state.queue.enqueue(task);
        }
        self.shared.work_available.notify_one();

        Ok(handle)
    }

    /// Number of tasks currently waiting in the queue. Advisory: the value
    /// may be stale as soon as it is returned.
    pub fn queued_tasks(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Stops the pool: rejects further submissions, waits for the workers
    /// to finish every queued and in-flight task, and joins all worker
    /// threads.
    ///
    /// On a pool that never started (or whose [`start`](ThreadPool::start)
    /// failed) the queued tasks cannot run; they are discarded and their
    /// handles resolve with a [`TaskError`] instead. Either way, every
    /// outstanding handle is resolvable once `shutdown` returns.
    ///
    /// Blocks until every worker has exited; there is no timeout.
    /// Idempotent — the shutdown flag transitions once, and later calls
    /// return immediately.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
        }
        self.shared.work_available.notify_all();

        debug!("Shutdown requested, joining {} workers", self.workers.len());
        for worker in self.workers.drain(..) {
            worker.join();
        }

        // With no workers ever spawned, tasks may still sit in the queue.
        // Dropping them resolves their handles as failed.
        let mut state = self.shared.lock();
        while let Some(task) = state.queue.dequeue() {
            drop(task);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // A pool dropped without an explicit shutdown still drains its
        // queue and joins its threads.
        self.shutdown();
    }
}
