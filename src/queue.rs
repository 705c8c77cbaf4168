use std::collections::VecDeque;

/// A unit of work: the callable and its arguments, bound at submission
/// time into a single nullary closure.
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

/// Strictly-FIFO queue of pending tasks.
///
/// The queue itself holds no lock; it lives inside the pool's shared
/// mutex so that the shutdown flag is guarded by the same lock as the
/// queue. Tasks come out in exactly the order they went in, and every
/// task is handed out at most once.
pub(crate) struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        TaskQueue {
            tasks: VecDeque::new(),
        }
    }

    /// Appends a task at the tail.
    pub(crate) fn enqueue(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    /// Removes and returns the head task, or `None` if the queue is empty.
    pub(crate) fn dequeue(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    /// Number of queued tasks. Advisory: stale as soon as the lock is released.
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::TaskQueue;

    #[test]
    fn dequeue_returns_tasks_in_submission_order() {
        let order = Arc::new(AtomicUsize::new(0));
        let mut queue = TaskQueue::new();

        for i in 0..10 {
            let order = Arc::clone(&order);
            queue.enqueue(Box::new(move || {
                assert_eq!(order.fetch_add(1, Ordering::SeqCst), i);
            }));
        }

        assert_eq!(queue.len(), 10);
        while let Some(task) = queue.dequeue() {
            task();
        }
        assert_eq!(order.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn dequeue_on_empty_queue_returns_none() {
        let mut queue = TaskQueue::new();
        assert!(queue.is_empty());
        assert!(queue.dequeue().is_none());

        queue.enqueue(Box::new(|| {}));
        assert!(!queue.is_empty());
        assert!(queue.dequeue().is_some());
        assert!(queue.dequeue().is_none());
    }
}
