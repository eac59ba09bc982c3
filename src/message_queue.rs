use std::{
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// Blocking hand-off of values between threads.
///
/// Values come back out newest first: a receiver always sees the latest value that was sent,
/// and older values stay queued for later calls.
#[derive(Debug)]
pub struct MessageQueue<T>
where
    T: Send,
{
    queue: Mutex<Vec<T>>,
    available: Condvar,
}

impl<T: Send> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> MessageQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            available: Condvar::new(),
        }
    }

    /// The stored values are plain data, so a panic on another thread can't leave them half-updated
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes a value and wakes at most one waiting receiver. Never blocks on a consumer.
    pub fn send(&self, value: T) {
        let mut queue = self.lock();
        queue.push(value);
        self.available.notify_one();
    }

    /// Blocks until a value is available, then removes and returns the most recently sent one.
    /// If multiple threads are waiting on receive(), the thread chosen is nondeterministic
    pub fn receive(&self) -> T {
        let mut queue = self.lock();
        // The purpose of the loop is to handle cases of unlocks where `available` was notified spuriously,
        // or where another receiver took the value first
        loop {
            if let Some(value) = queue.pop() {
                return value;
            } else {
                queue = self
                    .available
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }

    /// Same as [`MessageQueue::receive`], but returns `None` if nothing arrives within `timeout`.
    /// A timeout too large to represent as a deadline waits forever.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.receive());
        };
        let mut queue = self.lock();
        loop {
            if let Some(value) = queue.pop() {
                return Some(value);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            queue = self
                .available
                .wait_timeout(queue, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
