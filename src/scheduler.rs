//! Scheduler - deferred tasks for single-threaded hosts
//!
//! The throttle needs exactly one capability from its environment: "run this
//! later". [`Scheduler`] provides it, and two implementations ship here:
//!
//! - [`ManualScheduler`] - virtual time, advanced explicitly (tests, replay)
//! - [`SystemScheduler`] - monotonic wall clock, drained from an event loop
//!
//! Neither spawns threads. Tasks run on whichever thread drains the queue.
//!
//! # Event loop pattern
//!
//! ```ignore
//! let scheduler = SystemScheduler::new();
//! loop {
//!     let timeout = scheduler.next_deadline().unwrap_or(IDLE_TIMEOUT);
//!     window.pump(timeout)?;
//!     scheduler.run_due();
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// A deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred task execution.
pub trait Scheduler {
    /// Time elapsed since the scheduler's origin.
    fn now(&self) -> Duration;

    /// Run `task` once, `delay` from now.
    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a scheduled task. Returns false if it already ran or was cancelled.
    fn clear_timeout(&self, id: TimerId) -> bool;
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// Deadline-ordered task queue. Ties run in scheduling order.
#[derive(Default)]
pub struct TimerQueue {
    tasks: BTreeMap<(Duration, u64), Task>,
    deadlines: HashMap<u64, Duration>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deadline: Duration, task: Task) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(deadline) => self.tasks.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        let (&(deadline, seq), _) = self.tasks.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&seq);
        self.tasks
            .remove(&(deadline, seq))
            .map(|task| (deadline, task))
    }

    /// Deadline of the earliest pending task.
    pub fn peek_deadline(&self) -> Option<Duration> {
        self.tasks.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.deadlines.clear();
    }
}

// =============================================================================
// MANUAL SCHEDULER
// =============================================================================

/// Virtual-time scheduler.
///
/// Time only moves when [`advance`](ManualScheduler::advance) is called.
/// Tasks run in deadline order and observe `now()` equal to their deadline.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<TimerQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, running every task that comes due.
    ///
    /// Tasks scheduled while advancing run in the same call if their
    /// deadline falls inside the window. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        loop {
            // Borrow ends before the task runs so it can reschedule
            let next = self.queue.borrow_mut().pop_due(target);
            let Some((deadline, task)) = next else {
                break;
            };

            if deadline > self.now.get() {
                self.now.set(deadline);
            }
            task();
            ran += 1;
        }

        self.now.set(target);
        ran
    }

    /// Advance by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }

    /// Run every pending task, however far in the future.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.borrow().peek_deadline();
            let Some(deadline) = next else {
                break;
            };
            ran += self.advance(deadline.saturating_sub(self.now.get()));
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let deadline = self.now.get() + delay;
        self.queue.borrow_mut().push(deadline, task)
    }

    fn clear_timeout(&self, id: TimerId) -> bool {
        self.queue.borrow_mut().cancel(id)
    }
}

// =============================================================================
// SYSTEM SCHEDULER
// =============================================================================

/// Wall-clock scheduler drained by the host's event loop.
pub struct SystemScheduler {
    origin: Instant,
    queue: RefCell<TimerQueue>,
}

impl SystemScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: RefCell::new(TimerQueue::new()),
        }
    }

    /// Run every task whose deadline has passed. Returns the number run.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        loop {
            let now = self.now();
            let next = self.queue.borrow_mut().pop_due(now);
            let Some((_, task)) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    /// Time until the next task is due (zero if overdue).
    ///
    /// `None` when nothing is scheduled, so the loop can block indefinitely.
    pub fn next_deadline(&self) -> Option<Duration> {
        let deadline = self.queue.borrow().peek_deadline()?;
        Some(deadline.saturating_sub(self.now()))
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let deadline = self.now() + delay;
        self.queue.borrow_mut().push(deadline, task)
    }

    fn clear_timeout(&self, id: TimerId) -> bool {
        self.queue.borrow_mut().cancel(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
