//! Throttle - rate-limit an action to one invocation per window
//!
//! A burst of [`Throttle::call`]s produces at most one invocation per `wait`
//! window, and the last call of a burst is never lost (trailing edge).
//!
//! # Timeline (leading + trailing, wait = 150ms)
//!
//! ```text
//! calls:    x  x x    x              x
//! time:     0  40 80  120   150     400
//! fires:    ^                ^       ^
//!           leading          trailing leading (window had closed)
//! ```
//!
//! Each trailing invocation opens a fresh window, so a steady stream of
//! calls fires once every `wait`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::scheduler::{Scheduler, TimerId};

/// Which edges of a burst invoke the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleEdges {
    pub leading: bool,
    pub trailing: bool,
}

impl ThrottleEdges {
    /// Fire on the first call and on the last call of a burst.
    pub const BOTH: Self = Self { leading: true, trailing: true };

    /// Fire only once a window closes, with the last call of the burst.
    pub const TRAILING: Self = Self { leading: false, trailing: true };
}

impl Default for ThrottleEdges {
    fn default() -> Self {
        Self::BOTH
    }
}

#[derive(Default)]
struct ThrottleState {
    /// Timer closing the current window; `None` when idle.
    window: Option<TimerId>,
    /// A call arrived during the window and still needs to run.
    pending: bool,
}

struct Shared {
    wait: Duration,
    edges: ThrottleEdges,
    scheduler: Rc<dyn Scheduler>,
    action: Box<dyn Fn()>,
    state: RefCell<ThrottleState>,
    invocations: Cell<u64>,
}

/// Throttled wrapper around an action.
///
/// Dropping the throttle cancels its window timer.
pub struct Throttle {
    shared: Rc<Shared>,
}

impl Throttle {
    pub fn new<F>(scheduler: Rc<dyn Scheduler>, wait: Duration, edges: ThrottleEdges, action: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            shared: Rc::new(Shared {
                wait,
                edges,
                scheduler,
                action: Box::new(action),
                state: RefCell::new(ThrottleState::default()),
                invocations: Cell::new(0),
            }),
        }
    }

    /// Request an invocation.
    pub fn call(&self) {
        let shared = &self.shared;
        let invoke_now = {
            let mut state = shared.state.borrow_mut();

            if state.window.is_some() {
                if shared.edges.trailing {
                    state.pending = true;
                }
                tracing::trace!(pending = state.pending, "throttle: call coalesced");
                return;
            }

            if !shared.edges.leading && shared.edges.trailing {
                state.pending = true;
            }
            state.window = Some(open_window(shared));
            shared.edges.leading
        };

        if invoke_now {
            invoke(shared);
        }
    }

    /// Drop any pending invocation and close the window.
    pub fn cancel(&self) {
        let window = {
            let mut state = self.shared.state.borrow_mut();
            state.pending = false;
            state.window.take()
        };

        if let Some(id) = window {
            self.shared.scheduler.clear_timeout(id);
            tracing::trace!("throttle: cancelled");
        }
    }

    /// Run a pending invocation immediately.
    ///
    /// The window restarts as if it had just closed. No-op when nothing is
    /// pending.
    pub fn flush(&self) {
        let window = {
            let mut state = self.shared.state.borrow_mut();
            if !state.pending {
                return;
            }
            state.window.take()
        };

        if let Some(id) = window {
            self.shared.scheduler.clear_timeout(id);
        }
        close_window(&self.shared);
    }

    /// True if a trailing invocation is waiting for the window to close.
    pub fn is_pending(&self) -> bool {
        self.shared.state.borrow().pending
    }

    /// True while a window is open.
    pub fn is_active(&self) -> bool {
        self.shared.state.borrow().window.is_some()
    }

    /// Number of times the action has run.
    pub fn invocations(&self) -> u64 {
        self.shared.invocations.get()
    }

    pub fn wait(&self) -> Duration {
        self.shared.wait
    }
}

impl Drop for Throttle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn open_window(shared: &Rc<Shared>) -> TimerId {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    shared.scheduler.set_timeout(
        shared.wait,
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.state.borrow_mut().window = None;
                close_window(&shared);
            }
        }),
    )
}

/// End of a window: fire the pending call and open a new window, or go idle.
fn close_window(shared: &Rc<Shared>) {
    let fire = {
        let mut state = shared.state.borrow_mut();
        let fire = std::mem::take(&mut state.pending);
        if fire {
            state.window = Some(open_window(shared));
        }
        fire
    };

    if fire {
        invoke(shared);
    }
}

fn invoke(shared: &Shared) {
    shared.invocations.set(shared.invocations.get() + 1);
    (shared.action)();
}

// =============================================================================
// Tests
// =============================================================================
