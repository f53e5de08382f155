//! Listener registry shared by the bundled hosts.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Cleanup, HostListener};

struct Registry {
    listeners: Vec<(usize, HostListener)>,
    next_id: usize,
}

impl Registry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Ordered set of listeners for one event kind.
///
/// Cloning shares the underlying registry.
#[derive(Clone)]
pub struct ListenerSet {
    registry: Rc<RefCell<Registry>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Register a listener. Returns cleanup function.
    ///
    /// The cleanup holds a weak reference, so calling it after the set is
    /// gone does nothing.
    pub fn add(&self, listener: HostListener) -> Cleanup {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id();
            reg.listeners.push((id, listener));
            id
        };

        let weak = Rc::downgrade(&self.registry);
        Box::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Invoke every listener in registration order.
    ///
    /// Listeners may add or remove listeners while being dispatched; the
    /// change applies from the next dispatch.
    pub fn dispatch(&self) {
        let listeners: Vec<HostListener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener.
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
