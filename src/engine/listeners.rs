//! Scoped event-listener bookkeeping.
//!
//! A component that becomes active attaches its listeners and holds the
//! returned guards. Dropping a guard detaches the listener, so early
//! returns, `?`, and panics unwinding through the owner all release it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Host notifications the story subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    Scroll,
    TimeUpdate,
    Ended,
    PointerMove,
}

impl ListenerKind {
    /// DOM event name the page runtime binds.
    pub fn event_name(self) -> &'static str {
        match self {
            ListenerKind::Scroll => "scroll",
            ListenerKind::TimeUpdate => "timeupdate",
            ListenerKind::Ended => "ended",
            ListenerKind::PointerMove => "mousemove",
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    live: BTreeMap<ListenerKind, usize>,
}

/// Single-threaded registry of live listeners.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Counts>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn attach(&self, kind: ListenerKind) -> ListenerGuard {
        let mut counts = self.inner.borrow_mut();
        *counts.live.entry(kind).or_insert(0) += 1;
        log::trace!("attached {} listener", kind.event_name());
        ListenerGuard {
            kind,
            registry: Rc::clone(&self.inner),
        }
    }

    /// Live listeners of one kind.
    pub fn active(&self, kind: ListenerKind) -> usize {
        self.inner.borrow().live.get(&kind).copied().unwrap_or(0)
    }

    /// Live listeners of every kind.
    pub fn total_active(&self) -> usize {
        self.inner.borrow().live.values().sum()
    }
}

/// Detaches its listener when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    kind: ListenerKind,
    registry: Rc<RefCell<Counts>>,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Detach now. Same as dropping, but reads better at call sites.
    pub fn detach(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut counts = self.registry.borrow_mut();
        if let Some(n) = counts.live.get_mut(&self.kind) {
            *n -= 1;
            if *n == 0 {
                counts.live.remove(&self.kind);
            }
        }
        log::trace!("detached {} listener", self.kind.event_name());
    }
}
