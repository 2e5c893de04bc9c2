//! Timer hosts.
//!
//! Everything that waits goes through [`ITimerHost`] so the spawn loop and
//! particle removal can be driven by a manual clock in tests instead of the
//! browser's `setTimeout`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Handle of a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutId(u64);

pub trait ITimerHost {
    /// Run `callback` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimeoutId;

    /// Cancel a pending callback.  Unknown or already fired ids are ignored.
    fn clear_timeout(&self, id: TimeoutId);

    /// Run `callback` once after `delay_ms` even if this host is dropped
    /// first.  The callback cannot be cancelled.
    fn set_detached_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        self.set_timeout(delay_ms, callback);
    }
}

// ---------------------------------------------------------------------------
// Browser timers
// ---------------------------------------------------------------------------

/// `setTimeout`-backed host.  Pending `Timeout`s are kept by id; dropping one
/// (or the host) cancels it.  Detached timeouts are handed to the browser and
/// not tracked.
#[derive(Default)]
pub struct GlooTimerHost {
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<TimeoutId, Timeout>>>,
}

impl GlooTimerHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ITimerHost for GlooTimerHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimeoutId {
        let id = TimeoutId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let pending = Rc::downgrade(&self.pending);
        let timeout = Timeout::new(delay_ms, move || {
            callback();
            if let Some(pending) = pending.upgrade() {
                pending.borrow_mut().remove(&id);
            }
        });
        self.pending.borrow_mut().insert(id, timeout);
        id
    }

    fn clear_timeout(&self, id: TimeoutId) {
        // Dropping the gloo handle calls clearTimeout.
        let removed = self.pending.borrow_mut().remove(&id);
        drop(removed);
    }

    fn set_detached_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let _ = Timeout::new(delay_ms, callback).forget();
    }
}

// ---------------------------------------------------------------------------
// Manual clock
// ---------------------------------------------------------------------------

struct Scheduled {
    id: TimeoutId,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

/// Deterministic host whose clock only moves when [`ManualTimer::advance`]
/// is called.  Callbacks due at the same instant run in scheduling order.
#[derive(Default)]
pub struct ManualTimer {
    now_ms: Cell<u64>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Scheduled>>,
}

impl ManualTimer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `ms`, running every callback that becomes
    /// due, including ones scheduled by callbacks along the way.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due_ms <= target)
                    .min_by_key(|(_, s)| (s.due_ms, s.id.0))
                    .map(|(i, _)| i);
                earliest.map(|i| queue.remove(i))
            };
            match next {
                Some(scheduled) => {
                    self.now_ms.set(scheduled.due_ms);
                    (scheduled.callback)();
                }
                None => break,
            }
        }
        self.now_ms.set(target);
    }
}

impl ITimerHost for ManualTimer {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimeoutId {
        let id = TimeoutId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push(Scheduled {
            id,
            due_ms: self.now_ms.get() + delay_ms as u64,
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimeoutId) {
        self.queue.borrow_mut().retain(|s| s.id != id);
    }
}
