//! Repeating spawn loop with an explicit pending handle.
//!
//! Each tick runs the task and then schedules the next tick after a random
//! delay.  At most one tick is ever pending; `stop()` clears it before it can
//! fire and `start()` on a running scheduler does nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::debug_log;
use crate::timer::{ITimerHost, TimeoutId};

pub struct SpawnScheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    timer: Rc<dyn ITimerHost>,
    interval_ms: [u32; 2],
    rng: RefCell<StdRng>,
    task: RefCell<Box<dyn FnMut()>>,
    running: Cell<bool>,
    pending: Cell<Option<TimeoutId>>,
}

impl SpawnScheduler {
    /// `interval_ms` is the inclusive `[min, max]` delay between ticks.
    pub fn new(
        timer: Rc<dyn ITimerHost>,
        interval_ms: [u32; 2],
        rng: StdRng,
        task: Box<dyn FnMut()>,
    ) -> Self {
        let [lo, hi] = interval_ms;
        Self {
            inner: Rc::new(SchedulerInner {
                timer,
                interval_ms: [lo.min(hi), lo.max(hi)],
                rng: RefCell::new(rng),
                task: RefCell::new(task),
                running: Cell::new(false),
                pending: Cell::new(None),
            }),
        }
    }

    /// Begin ticking: run the task now, then keep rescheduling.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        debug_log!("spawn scheduler started");
        self.inner.running.set(true);
        SchedulerInner::tick(&self.inner);
    }

    /// Cancel the pending tick.  A tick already in progress finishes.
    pub fn stop(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.timer.clear_timeout(id);
        }
        if self.inner.running.replace(false) {
            debug_log!("spawn scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for SpawnScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl SchedulerInner {
    fn tick(this: &Rc<Self>) {
        {
            let mut task = this.task.borrow_mut();
            (&mut **task)();
        }
        // The task may have stopped us.
        if !this.running.get() {
            return;
        }

        let delay = this.next_delay();
        let weak = Rc::downgrade(this);
        let id = this.timer.set_timeout(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.pending.set(None);
                    if inner.running.get() {
                        SchedulerInner::tick(&inner);
                    }
                }
            }),
        );
        this.pending.set(Some(id));
    }

    fn next_delay(&self) -> u32 {
        let [lo, hi] = self.interval_ms;
        self.rng.borrow_mut().gen_range(lo..=hi)
    }
}
