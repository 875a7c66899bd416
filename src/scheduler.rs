//! Recurring-tick scheduling supplied by the host.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec as AllocVec;
use core::cell::{Cell, RefCell};

/// Callback run on every tick.
pub type TickCallback = Box<dyn FnMut()>;

/// Cancels a recurring callback registered with a [`Scheduler`].
pub trait TickHandle {
    /// Deregister the callback. A tick already running completes; no
    /// further tick fires.
    fn cancel(self);
}

/// A host timer facility: `setInterval` in a browser, a manual pump in tests.
pub trait Scheduler {
    type Handle: TickHandle;

    /// Register `callback` to run every `interval_ms` milliseconds.
    ///
    /// Returns `None` when the host has no timer facility; nothing is
    /// scheduled in that case.
    fn schedule(&mut self, interval_ms: u32, callback: TickCallback) -> Option<Self::Handle>;
}

struct Slot {
    id: u64,
    interval_ms: u32,
    callback: Option<TickCallback>,
}

#[derive(Default)]
struct Slots {
    next_id: Cell<u64>,
    slots: RefCell<AllocVec<Slot>>,
}

/// A [`Scheduler`] whose ticks fire only when [`ManualScheduler::fire`] is
/// called. Clones share the same registrations.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<Slots>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every registered callback once. Returns how many ran.
    pub fn fire(&self) -> usize {
        let ids: AllocVec<u64> = self.inner.slots.borrow().iter().map(|s| s.id).collect();
        let mut fired = 0;
        for id in ids {
            // Take the callback out so it may touch the scheduler while running.
            let taken = self
                .inner
                .slots
                .borrow_mut()
                .iter_mut()
                .find(|s| s.id == id)
                .and_then(|s| s.callback.take());
            let Some(mut callback) = taken else {
                continue;
            };
            callback();
            fired += 1;
            if let Some(slot) = self.inner.slots.borrow_mut().iter_mut().find(|s| s.id == id) {
                slot.callback = Some(callback);
            }
        }
        fired
    }

    /// Fire `n` times. Returns the total number of callbacks run.
    pub fn fire_n(&self, n: usize) -> usize {
        (0..n).map(|_| self.fire()).sum()
    }

    /// Number of live registrations.
    pub fn active(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    /// Interval of every live registration, in registration order.
    pub fn intervals(&self) -> AllocVec<u32> {
        self.inner.slots.borrow().iter().map(|s| s.interval_ms).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&mut self, interval_ms: u32, callback: TickCallback) -> Option<ManualHandle> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.slots.borrow_mut().push(Slot {
            id,
            interval_ms,
            callback: Some(callback),
        });
        Some(ManualHandle {
            id,
            scheduler: Rc::clone(&self.inner),
        })
    }
}

/// Handle returned by [`ManualScheduler`].
pub struct ManualHandle {
    id: u64,
    scheduler: Rc<Slots>,
}

impl TickHandle for ManualHandle {
    fn cancel(self) {
        self.scheduler.slots.borrow_mut().retain(|s| s.id != self.id);
    }
}
