use std::cell::{ Cell, RefCell };
use std::rc::{ Rc, Weak };

use crate::host::{ Scheduler, TimerId };

struct Inner<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    pending: Cell<Option<TimerId>>,
    callback: RefCell<Box<dyn FnMut(A)>>,
}

impl<S: Scheduler, A> Drop for Inner<S, A> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }
}

/// A callback that only runs once calls have stopped for `wait_ms`.
///
/// Every [`call`](Debounced::call) cancels the pending run and schedules a new
/// one with the latest arguments. Clones share the same pending timer.
pub struct Debounced<S: Scheduler, A: 'static> {
    inner: Rc<Inner<S, A>>,
}

impl<S: Scheduler, A: 'static> Clone for Debounced<S, A> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

pub fn debounce<S, A, F>(scheduler: S, wait_ms: u32, callback: F) -> Debounced<S, A>
    where S: Scheduler, A: 'static, F: FnMut(A) + 'static
{
    Debounced {
        inner: Rc::new(Inner {
            scheduler,
            wait_ms,
            pending: Cell::new(None),
            callback: RefCell::new(Box::new(callback)),
        }),
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn call(&self, args: A) {
        self.cancel();

        let weak: Weak<Inner<S, A>> = Rc::downgrade(&self.inner);
        let id = self.inner.scheduler.set_timeout(
            self.inner.wait_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.pending.set(None);
                    (inner.callback.borrow_mut())(args);
                }
            })
        );
        self.inner.pending.set(id);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.clear_timeout(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}
