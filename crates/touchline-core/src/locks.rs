//! Touch locks: callbacks that wait for a user gesture.
//!
//! Some platform resources (audio playback in particular) may only be
//! unlocked from inside a touch handler. A lock runs on every matching event
//! until its callback reports success by returning `true`.

use std::cell::RefCell;
use std::rc::Rc;

/// Event that triggers a lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTrigger {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchLockId(u64);

pub(crate) type LockCallback<E> = Rc<RefCell<dyn FnMut(&E) -> bool>>;

struct TouchLock<E> {
    id: TouchLockId,
    trigger: LockTrigger,
    callback: LockCallback<E>,
}

pub struct TouchLocks<E> {
    locks: Vec<TouchLock<E>>,
    next_id: u64,
}

impl<E> TouchLocks<E> {
    pub fn new() -> Self {
        Self {
            locks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(
        &mut self,
        trigger: LockTrigger,
        callback: impl FnMut(&E) -> bool + 'static,
    ) -> TouchLockId {
        let id = TouchLockId(self.next_id);
        self.next_id += 1;
        self.locks.push(TouchLock {
            id,
            trigger,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    pub fn remove(&mut self, id: TouchLockId) -> bool {
        let before = self.locks.len();
        self.locks.retain(|lock| lock.id != id);
        self.locks.len() != before
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Locks waiting on `trigger`, newest first.
    pub(crate) fn matching(&self, trigger: LockTrigger) -> Vec<(TouchLockId, LockCallback<E>)> {
        self.locks
            .iter()
            .rev()
            .filter(|lock| lock.trigger == trigger)
            .map(|lock| (lock.id, lock.callback.clone()))
            .collect()
    }

    pub(crate) fn release(&mut self, ids: &[TouchLockId]) {
        self.locks.retain(|lock| !ids.contains(&lock.id));
    }
}

impl<E> Default for TouchLocks<E> {
    fn default() -> Self {
        Self::new()
    }
}
