//! User hooks observing raw touch traffic.

use crate::category::TouchCategory;
use std::any::Any;
use std::rc::Rc;

/// Opaque value handed to every callback. Defaults to the host application.
pub type CallbackContext = Rc<dyn Any>;

/// Hook invoked with the callback context and the raw event.
pub type TouchCallback<E> = Rc<dyn Fn(&dyn Any, &E)>;

/// One optional callback slot per native category.
pub struct TouchCallbacks<E> {
    slots: [Option<TouchCallback<E>>; 6],
}

impl<E> TouchCallbacks<E> {
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// Installs `callback` for `category`, returning the one it replaces.
    pub fn set(
        &mut self,
        category: TouchCategory,
        callback: impl Fn(&dyn Any, &E) + 'static,
    ) -> Option<TouchCallback<E>> {
        self.slots[category.index()].replace(Rc::new(callback))
    }

    pub fn clear(&mut self, category: TouchCategory) -> Option<TouchCallback<E>> {
        self.slots[category.index()].take()
    }

    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Cheap handle to the callback, so it can run without holding `self`.
    pub fn get(&self, category: TouchCategory) -> Option<TouchCallback<E>> {
        self.slots[category.index()].clone()
    }

    pub fn is_set(&self, category: TouchCategory) -> bool {
        self.slots[category.index()].is_some()
    }
}

impl<E> Default for TouchCallbacks<E> {
    fn default() -> Self {
        Self::new()
    }
}
