//! Scripted host surface.
//!
//! Stands in for a canvas and its document: keeps the installed handlers in
//! registration order and lets a test fire native events at either target.

use crate::event::SyntheticEvent;
use std::cell::{Cell, RefCell};
use touchline_core::{
    DispatchError, ListenerError, ListenerTarget, TouchCategory, TouchHandler, TouchHost,
};

/// Registration token handed back by [`ScriptedHost::bind`].
#[derive(Debug, PartialEq, Eq)]
pub struct ScriptedBinding(u64);

struct Listener {
    id: u64,
    target: ListenerTarget,
    event_name: &'static str,
    // Taken out while the handler runs so it may unbind itself.
    handler: Option<TouchHandler<SyntheticEvent>>,
}

pub struct ScriptedHost {
    touch_supported: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
    fail_on: RefCell<Option<(ListenerTarget, &'static str)>>,
    bind_calls: Cell<usize>,
    unbind_calls: Cell<usize>,
    stray_unbinds: Cell<usize>,
}

impl ScriptedHost {
    /// Host with touch capability.
    pub fn new() -> Self {
        Self {
            touch_supported: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            fail_on: RefCell::new(None),
            bind_calls: Cell::new(0),
            unbind_calls: Cell::new(0),
            stray_unbinds: Cell::new(0),
        }
    }

    /// Host reporting no touch capability.
    pub fn without_touch() -> Self {
        let host = Self::new();
        host.touch_supported.set(false);
        host
    }

    pub fn set_touch_supported(&self, supported: bool) {
        self.touch_supported.set(supported);
    }

    /// Makes the next bind of `event_name` on `target` fail.
    pub fn fail_binding(&self, target: ListenerTarget, event_name: &'static str) {
        *self.fail_on.borrow_mut() = Some((target, event_name));
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count(&self, target: ListenerTarget, event_name: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.event_name == event_name)
            .count()
    }

    pub fn is_bound(&self, target: ListenerTarget, event_name: &str) -> bool {
        self.listener_count(target, event_name) > 0
    }

    pub fn bind_calls(&self) -> usize {
        self.bind_calls.get()
    }

    pub fn unbind_calls(&self) -> usize {
        self.unbind_calls.get()
    }

    /// Unbinds of tokens this host never issued or already released.
    pub fn stray_unbinds(&self) -> usize {
        self.stray_unbinds.get()
    }

    /// Fires `event` at every listener for `event_name` on `target`, in
    /// registration order. Returns how many handlers ran.
    pub fn fire(
        &self,
        target: ListenerTarget,
        event_name: &str,
        event: &SyntheticEvent,
    ) -> Result<usize, DispatchError> {
        let ids: Vec<u64> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.event_name == event_name)
            .map(|l| l.id)
            .collect();

        let mut invoked = 0;
        for id in ids {
            let Some(mut handler) = self.take_handler(id) else {
                continue;
            };
            let result = handler(event);
            self.restore_handler(id, handler);
            invoked += 1;
            result?;
        }
        Ok(invoked)
    }

    /// Fires a native category event at the rendering surface.
    pub fn touch(
        &self,
        category: TouchCategory,
        event: &SyntheticEvent,
    ) -> Result<usize, DispatchError> {
        self.fire(ListenerTarget::Surface, category.event_name(), event)
    }

    /// Fires a move event at the document root.
    pub fn document_move(&self, event: &SyntheticEvent) -> Result<usize, DispatchError> {
        self.fire(
            ListenerTarget::Document,
            TouchCategory::Move.event_name(),
            event,
        )
    }

    fn take_handler(&self, id: u64) -> Option<TouchHandler<SyntheticEvent>> {
        self.listeners
            .borrow_mut()
            .iter_mut()
            .find(|l| l.id == id)
            .and_then(|l| l.handler.take())
    }

    fn restore_handler(&self, id: u64, handler: TouchHandler<SyntheticEvent>) {
        // Dropped if the listener was unbound while it ran.
        if let Some(listener) = self.listeners.borrow_mut().iter_mut().find(|l| l.id == id) {
            listener.handler = Some(handler);
        }
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchHost for ScriptedHost {
    type Event = SyntheticEvent;
    type Binding = ScriptedBinding;

    fn touch_supported(&self) -> bool {
        self.touch_supported.get()
    }

    fn bind(
        &self,
        target: ListenerTarget,
        event_name: &'static str,
        handler: TouchHandler<SyntheticEvent>,
    ) -> Result<ScriptedBinding, ListenerError> {
        self.bind_calls.set(self.bind_calls.get() + 1);
        let should_fail = *self.fail_on.borrow() == Some((target, event_name));
        if should_fail {
            self.fail_on.borrow_mut().take();
            return Err(ListenerError::BindFailed {
                target,
                event_name,
                reason: "scripted failure".into(),
            });
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            event_name,
            handler: Some(handler),
        });
        Ok(ScriptedBinding(id))
    }

    fn unbind(&self, binding: ScriptedBinding) {
        self.unbind_calls.set(self.unbind_calls.get() + 1);
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|l| l.id == binding.0) {
            Some(index) => {
                let listener = listeners.remove(index);
                drop(listeners);
                // Handler drop may release the last normalizer handle.
                drop(listener);
            }
            None => {
                log::warn!("unbind of unknown listener {}", binding.0);
                self.stray_unbinds.set(self.stray_unbinds.get() + 1);
            }
        }
    }
}
