//! Touch event normalizer.
//!
//! Turns the host's multi-touch event stream into per-contact begin, update
//! and end calls on the pointer collaborator. The listener half binds six
//! surface handlers plus a document-level move suppressor and removes them
//! again on [`TouchNormalizer::stop`]. The translation half runs inside those
//! handlers, see [`TouchNormalizer::dispatch`].

use crate::callbacks::{CallbackContext, TouchCallbacks};
use crate::category::{GatePolicy, PointerTransition, TouchCategory};
use crate::config::TouchConfig;
use crate::error::{DispatchError, ListenerError};
use crate::event::RawTouchEvent;
use crate::gate::InputGate;
use crate::host::{ListenerState, ListenerTarget, StartOutcome, TouchHandler, TouchHost};
use crate::locks::{LockTrigger, TouchLockId, TouchLocks};
use crate::pointer::PointerLifecycle;
use smallvec::SmallVec;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::iter;
use std::mem;
use std::rc::{Rc, Weak};

/// Contact point type delivered by a host's events.
pub type ContactOf<H> = <<H as TouchHost>::Event as RawTouchEvent>::Contact;

/// Six surface categories plus the document move suppressor.
pub const LISTENER_COUNT: usize = TouchCategory::ALL.len() + 1;

/// Normalizes host touch events into pointer lifecycle transitions.
///
/// Always lives behind an `Rc`: installed handlers keep a `Weak` back to the
/// normalizer, so dropping the last strong handle silences them and releases
/// every remaining listener.
pub struct TouchNormalizer<H, P>
where
    H: TouchHost,
    P: PointerLifecycle<ContactOf<H>>,
{
    this: Weak<Self>,
    host: Rc<H>,
    gate: InputGate,
    config: TouchConfig,
    pointers: RefCell<P>,
    callbacks: RefCell<TouchCallbacks<H::Event>>,
    callback_context: RefCell<CallbackContext>,
    locks: RefCell<TouchLocks<H::Event>>,
    last_event: RefCell<Option<H::Event>>,
    bindings: RefCell<Vec<H::Binding>>,
    state: Cell<ListenerState>,
}

impl<H, P> TouchNormalizer<H, P>
where
    H: TouchHost,
    P: PointerLifecycle<ContactOf<H>> + 'static,
{
    pub fn new(host: H, pointers: P, gate: InputGate) -> Rc<Self> {
        Self::with_config(host, pointers, gate, TouchConfig::default())
    }

    pub fn with_config(host: H, pointers: P, gate: InputGate, config: TouchConfig) -> Rc<Self> {
        let host = Rc::new(host);
        let context: CallbackContext = host.clone();
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            host,
            gate,
            config,
            pointers: RefCell::new(pointers),
            callbacks: RefCell::new(TouchCallbacks::new()),
            callback_context: RefCell::new(context),
            locks: RefCell::new(TouchLocks::new()),
            last_event: RefCell::new(None),
            bindings: RefCell::new(Vec::new()),
            state: Cell::new(ListenerState::Idle),
        })
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Local touch-disabled flag.
    pub fn disabled(&self) -> bool {
        self.gate.touch_disabled()
    }

    /// Silently drops gated lifecycle processing without unbinding listeners.
    pub fn set_disabled(&self, disabled: bool) {
        self.gate.set_touch_disabled(disabled);
    }

    pub fn state(&self) -> ListenerState {
        self.state.get()
    }

    pub fn is_listening(&self) -> bool {
        self.state.get() == ListenerState::Listening
    }

    /// Number of listener bindings currently held.
    pub fn listener_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    // ---------------------------------------------------------------------
    // Hooks
    // ---------------------------------------------------------------------

    /// Installs the user callback for `category`.
    ///
    /// Callbacks see every event of their category, gated or not. Returns
    /// true if a previous callback was replaced.
    pub fn set_callback(
        &self,
        category: TouchCategory,
        callback: impl Fn(&dyn Any, &H::Event) + 'static,
    ) -> bool {
        self.callbacks.borrow_mut().set(category, callback).is_some()
    }

    pub fn clear_callback(&self, category: TouchCategory) -> bool {
        self.callbacks.borrow_mut().clear(category).is_some()
    }

    pub fn has_callback(&self, category: TouchCategory) -> bool {
        self.callbacks.borrow().is_set(category)
    }

    pub fn callback_context(&self) -> CallbackContext {
        self.callback_context.borrow().clone()
    }

    pub fn set_callback_context(&self, context: CallbackContext) {
        *self.callback_context.borrow_mut() = context;
    }

    /// Restores the host as callback context.
    pub fn reset_callback_context(&self) {
        let context: CallbackContext = self.host.clone();
        self.set_callback_context(context);
    }

    /// Registers a lock that runs on every `trigger` event until `callback`
    /// returns true.
    pub fn add_touch_lock(
        &self,
        trigger: LockTrigger,
        callback: impl FnMut(&H::Event) -> bool + 'static,
    ) -> TouchLockId {
        self.locks.borrow_mut().add(trigger, callback)
    }

    pub fn remove_touch_lock(&self, id: TouchLockId) -> bool {
        self.locks.borrow_mut().remove(id)
    }

    pub fn touch_lock_count(&self) -> usize {
        self.locks.borrow().len()
    }

    /// Last raw event seen by a category handler.
    pub fn last_event(&self) -> Option<H::Event> {
        self.last_event.borrow().clone()
    }

    /// Scoped access to the pointer collaborator.
    ///
    /// Panics when called from inside a collaborator operation, the
    /// collaborator is exclusively borrowed while contacts are forwarded. Use
    /// [`try_with_pointers`](Self::try_with_pointers) from such code.
    pub fn with_pointers<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.pointers.borrow_mut())
    }

    /// Like [`with_pointers`](Self::with_pointers), but returns `None` while
    /// the collaborator is busy forwarding contacts.
    pub fn try_with_pointers<R>(&self, f: impl FnOnce(&mut P) -> R) -> Option<R> {
        let mut pointers = self.pointers.try_borrow_mut().ok()?;
        Some(f(&mut pointers))
    }

    // ---------------------------------------------------------------------
    // Listener lifecycle
    // ---------------------------------------------------------------------

    /// Binds the surface handlers and the document move suppressor.
    ///
    /// Without touch capability this is a no-op. Calling it while already
    /// listening is a no-op as well, listeners are never bound twice. If the
    /// host rejects a binding, the ones made so far are released and the
    /// normalizer stays idle.
    pub fn start(&self) -> Result<StartOutcome, ListenerError> {
        if self.is_listening() {
            log::warn!("touch input already listening, ignoring start");
            return Ok(StartOutcome::AlreadyListening);
        }
        if !self.host.touch_supported() {
            log::debug!("touch input unavailable, no listeners bound");
            return Ok(StartOutcome::Unsupported);
        }

        let bound = self.bind_all()?;
        log::debug!("touch input listening ({} listeners)", bound.len());
        *self.bindings.borrow_mut() = bound;
        self.state.set(ListenerState::Listening);
        Ok(StartOutcome::Started)
    }

    /// Removes every listener bound by [`start`](Self::start). Safe to call
    /// repeatedly or without a prior start.
    pub fn stop(&self) {
        let bindings = mem::take(&mut *self.bindings.borrow_mut());
        if !bindings.is_empty() {
            log::debug!("touch input releasing {} listeners", bindings.len());
        }
        for binding in bindings {
            self.host.unbind(binding);
        }
        self.state.set(ListenerState::Idle);
    }

    fn bind_all(&self) -> Result<Vec<H::Binding>, ListenerError> {
        let requests = TouchCategory::ALL
            .into_iter()
            .map(|category| {
                (
                    ListenerTarget::Surface,
                    category.event_name(),
                    self.category_handler(category),
                )
            })
            .chain(iter::once((
                ListenerTarget::Document,
                TouchCategory::Move.event_name(),
                self.suppress_handler(),
            )));

        let mut bound = Vec::with_capacity(LISTENER_COUNT);
        for (target, event_name, handler) in requests {
            match self.host.bind(target, event_name, handler) {
                Ok(binding) => bound.push(binding),
                Err(err) => {
                    log::warn!(
                        "binding {event_name} on {target} failed, releasing {} listeners",
                        bound.len()
                    );
                    for binding in bound.into_iter().rev() {
                        self.host.unbind(binding);
                    }
                    return Err(err);
                }
            }
        }
        Ok(bound)
    }

    fn category_handler(&self, category: TouchCategory) -> TouchHandler<H::Event> {
        let this = self.this.clone();
        Box::new(move |event: &H::Event| match this.upgrade() {
            Some(normalizer) => normalizer.dispatch(category, event),
            None => Ok(()),
        })
    }

    fn suppress_handler(&self) -> TouchHandler<H::Event> {
        let this = self.this.clone();
        Box::new(move |event: &H::Event| {
            if let Some(normalizer) = this.upgrade() {
                normalizer.consume_touch_move(event);
            }
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Translation
    // ---------------------------------------------------------------------

    /// Handles one native event of `category`.
    ///
    /// Order: touch locks (start and end only), user callback, gate check for
    /// categories with [`GatePolicy::CheckBeforeSuppress`], default
    /// suppression, then one collaborator call per changed contact point in
    /// host order. A collaborator error stops forwarding and is returned.
    pub fn dispatch(&self, category: TouchCategory, event: &H::Event) -> Result<(), DispatchError> {
        match category {
            TouchCategory::Start => self.run_touch_locks(LockTrigger::Start, event),
            TouchCategory::End => self.run_touch_locks(LockTrigger::End, event),
            _ => {}
        }

        if self.config.record_last_event {
            *self.last_event.borrow_mut() = Some(event.clone());
        }

        self.notify(category, event);

        if category.gate_policy() == GatePolicy::CheckBeforeSuppress && self.gate.is_closed() {
            log::trace!("{category} gated");
            return Ok(());
        }

        if self.config.prevent_default {
            event.prevent_default();
        }

        match category.transition() {
            Some(transition) => self.forward(category, transition, event),
            None => Ok(()),
        }
    }

    /// Document-level move handler: blocks overscroll and bounce, nothing else.
    pub fn consume_touch_move(&self, event: &H::Event) {
        event.prevent_default();
    }

    fn notify(&self, category: TouchCategory, event: &H::Event) {
        // No borrow is held while the callback runs, so it may reconfigure us.
        let Some(callback) = self.callbacks.borrow().get(category) else {
            return;
        };
        let context = self.callback_context();
        callback(&*context, event);
    }

    fn run_touch_locks(&self, trigger: LockTrigger, event: &H::Event) {
        let pending = self.locks.borrow().matching(trigger);
        let mut released: SmallVec<[TouchLockId; 4]> = SmallVec::new();
        for (id, callback) in pending {
            if (*callback.borrow_mut())(event) {
                released.push(id);
            }
        }
        if !released.is_empty() {
            log::debug!("released {} touch locks", released.len());
            self.locks.borrow_mut().release(&released);
        }
    }

    fn forward(
        &self,
        category: TouchCategory,
        transition: PointerTransition,
        event: &H::Event,
    ) -> Result<(), DispatchError> {
        let contacts = event.changed_touches();
        log::trace!("{category}: {} changed contacts", contacts.len());
        // A collaborator dispatching back into us gets an error, not a panic.
        let mut pointers = self
            .pointers
            .try_borrow_mut()
            .map_err(|err| DispatchError::new(category, transition, err))?;
        for contact in &contacts {
            pointers
                .apply(transition, contact)
                .map_err(|err| DispatchError::new(category, transition, err))?;
        }
        Ok(())
    }
}

impl<H, P> Drop for TouchNormalizer<H, P>
where
    H: TouchHost,
    P: PointerLifecycle<ContactOf<H>>,
{
    fn drop(&mut self) {
        for binding in self.bindings.get_mut().drain(..) {
            self.host.unbind(binding);
        }
    }
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
