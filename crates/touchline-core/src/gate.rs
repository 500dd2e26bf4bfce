//! Shared input gate.
//!
//! The input manager owns both flags and flips them; the normalizer holds a
//! clone of the handle and only reads it at dispatch time.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct GateFlags {
    input_disabled: Cell<bool>,
    touch_disabled: Cell<bool>,
}

/// Cloneable handle to the global input-disabled flag and the local
/// touch-disabled flag.
#[derive(Clone, Default)]
pub struct InputGate {
    flags: Rc<GateFlags>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global flag, shared by every input path of the application.
    pub fn input_disabled(&self) -> bool {
        self.flags.input_disabled.get()
    }

    pub fn set_input_disabled(&self, disabled: bool) {
        self.flags.input_disabled.set(disabled);
    }

    /// Local flag, scoped to touch input.
    pub fn touch_disabled(&self) -> bool {
        self.flags.touch_disabled.get()
    }

    pub fn set_touch_disabled(&self, disabled: bool) {
        self.flags.touch_disabled.set(disabled);
    }

    /// Returns true when either flag blocks lifecycle forwarding.
    pub fn is_closed(&self) -> bool {
        self.input_disabled() || self.touch_disabled()
    }

    /// Returns true if both handles point at the same flags.
    pub fn ptr_eq(&self, other: &InputGate) -> bool {
        Rc::ptr_eq(&self.flags, &other.flags)
    }
}

impl fmt::Debug for InputGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputGate")
            .field("input_disabled", &self.input_disabled())
            .field("touch_disabled", &self.touch_disabled())
            .finish()
    }
}
