//! Synthetic touch events.

use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;
use touchline_core::{ChangedTouches, RawTouchEvent};

/// One contact point. The normalizer never looks inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticTouch {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl SyntheticTouch {
    pub fn new(id: u32) -> Self {
        Self { id, x: 0.0, y: 0.0 }
    }

    pub fn at(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Event carrying an ordered changed-set.
///
/// Clones share the default-suppression counter, the same way a host event
/// object is shared by reference.
#[derive(Clone, Debug)]
pub struct SyntheticEvent {
    changed: SmallVec<[SyntheticTouch; 4]>,
    prevented: Rc<Cell<usize>>,
}

impl SyntheticEvent {
    pub fn new(changed: impl IntoIterator<Item = SyntheticTouch>) -> Self {
        Self {
            changed: changed.into_iter().collect(),
            prevented: Rc::new(Cell::new(0)),
        }
    }

    /// Event whose changed-set holds one touch per id, in the given order.
    pub fn with_ids(ids: &[u32]) -> Self {
        Self::new(ids.iter().copied().map(SyntheticTouch::new))
    }

    pub fn empty() -> Self {
        Self::new([])
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get() > 0
    }

    /// How many times default suppression was requested.
    pub fn prevent_default_calls(&self) -> usize {
        self.prevented.get()
    }

    pub fn touches(&self) -> &[SyntheticTouch] {
        &self.changed
    }
}

impl RawTouchEvent for SyntheticEvent {
    type Contact = SyntheticTouch;

    fn changed_touches(&self) -> ChangedTouches<SyntheticTouch> {
        self.changed.clone()
    }

    fn prevent_default(&self) {
        self.prevented.set(self.prevented.get() + 1);
    }
}
