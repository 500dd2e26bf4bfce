//! Recording pointer collaborator.

use crate::event::SyntheticTouch;
use std::fmt;
use touchline_core::{PointerLifecycle, PointerTransition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedTransition {
    pub transition: PointerTransition,
    pub touch_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderError {
    pub transition: PointerTransition,
    pub touch_id: u32,
}

impl fmt::Display for RecorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pointer {} rejected {:?}",
            self.touch_id, self.transition
        )
    }
}

impl std::error::Error for RecorderError {}

/// Records every transition in arrival order.
#[derive(Default)]
pub struct PointerRecorder {
    log: Vec<RecordedTransition>,
    fail_on: Option<(PointerTransition, u32)>,
}

impl PointerRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every `transition` for touch `touch_id`.
    pub fn failing_on(transition: PointerTransition, touch_id: u32) -> Self {
        Self {
            log: Vec::new(),
            fail_on: Some((transition, touch_id)),
        }
    }

    pub fn transitions(&self) -> &[RecordedTransition] {
        &self.log
    }

    /// Touch ids that received `transition`, in order.
    pub fn ids_for(&self, transition: PointerTransition) -> Vec<u32> {
        self.log
            .iter()
            .filter(|r| r.transition == transition)
            .map(|r| r.touch_id)
            .collect()
    }

    pub fn count(&self, transition: PointerTransition) -> usize {
        self.log.iter().filter(|r| r.transition == transition).count()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn record(
        &mut self,
        transition: PointerTransition,
        touch: &SyntheticTouch,
    ) -> Result<(), RecorderError> {
        if self.fail_on == Some((transition, touch.id)) {
            return Err(RecorderError {
                transition,
                touch_id: touch.id,
            });
        }
        self.log.push(RecordedTransition {
            transition,
            touch_id: touch.id,
        });
        Ok(())
    }
}

impl PointerLifecycle<SyntheticTouch> for PointerRecorder {
    type Error = RecorderError;

    fn start_pointer(&mut self, contact: &SyntheticTouch) -> Result<(), RecorderError> {
        self.record(PointerTransition::Begin, contact)
    }

    fn update_pointer(&mut self, contact: &SyntheticTouch) -> Result<(), RecorderError> {
        self.record(PointerTransition::Update, contact)
    }

    fn stop_pointer(&mut self, contact: &SyntheticTouch) -> Result<(), RecorderError> {
        self.record(PointerTransition::End, contact)
    }
}
