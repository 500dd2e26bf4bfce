use crate::category::{PointerTransition, TouchCategory};
use crate::host::ListenerTarget;
use std::error::Error;
use std::fmt;

/// Failure to register a native listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    BindFailed {
        target: ListenerTarget,
        event_name: &'static str,
        reason: String,
    },
    SurfaceUnavailable {
        reason: String,
    },
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerError::BindFailed {
                target,
                event_name,
                reason,
            } => write!(f, "failed to bind {event_name} on {target}: {reason}"),
            ListenerError::SurfaceUnavailable { reason } => {
                write!(f, "touch surface unavailable: {reason}")
            }
        }
    }
}

impl Error for ListenerError {}

/// The pointer collaborator rejected a contact point.
///
/// Contact points after the failing one are not forwarded.
#[derive(Debug)]
pub struct DispatchError {
    category: TouchCategory,
    transition: PointerTransition,
    source: Box<dyn Error + 'static>,
}

impl DispatchError {
    pub fn new(
        category: TouchCategory,
        transition: PointerTransition,
        source: impl Error + 'static,
    ) -> Self {
        Self {
            category,
            transition,
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> TouchCategory {
        self.category
    }

    pub fn transition(&self) -> PointerTransition {
        self.transition
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed during {:?}: {}",
            self.category, self.transition, self.source
        )
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}
