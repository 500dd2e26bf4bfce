//! Listener registration seam between the normalizer and the host platform.

use crate::error::{DispatchError, ListenerError};
use crate::event::RawTouchEvent;
use std::fmt;

/// Where a listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The application's rendering surface.
    Surface,
    /// The document root.
    Document,
}

impl fmt::Display for ListenerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerTarget::Surface => f.write_str("surface"),
            ListenerTarget::Document => f.write_str("document"),
        }
    }
}

/// Handler installed for one native category.
pub type TouchHandler<E> = Box<dyn FnMut(&E) -> Result<(), DispatchError>>;

/// Host platform owning the rendering surface and the document root.
///
/// Registration happens with bubbling-phase semantics. A binding is the
/// host's proof of registration and is handed back exactly once to
/// [`TouchHost::unbind`].
pub trait TouchHost: 'static {
    type Event: RawTouchEvent;
    type Binding;

    /// Precomputed device capability.
    fn touch_supported(&self) -> bool;

    fn bind(
        &self,
        target: ListenerTarget,
        event_name: &'static str,
        handler: TouchHandler<Self::Event>,
    ) -> Result<Self::Binding, ListenerError>;

    fn unbind(&self, binding: Self::Binding);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
}

/// Result of a successful [`start`](crate::TouchNormalizer::start) call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Listeners were already bound; nothing changed.
    AlreadyListening,
    /// The host reports no touch capability; nothing was bound.
    Unsupported,
}
