//! Touch input normalization for Touchline.
//!
//! Sits between a host's native touch events and the application's pointer
//! dispatch layer. Each native event carries a batch of changed contact
//! points; the [`TouchNormalizer`] turns that batch into one begin, update or
//! end call per contact on a [`PointerLifecycle`] collaborator, honouring a
//! shared [`InputGate`] and user hooks that observe every raw event.
//!
//! The crate is platform-agnostic. A [`TouchHost`] implementation supplies
//! listener registration and the capability flag; see
//! `touchline-platform-web` for the browser binding.

mod callbacks;
mod category;
mod config;
mod error;
mod event;
mod gate;
mod host;
mod locks;
mod normalizer;
mod pointer;

pub use callbacks::{CallbackContext, TouchCallback, TouchCallbacks};
pub use category::{GatePolicy, PointerTransition, TouchCategory};
pub use config::TouchConfig;
pub use error::{DispatchError, ListenerError};
pub use event::{ChangedTouches, RawTouchEvent};
pub use gate::InputGate;
pub use host::{ListenerState, ListenerTarget, StartOutcome, TouchHandler, TouchHost};
pub use locks::{LockTrigger, TouchLockId, TouchLocks};
pub use normalizer::{ContactOf, TouchNormalizer, LISTENER_COUNT};
pub use pointer::PointerLifecycle;

pub mod prelude {
    pub use crate::category::{PointerTransition, TouchCategory};
    pub use crate::config::TouchConfig;
    pub use crate::event::RawTouchEvent;
    pub use crate::gate::InputGate;
    pub use crate::host::{ListenerTarget, StartOutcome, TouchHost};
    pub use crate::locks::LockTrigger;
    pub use crate::normalizer::TouchNormalizer;
    pub use crate::pointer::PointerLifecycle;
}
