//! Testing utilities and harness for Touchline
//!
//! Provides an in-memory host with a scripted rendering surface and document
//! root, synthetic touch events, and a pointer collaborator that records every
//! transition it receives.

pub mod event;
pub mod host;
pub mod recorder;

pub use event::{SyntheticEvent, SyntheticTouch};
pub use host::{ScriptedBinding, ScriptedHost};
pub use recorder::{PointerRecorder, RecordedTransition, RecorderError};

/// Normalizer wired to the scripted host and the recording collaborator.
pub type TestNormalizer = touchline_core::TouchNormalizer<ScriptedHost, PointerRecorder>;

pub mod prelude {
    pub use crate::event::{SyntheticEvent, SyntheticTouch};
    pub use crate::host::{ScriptedBinding, ScriptedHost};
    pub use crate::recorder::{PointerRecorder, RecordedTransition, RecorderError};
    pub use crate::TestNormalizer;
}
