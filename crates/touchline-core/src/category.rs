//! Native touch categories and the pointer transition each one maps to.
//!
//! The gate asymmetry between categories lives in [`TouchCategory::gate_policy`]
//! so the dispatcher never has to special-case a category by name.

use std::fmt;

/// One of the six native touch event categories bound on the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchCategory {
    Start,
    Move,
    End,
    Enter,
    Leave,
    Cancel,
}

/// Operation invoked on the pointer collaborator for each changed contact point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerTransition {
    Begin,
    Update,
    End,
}

/// How a category treats the input gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePolicy {
    /// A closed gate skips default suppression and forwarding.
    CheckBeforeSuppress,
    /// Suppression and forwarding happen whatever the gate says.
    AlwaysSuppress,
}

impl TouchCategory {
    /// All categories in binding order.
    pub const ALL: [TouchCategory; 6] = [
        TouchCategory::Start,
        TouchCategory::Move,
        TouchCategory::End,
        TouchCategory::Enter,
        TouchCategory::Leave,
        TouchCategory::Cancel,
    ];

    /// DOM event type name for this category.
    pub fn event_name(self) -> &'static str {
        match self {
            TouchCategory::Start => "touchstart",
            TouchCategory::Move => "touchmove",
            TouchCategory::End => "touchend",
            TouchCategory::Enter => "touchenter",
            TouchCategory::Leave => "touchleave",
            TouchCategory::Cancel => "touchcancel",
        }
    }

    /// Collaborator operation for this category.
    ///
    /// Cancelled touches (for example interrupted by an OS overlay) end the
    /// pointer like a regular release. Enter and leave forward nothing.
    pub fn transition(self) -> Option<PointerTransition> {
        match self {
            TouchCategory::Start => Some(PointerTransition::Begin),
            TouchCategory::Move => Some(PointerTransition::Update),
            TouchCategory::End | TouchCategory::Cancel => Some(PointerTransition::End),
            TouchCategory::Enter | TouchCategory::Leave => None,
        }
    }

    pub fn gate_policy(self) -> GatePolicy {
        match self {
            TouchCategory::Start | TouchCategory::Cancel | TouchCategory::Enter => {
                GatePolicy::CheckBeforeSuppress
            }
            TouchCategory::Move | TouchCategory::End | TouchCategory::Leave => {
                GatePolicy::AlwaysSuppress
            }
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TouchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
