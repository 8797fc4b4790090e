#![forbid(unsafe_code)]

//! Replayable operations.

use std::fmt;

/// One step of a scripted session. Entity arguments are indices into the
/// session's entity pool and wrap around, so any value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// The user selects one entity.
    Click(u32),
    /// The user selects two entities; the first is active.
    ClickPair(u32, u32),
    /// The user clicks empty space.
    Deselect,
    /// An entity is destroyed.
    Delete(u32),
    /// History/Back.
    Back,
    /// History/Forward.
    Forward,
    /// A click in the history list at a buffer index.
    SelectIndex(usize),
    /// History/Clear.
    Clear,
    /// Explicit prune.
    Prune,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click(id) => write!(f, "click({id})"),
            Self::ClickPair(a, b) => write!(f, "click({a},{b})"),
            Self::Deselect => f.write_str("deselect"),
            Self::Delete(id) => write!(f, "delete({id})"),
            Self::Back => f.write_str("back"),
            Self::Forward => f.write_str("forward"),
            Self::SelectIndex(i) => write!(f, "select({i})"),
            Self::Clear => f.write_str("clear"),
            Self::Prune => f.write_str("prune"),
        }
    }
}
