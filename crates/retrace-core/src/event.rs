#![forbid(unsafe_code)]

//! Canonical input event types forwarded by the host.
//!
//! The navigator never reads devices itself. The host translates whatever its
//! toolkit delivers into these types and hands them over; only the keys and
//! buttons that can drive history navigation are modelled.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot tell
//! - `Modifiers` use bitflags for easy combination
//! - `MouseButton::Back` / `MouseButton::Forward` are the dedicated side
//!   buttons (X1/X2) found on most five-button mice

use bitflags::bitflags;

/// A key press, repeat, or release as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
    /// Press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain press of `code`.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the modifier set.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Alt is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Presses and auto-repeats run commands; releases do not.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Keys a history binding can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, lower-cased by the chord parser.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// `F1` through `F24`.
    F(u8),
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Initial press. Hosts that cannot tell phases apart report this.
    #[default]
    Press,
    /// Auto-repeat while held.
    Repeat,
    /// Key went up.
    Release,
}

bitflags! {
    /// Held modifier keys. Chords match the set exactly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        /// Alt on PC keyboards, Option on Mac.
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        /// Windows/Command/Meta.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse button transition. Coordinates are irrelevant to history
/// navigation and are not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// An event with no modifiers.
    #[must_use]
    pub const fn new(kind: MouseEventKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifier set.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Mouse transitions the host forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Moved,
}

/// Physical mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Thumb button usually labelled "back" (X1).
    Back,
    /// Thumb button usually labelled "forward" (X2).
    Forward,
}
