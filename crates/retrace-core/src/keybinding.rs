#![forbid(unsafe_code)]

//! Named history commands and the key chords bound to them.
//!
//! # Key Concepts
//!
//! - **HistoryCommand**: the three commands the host can invoke, each with a
//!   stable name (`History/Back`, `History/Forward`, `History/Clear`) used by
//!   menus and configuration files.
//!
//! - **KeyChord**: a key code plus the exact set of modifiers that must be
//!   held. Chords parse from and print to strings such as `ctrl+left`.
//!
//! - **CommandBindings**: the chord table. Defaults bind Back to Ctrl+Left and
//!   Forward to Ctrl+Right; Clear has no default chord. A chord maps to at
//!   most one command and a command owns at most one chord.
//!
//! # Example
//!
//! ```
//! use retrace_core::event::{KeyCode, KeyEvent, Modifiers};
//! use retrace_core::keybinding::{CommandBindings, HistoryCommand};
//!
//! let bindings = CommandBindings::default();
//! let ctrl_left = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::CTRL);
//! assert_eq!(bindings.resolve(&ctrl_left), Some(HistoryCommand::Back));
//!
//! // Plain Left is not bound.
//! assert_eq!(bindings.resolve(&KeyEvent::new(KeyCode::Left)), None);
//! ```

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;

use crate::event::{KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Commands exposed to the host's shortcut and menu systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryCommand {
    /// Step to the previous focus point.
    Back,
    /// Step to the next focus point.
    Forward,
    /// Forget all recorded focus points.
    Clear,
}

impl HistoryCommand {
    /// All commands, in menu order.
    pub const ALL: [HistoryCommand; 3] = [Self::Back, Self::Forward, Self::Clear];

    /// Stable command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "History/Back",
            Self::Forward => "History/Forward",
            Self::Clear => "History/Clear",
        }
    }

    /// Look a command up by its stable name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    /// The chord bound by default, if any.
    #[must_use]
    pub const fn default_chord(self) -> Option<KeyChord> {
        match self {
            Self::Back => Some(KeyChord::new(KeyCode::Left, Modifiers::CTRL)),
            Self::Forward => Some(KeyChord::new(KeyCode::Right, Modifiers::CTRL)),
            Self::Clear => None,
        }
    }
}

impl fmt::Display for HistoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Chords
// ---------------------------------------------------------------------------

/// A key plus the exact modifier set that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key.
    pub code: KeyCode,
    /// Required modifiers (matched exactly).
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Create a chord.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether `event` is a press or repeat of this chord.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.is_actionable() && KeyChord::from(event) == *self
    }
}

/// Character keys are folded to ASCII lower case, the form chord strings
/// parse to, so `Char('H')` with Shift matches `shift+h`.
impl From<&KeyEvent> for KeyChord {
    fn from(event: &KeyEvent) -> Self {
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Self::new(code, event.modifiers)
    }
}

/// Errors from parsing a chord string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    /// The string was empty or only separators.
    Empty,
    /// A modifier segment was not recognised.
    UnknownModifier(String),
    /// The final key segment was not recognised.
    UnknownKey(String),
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty key chord"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier: {m:?}"),
            Self::UnknownKey(k) => write!(f, "unknown key: {k:?}"),
        }
    }
}

impl std::error::Error for ChordParseError {}

fn parse_modifier(s: &str) -> Option<Modifiers> {
    match s {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "super" | "cmd" | "meta" => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn parse_key(s: &str) -> Option<KeyCode> {
    let code = match s {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        _ => {
            if let Some(n) = s.strip_prefix('f')
                && let Ok(n) = n.parse::<u8>()
                && (1..=24).contains(&n)
            {
                return Some(KeyCode::F(n));
            }
            let mut chars = s.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            };
        }
    };
    Some(code)
}

impl FromStr for KeyChord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut segments: Vec<&str> = lowered.split('+').map(str::trim).collect();
        // "ctrl++" means Ctrl and the plus key.
        if lowered.ends_with("++") {
            segments.truncate(segments.len().saturating_sub(2));
            segments.push("+");
        }
        let Some(key) = segments.pop().filter(|k| !k.is_empty()) else {
            return Err(ChordParseError::Empty);
        };

        let mut modifiers = Modifiers::NONE;
        for segment in segments {
            let m = parse_modifier(segment)
                .ok_or_else(|| ChordParseError::UnknownModifier(segment.to_string()))?;
            modifiers |= m;
        }
        let code = parse_key(key).ok_or_else(|| ChordParseError::UnknownKey(key.to_string()))?;
        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::SUPER, "super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Escape => f.write_str("escape"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
        }
    }
}

// ---------------------------------------------------------------------------
// Binding table
// ---------------------------------------------------------------------------

/// Chord-to-command table plus the mouse side-button switch.
#[derive(Debug, Clone)]
pub struct CommandBindings {
    by_chord: AHashMap<KeyChord, HistoryCommand>,
    mouse_buttons: bool,
}

impl Default for CommandBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for cmd in HistoryCommand::ALL {
            if let Some(chord) = cmd.default_chord() {
                bindings.bind(cmd, chord);
            }
        }
        bindings
    }
}

impl CommandBindings {
    /// A table with no chords and mouse side buttons enabled.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_chord: AHashMap::new(),
            mouse_buttons: true,
        }
    }

    /// Enable or disable the mouse side buttons.
    #[must_use]
    pub fn with_mouse_buttons(mut self, enabled: bool) -> Self {
        self.mouse_buttons = enabled;
        self
    }

    /// Whether mouse side buttons are mapped.
    #[must_use]
    pub fn mouse_buttons(&self) -> bool {
        self.mouse_buttons
    }

    /// Bind `chord` to `cmd`, replacing any chord `cmd` had and stealing
    /// `chord` from whatever command held it.
    pub fn bind(&mut self, cmd: HistoryCommand, chord: KeyChord) {
        self.unbind(cmd);
        self.by_chord.insert(chord, cmd);
    }

    /// Remove the chord of `cmd`. Returns the removed chord.
    pub fn unbind(&mut self, cmd: HistoryCommand) -> Option<KeyChord> {
        let chord = self.chord_for(cmd)?;
        self.by_chord.remove(&chord);
        Some(chord)
    }

    /// The chord currently bound to `cmd`.
    #[must_use]
    pub fn chord_for(&self, cmd: HistoryCommand) -> Option<KeyChord> {
        self.by_chord
            .iter()
            .find_map(|(chord, bound)| (*bound == cmd).then_some(*chord))
    }

    /// Resolve a key event to a command.
    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<HistoryCommand> {
        if !event.is_actionable() {
            return None;
        }
        self.by_chord.get(&KeyChord::from(event)).copied()
    }

    /// Resolve a mouse event to a command. Only side-button presses map.
    #[must_use]
    pub fn resolve_mouse(&self, event: &MouseEvent) -> Option<HistoryCommand> {
        if !self.mouse_buttons {
            return None;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Back) => Some(HistoryCommand::Back),
            MouseEventKind::Down(MouseButton::Forward) => Some(HistoryCommand::Forward),
            _ => None,
        }
    }
}
