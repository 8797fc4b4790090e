#![forbid(unsafe_code)]

//! Per-tick polling of dedicated navigation buttons.
//!
//! Some platforms do not deliver the mouse side buttons as events; the host
//! instead polls an edge-triggered "pressed since last query" latch once per
//! update tick. [`poll_nav_buttons`] turns one such tick into history
//! commands.
//!
//! Polling is skipped entirely while the host window lacks input focus, so
//! presses meant for other applications are not acted upon. Back is always
//! reported before Forward within a tick.

use crate::keybinding::HistoryCommand;

/// The two dedicated navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavButton {
    /// Side "back" button.
    Back,
    /// Side "forward" button.
    Forward,
}

impl NavButton {
    /// The history command this button triggers.
    #[must_use]
    pub const fn command(self) -> HistoryCommand {
        match self {
            Self::Back => HistoryCommand::Back,
            Self::Forward => HistoryCommand::Forward,
        }
    }
}

/// Source of edge-triggered button signals.
pub trait NavButtonSource {
    /// Whether the host window currently has input focus.
    fn has_input_focus(&self) -> bool;

    /// Whether `button` was pressed since the previous query for it. Calling
    /// this consumes the latch.
    fn pressed_since_last_query(&mut self, button: NavButton) -> bool;
}

/// Poll both buttons once and return the commands to run, Back first.
///
/// Returns an empty list without touching the latches when the host window
/// lacks input focus.
pub fn poll_nav_buttons<S>(source: &mut S) -> Vec<HistoryCommand>
where
    S: NavButtonSource + ?Sized,
{
    if !source.has_input_focus() {
        return Vec::new();
    }
    [NavButton::Back, NavButton::Forward]
        .into_iter()
        .filter(|button| source.pressed_since_last_query(*button))
        .map(NavButton::command)
        .collect()
}
