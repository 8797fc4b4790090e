#![forbid(unsafe_code)]

//! Scripted navigation buttons.

use retrace_core::nav_buttons::{NavButton, NavButtonSource};

/// Latches set by the test and consumed by polling.
#[derive(Debug, Clone)]
pub struct ScriptedButtons {
    focused: bool,
    back: bool,
    forward: bool,
    queries: usize,
}

impl Default for ScriptedButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedButtons {
    /// Focused window, no presses latched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focused: true,
            back: false,
            forward: false,
            queries: 0,
        }
    }

    /// Latch a press of `button`.
    pub fn press(&mut self, button: NavButton) {
        match button {
            NavButton::Back => self.back = true,
            NavButton::Forward => self.forward = true,
        }
    }

    /// Give or take away the window's input focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// How many latches have been queried.
    #[must_use]
    pub fn queries(&self) -> usize {
        self.queries
    }
}

impl NavButtonSource for ScriptedButtons {
    fn has_input_focus(&self) -> bool {
        self.focused
    }

    fn pressed_since_last_query(&mut self, button: NavButton) -> bool {
        self.queries += 1;
        match button {
            NavButton::Back => std::mem::take(&mut self.back),
            NavButton::Forward => std::mem::take(&mut self.forward),
        }
    }
}
