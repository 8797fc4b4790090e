#![forbid(unsafe_code)]

//! retrace public facade crate.
//!
//! Re-exports the types a host needs to wire focus history into its UI: the
//! adapter traits to implement, the [`Navigator`] service, the list view
//! model, bindings, and configuration.
//!
//! ```ignore
//! use retrace::prelude::*;
//!
//! let config = NavigatorConfig::from_env();
//! let mut nav = Navigator::from_config(my_host, &config)?;
//! // from the host's selection-changed handler:
//! nav.on_external_focus_changed();
//! // from a toolbar button:
//! nav.back();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use retrace_core::{
    ChordParseError, CommandBindings, FocusSnapshot, HandleResolver, HistoryCommand, HostFocus,
    KeyChord, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    NavButton, NavButtonSource, poll_nav_buttons,
};

#[cfg(feature = "tracing-json")]
pub use retrace_core::logging::init_json_logging;

// --- Runtime re-exports ----------------------------------------------------

pub use retrace_runtime::{
    BindingsConfig, BoundedHistory, ChangeNotifier, ConfigError, DEFAULT_CAPACITY, FocusHistory,
    HistoryList, HistoryRow, Navigator, NavigatorConfig, Subscription,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// A key chord string could not be parsed.
    Chord(ChordParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Chord(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Chord(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ChordParseError> for Error {
    fn from(err: ChordParseError) -> Self {
        Self::Chord(err)
    }
}

/// Standard result type for retrace APIs.
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        Error, FocusSnapshot, HandleResolver, HistoryCommand, HistoryList, HostFocus, KeyChord,
        Navigator, NavigatorConfig, Result,
    };

    pub use crate::{core, runtime};
}

pub use retrace_core as core;
pub use retrace_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_chord(text: &str) -> Result<KeyChord> {
        Ok(text.parse::<KeyChord>()?)
    }

    #[test]
    fn chord_errors_convert() {
        assert!(parse_chord("ctrl+left").is_ok());
        let err = parse_chord("hyper+left").unwrap_err();
        assert!(matches!(err, Error::Chord(ChordParseError::UnknownModifier(_))));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("hyper"));
    }

    #[test]
    fn config_errors_convert() {
        let mut config = NavigatorConfig::default();
        config.bindings.back = Some("ctrl+nope".to_string());
        let err: Error = config
            .command_bindings()
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Chord { .. })));
    }
}
