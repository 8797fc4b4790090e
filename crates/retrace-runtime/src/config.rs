#![forbid(unsafe_code)]

//! Navigator configuration.
//!
//! Captures the tunables of a [`Navigator`](crate::Navigator) as a single
//! [`NavigatorConfig`] that can be loaded from TOML, JSON, or the
//! environment at startup.
//!
//! # Loading
//!
//! ```toml
//! # retrace.toml
//! capacity = 30
//! mouse_buttons = false
//!
//! [bindings]
//! back = "alt+left"
//! forward = "alt+right"
//! clear = "ctrl+shift+delete"
//! ```
//!
//! ```rust,ignore
//! let config = NavigatorConfig::from_toml_file("retrace.toml")?;
//! let config = NavigatorConfig::from_json_str(json)?;
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `RETRACE_HISTORY_CAPACITY` | usize | 15 | Entries kept before eviction |
//! | `RETRACE_MOUSE_BUTTONS` | bool | true | Map mouse side buttons |
//!
//! # Defaults
//!
//! `NavigatorConfig::default()` reproduces the built-in behaviour: 15
//! entries, mouse side buttons on, Ctrl+Left / Ctrl+Right, Clear unbound.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use retrace_core::keybinding::{ChordParseError, CommandBindings, HistoryCommand, KeyChord};

use crate::history::DEFAULT_CAPACITY;

/// Smallest accepted history capacity.
pub const MIN_CAPACITY: usize = 1;

/// Largest accepted history capacity.
pub const MAX_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// NavigatorConfig
// ---------------------------------------------------------------------------

/// Tunables for a navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavigatorConfig {
    /// Entries kept before the oldest is evicted.
    pub capacity: usize,

    /// Whether the mouse side buttons drive Back/Forward.
    pub mouse_buttons: bool,

    /// Key chords per command.
    pub bindings: BindingsConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            mouse_buttons: true,
            bindings: BindingsConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Set the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable mouse side buttons.
    #[must_use]
    pub fn with_mouse_buttons(mut self, enabled: bool) -> Self {
        self.mouse_buttons = enabled;
        self
    }

    /// Load from a TOML string. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSer)
    }

    /// Start from defaults and apply environment overrides.
    ///
    /// Reads:
    /// - `RETRACE_HISTORY_CAPACITY`: entries kept before eviction
    /// - `RETRACE_MOUSE_BUTTONS`: `"1"`/`"true"` or `"0"`/`"false"`
    ///
    /// Unparsable values are ignored; the capacity is clamped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RETRACE_HISTORY_CAPACITY")
            && let Ok(capacity) = val.trim().parse::<usize>()
        {
            config.capacity = capacity;
        }

        if let Ok(val) = std::env::var("RETRACE_MOUSE_BUTTONS") {
            let val = val.trim();
            if val == "1" || val.eq_ignore_ascii_case("true") {
                config.mouse_buttons = true;
            } else if val == "0" || val.eq_ignore_ascii_case("false") {
                config.mouse_buttons = false;
            }
        }

        config.validated()
    }

    /// Clamp the capacity into `MIN_CAPACITY..=MAX_CAPACITY`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.capacity = self.capacity.clamp(MIN_CAPACITY, MAX_CAPACITY);
        self
    }

    /// List every problem with this configuration. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            errors.push(format!(
                "capacity must be in {MIN_CAPACITY}..={MAX_CAPACITY}, got {}",
                self.capacity
            ));
        }

        let mut seen: Vec<(KeyChord, HistoryCommand)> = Vec::new();
        for (cmd, raw) in self.bindings.entries() {
            let Some(raw) = raw else { continue };
            match raw.parse::<KeyChord>() {
                Ok(chord) => {
                    if let Some((_, other)) = seen.iter().find(|(c, _)| *c == chord) {
                        errors.push(format!(
                            "bindings.{}: chord {chord} already bound to {other}",
                            BindingsConfig::key_for(cmd)
                        ));
                    }
                    seen.push((chord, cmd));
                }
                Err(e) => errors.push(format!("bindings.{}: {e}", BindingsConfig::key_for(cmd))),
            }
        }

        errors
    }

    /// Build the binding table described by this configuration.
    pub fn command_bindings(&self) -> Result<CommandBindings, ConfigError> {
        let mut bindings = CommandBindings::empty().with_mouse_buttons(self.mouse_buttons);
        for (cmd, raw) in self.bindings.entries() {
            if let Some(raw) = raw {
                let chord = raw.parse::<KeyChord>().map_err(|source| ConfigError::Chord {
                    command: cmd,
                    source,
                })?;
                bindings.bind(cmd, chord);
            }
        }
        Ok(bindings)
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// Chord strings per command. `None` leaves the command unbound.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BindingsConfig {
    /// Chord for `History/Back`.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub back: Option<String>,
    /// Chord for `History/Forward`.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub forward: Option<String>,
    /// Chord for `History/Clear`.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub clear: Option<String>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        let chord = |cmd: HistoryCommand| cmd.default_chord().map(|c| c.to_string());
        Self {
            back: chord(HistoryCommand::Back),
            forward: chord(HistoryCommand::Forward),
            clear: chord(HistoryCommand::Clear),
        }
    }
}

impl BindingsConfig {
    fn entries(&self) -> [(HistoryCommand, Option<&str>); 3] {
        [
            (HistoryCommand::Back, self.back.as_deref()),
            (HistoryCommand::Forward, self.forward.as_deref()),
            (HistoryCommand::Clear, self.clear.as_deref()),
        ]
    }

    fn key_for(cmd: HistoryCommand) -> &'static str {
        match cmd {
            HistoryCommand::Back => "back",
            HistoryCommand::Forward => "forward",
            HistoryCommand::Clear => "clear",
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading or applying a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
    /// A binding string did not parse.
    Chord {
        /// Command whose binding failed.
        command: HistoryCommand,
        /// Parse failure.
        source: ChordParseError,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => write!(f, "TOML serialization error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
            Self::Chord { command, source } => write!(f, "binding for {command}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
            Self::Chord { source, .. } => Some(source),
        }
    }
}
