#![forbid(unsafe_code)]

//! Core: focus snapshots, host adapter seams, and input bindings.
//!
//! # Role in retrace
//! `retrace-core` is the leaf layer. It defines what a recorded focus point
//! is ([`FocusSnapshot`]), how the history talks to the host application
//! ([`HostFocus`], [`HandleResolver`]), and the input vocabulary the host
//! forwards to the navigator (keys, mouse buttons, auxiliary navigation
//! buttons, and the named history commands they are bound to).
//!
//! # How it fits in the system
//! `retrace-runtime` owns the bounded history buffer and the navigator that
//! reconciles it against a [`HostFocus`] implementation. Nothing in this crate
//! holds state across calls except [`CommandBindings`].

pub mod event;
pub mod host;
pub mod keybinding;
pub mod logging;
pub mod nav_buttons;
pub mod snapshot;

pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use host::{HandleResolver, HostFocus};
pub use keybinding::{ChordParseError, CommandBindings, HistoryCommand, KeyChord};
pub use nav_buttons::{NavButton, NavButtonSource, poll_nav_buttons};
pub use snapshot::FocusSnapshot;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
