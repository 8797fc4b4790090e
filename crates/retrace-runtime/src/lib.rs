#![forbid(unsafe_code)]

//! Focus history runtime.
//!
//! - [`BoundedHistory`]: fixed-capacity, cursor-addressed history buffer.
//! - [`Navigator`]: records the host's focus changes and walks back and
//!   forward through them, pruning entries whose item has gone away.
//! - [`ChangeNotifier`]: the "history changed" event observers subscribe to.
//! - [`HistoryList`]: newest-first view model for a history panel.
//! - [`NavigatorConfig`]: capacity and bindings, loadable from TOML, JSON, or
//!   the environment.

pub mod config;
pub mod history;
pub mod history_list;
pub mod navigator;
pub mod notify;

pub use config::{BindingsConfig, ConfigError, NavigatorConfig};
pub use history::{BoundedHistory, DEFAULT_CAPACITY};
pub use history_list::{HistoryList, HistoryRow};
pub use navigator::{FocusHistory, Navigator};
pub use notify::{ChangeNotifier, Subscription};
