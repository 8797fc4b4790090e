#![forbid(unsafe_code)]

//! Focus history navigator.
//!
//! [`Navigator`] owns a [`BoundedHistory`] of [`FocusSnapshot`]s and keeps it
//! in step with a [`HostFocus`] adapter:
//!
//! - the host reports every focus change through
//!   [`on_external_focus_changed`](Navigator::on_external_focus_changed);
//!   the navigator records it, or repositions onto the newest entry when the
//!   change merely re-picks it;
//! - [`back`](Navigator::back) / [`forward`](Navigator::forward) step through
//!   the history and write the landed snapshot back to the host, skipping and
//!   pruning entries whose item no longer resolves;
//! - every mutating operation fires one "history changed" notification.
//!
//! # Re-entrancy
//!
//! Writing a snapshot to the host makes the host raise its own focus-changed
//! notification. That change must not be recorded as new history, so the
//! navigator arms a one-shot suppression token when it writes, and the next
//! notification consumes it. The token is armed only when the host's focus
//! reads back different after the write. Hosts may normalise writes (a
//! destroyed item cannot take focus), so whether a write changes anything is
//! observed, never predicted; a token armed for a silent write would swallow
//! the next genuine change.
//!
//! ```text
//!   host focus change ──► on_external_focus_changed
//!                           │ token armed? ── yes ──► disarm, return
//!                           │ focus empty? ── yes ──► return
//!                           │ same as newest? ─ yes ─► reset cursor, re-apply
//!                           │ otherwise ─────────────► push
//!                           ▼
//!                     history changed ──► observers
//! ```
//!
//! # Invariants
//!
//! 1. The suppression token never survives more than one notification.
//! 2. Back/Forward terminate: each loop iteration either applies a snapshot,
//!    stops, or removes at least one empty entry.
//! 3. After pruning, the history holds no empty entry.

use std::fmt;

use retrace_core::event::{KeyEvent, MouseEvent};
use retrace_core::host::HostFocus;
use retrace_core::keybinding::{CommandBindings, HistoryCommand};
use retrace_core::nav_buttons::{NavButtonSource, poll_nav_buttons};
use retrace_core::snapshot::FocusSnapshot;
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, NavigatorConfig};
use crate::history::{BoundedHistory, DEFAULT_CAPACITY};
use crate::notify::{ChangeNotifier, Subscription};

/// History of snapshots over the handle type of adapter `A`.
pub type FocusHistory<A> =
    BoundedHistory<FocusSnapshot<<A as retrace_core::HandleResolver>::Handle>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

/// Focus history service.
///
/// Construct one per host session and hand it to the collaborators (list
/// panel, command dispatch) by reference.
pub struct Navigator<A: HostFocus> {
    host: A,
    history: FocusHistory<A>,
    suppress_next_change: bool,
    notifier: ChangeNotifier<FocusHistory<A>>,
    bindings: CommandBindings,
}

impl<A: HostFocus> fmt::Debug for Navigator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("history", &self.history)
            .field("suppress_next_change", &self.suppress_next_change)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl<A: HostFocus> Navigator<A> {
    /// Create a navigator with default capacity and bindings.
    #[must_use]
    pub fn new(host: A) -> Self {
        Self::with_capacity(host, DEFAULT_CAPACITY)
    }

    /// Create a navigator keeping at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(host: A, capacity: usize) -> Self {
        Self {
            host,
            history: BoundedHistory::new(capacity),
            suppress_next_change: false,
            notifier: ChangeNotifier::new(),
            bindings: CommandBindings::default(),
        }
    }

    /// Create a navigator from a configuration.
    pub fn from_config(host: A, config: &NavigatorConfig) -> Result<Self, ConfigError> {
        let bindings = config.command_bindings()?;
        let mut navigator = Self::with_capacity(host, config.capacity);
        navigator.bindings = bindings;
        Ok(navigator)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The host adapter.
    #[must_use]
    pub fn host(&self) -> &A {
        &self.host
    }

    /// Mutable access to the host adapter, for changes that originate
    /// outside the navigator.
    pub fn host_mut(&mut self) -> &mut A {
        &mut self.host
    }

    /// The recorded history.
    #[must_use]
    pub fn history(&self) -> &FocusHistory<A> {
        &self.history
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&FocusSnapshot<A::Handle>> {
        self.history.current()
    }

    /// Cursor position.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.history.current_index()
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of "history changed" notifications fired so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.notifier.revision()
    }

    /// Whether the next focus-change notification will be ignored.
    #[must_use]
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next_change
    }

    /// Active key and mouse bindings.
    #[must_use]
    pub fn bindings(&self) -> &CommandBindings {
        &self.bindings
    }

    /// Mutable access to the bindings.
    pub fn bindings_mut(&mut self) -> &mut CommandBindings {
        &mut self.bindings
    }

    /// Subscribe to "history changed". The callback sees the history after
    /// the change.
    pub fn subscribe(&mut self, callback: impl Fn(&FocusHistory<A>) + 'static) -> Subscription
    where
        A::Handle: 'static,
    {
        self.notifier.subscribe(callback)
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// Handle the host's focus-changed notification.
    pub fn on_external_focus_changed(&mut self) {
        if std::mem::take(&mut self.suppress_next_change) {
            debug!("focus change suppressed");
            return;
        }
        if self.host.focus_is_empty() {
            trace!("focus change ignored: nothing focused");
            return;
        }

        let snapshot = FocusSnapshot::capture(&self.host);
        if self.history.last() == Some(&snapshot) {
            let index = self.history.reset_cursor();
            debug!(?index, "re-picked newest entry, cursor reset");
            if let Some(newest) = self.history.current().cloned() {
                self.apply(&newest);
            }
        } else {
            debug!(snapshot = %snapshot, "push");
            self.history.push(snapshot);
        }
        self.fire_changed();
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Step to the previous valid snapshot. Returns `true` if one was applied.
    pub fn back(&mut self) -> bool {
        self.navigate(Direction::Back)
    }

    /// Step to the next valid snapshot. Returns `true` if one was applied.
    pub fn forward(&mut self) -> bool {
        self.navigate(Direction::Forward)
    }

    /// Move the cursor to `index` and apply that snapshot.
    ///
    /// Out-of-range indices are rejected: nothing changes, nothing fires, and
    /// `false` is returned.
    pub fn select_index(&mut self, index: usize) -> bool {
        if !self.history.set_cursor(index) {
            debug!(index, len = self.history.len(), "select_index out of range");
            return false;
        }
        if let Some(target) = self.history.current().cloned() {
            self.apply(&target);
        }
        self.fire_changed();
        true
    }

    /// Forget every recorded snapshot.
    pub fn clear(&mut self) {
        self.history.clear();
        debug!("history cleared");
        self.fire_changed();
    }

    /// Ignore the next focus-change notification.
    ///
    /// For collaborators that are about to move the host's focus themselves
    /// and do not want that move recorded.
    pub fn suppress_next_change(&mut self) {
        self.suppress_next_change = true;
    }

    /// Remove every snapshot whose item no longer resolves, keeping the
    /// cursor on the same entry (or the nearest older one). Returns the
    /// number removed; fires "history changed" when it is non-zero.
    pub fn prune_invalid_entries(&mut self) -> usize {
        let removed = self.prune();
        if removed > 0 {
            self.fire_changed();
        }
        removed
    }

    /// Run a named command. Returns `true` if it changed anything.
    pub fn execute(&mut self, command: HistoryCommand) -> bool {
        match command {
            HistoryCommand::Back => self.back(),
            HistoryCommand::Forward => self.forward(),
            HistoryCommand::Clear => {
                self.clear();
                true
            }
        }
    }

    /// Run the command bound to `event`, if any.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<HistoryCommand> {
        let command = self.bindings.resolve(event)?;
        self.execute(command);
        Some(command)
    }

    /// Run the command mapped to a mouse side button, if any.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Option<HistoryCommand> {
        let command = self.bindings.resolve_mouse(event)?;
        self.execute(command);
        Some(command)
    }

    /// Poll the navigation buttons once and run what they signal.
    ///
    /// Relies on the host coalescing notifications: when both buttons fire
    /// in one tick, both applications are answered by a single notification.
    pub fn tick<S>(&mut self, source: &mut S) -> Vec<HistoryCommand>
    where
        S: NavButtonSource + ?Sized,
    {
        if !self.bindings.mouse_buttons() {
            return Vec::new();
        }
        let commands = poll_nav_buttons(source);
        for command in &commands {
            self.execute(*command);
        }
        commands
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn navigate(&mut self, direction: Direction) -> bool {
        let mut pruned = false;
        loop {
            if self.history.is_empty() {
                trace!(?direction, "navigation on empty history");
                if pruned {
                    self.fire_changed();
                }
                return false;
            }

            let before = self.history.current_index();
            let landed = if self.host.focus_is_empty() {
                self.history.current().cloned()
            } else {
                match direction {
                    Direction::Back => self.history.previous().cloned(),
                    Direction::Forward => self.history.next().cloned(),
                }
            };
            let Some(target) = landed else {
                return false;
            };

            if target.is_empty(&self.host) {
                if self.history.current_index() != before {
                    match direction {
                        Direction::Back => self.history.next(),
                        Direction::Forward => self.history.previous(),
                    };
                }
                if self.prune() == 0 {
                    warn!(?direction, "landed on empty entry that could not be pruned");
                    return false;
                }
                pruned = true;
                continue;
            }

            self.apply(&target);
            self.fire_changed();
            return true;
        }
    }

    /// Write `snapshot` to the host. Arms the suppression token if the host's
    /// focus changed as a result.
    fn apply(&mut self, snapshot: &FocusSnapshot<A::Handle>) {
        if snapshot.restores_exactly(&self.host) {
            trace!("host already shows snapshot");
            return;
        }
        let before = FocusSnapshot::capture(&self.host);
        snapshot.apply_to(&mut self.host);
        if before.restores_exactly(&self.host) {
            debug!("host left focus unchanged, token not armed");
            return;
        }
        self.suppress_next_change = true;
    }

    fn prune(&mut self) -> usize {
        let Some(cursor) = self.history.current_index() else {
            return 0;
        };

        let mut kept = Vec::with_capacity(self.history.len());
        let mut removed = 0usize;
        let mut cursor_shift = 0usize;
        for (index, entry) in self.history.iter().enumerate().rev() {
            if entry.is_empty(&self.host) {
                removed += 1;
                if index <= cursor {
                    cursor_shift += 1;
                }
            } else {
                kept.push(entry.clone());
            }
        }
        if removed == 0 {
            return 0;
        }
        kept.reverse();

        let new_cursor = (!kept.is_empty()).then(|| cursor.saturating_sub(cursor_shift));
        debug!(removed, ?new_cursor, "pruned empty entries");
        self.history = BoundedHistory::rebuild_from(kept, new_cursor, self.history.capacity());
        removed
    }

    fn fire_changed(&mut self) {
        self.notifier.notify(&self.history);
    }
}
