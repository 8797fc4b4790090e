#![forbid(unsafe_code)]

//! Navigator driven over a [`MockHost`].

use retrace_core::event::KeyEvent;
use retrace_core::host::HostFocus;
use retrace_core::keybinding::HistoryCommand;
use retrace_core::nav_buttons::NavButtonSource;
use retrace_runtime::{Navigator, NavigatorConfig};
use tracing::warn;

use crate::host::{EntityId, MockHost};
use crate::ops::Op;

/// Notifications delivered per pump before the session gives up. A well
/// behaved navigator never needs more than one.
pub const DISPATCH_BUDGET: usize = 8;

/// A navigator plus the event loop that feeds it host notifications.
///
/// Every method that may change host focus delivers the resulting
/// notification before returning, so tests observe the settled state.
#[derive(Debug)]
pub struct Session {
    navigator: Navigator<MockHost>,
    pool: u32,
}

impl Session {
    /// A session over `entities` fresh entities with default settings.
    #[must_use]
    pub fn new(entities: u32) -> Self {
        Self {
            navigator: Navigator::new(MockHost::with_entities(entities)),
            pool: entities,
        }
    }

    /// A session keeping at most `capacity` snapshots.
    #[must_use]
    pub fn with_capacity(entities: u32, capacity: usize) -> Self {
        Self {
            navigator: Navigator::with_capacity(MockHost::with_entities(entities), capacity),
            pool: entities,
        }
    }

    /// A session built from `config`.
    pub fn from_config(
        entities: u32,
        config: &NavigatorConfig,
    ) -> Result<Self, retrace_runtime::ConfigError> {
        Ok(Self {
            navigator: Navigator::from_config(MockHost::with_entities(entities), config)?,
            pool: entities,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The navigator.
    #[must_use]
    pub fn navigator(&self) -> &Navigator<MockHost> {
        &self.navigator
    }

    /// Mutable navigator access. Call [`pump`](Self::pump) afterwards if the
    /// change can touch host focus.
    pub fn navigator_mut(&mut self) -> &mut Navigator<MockHost> {
        &mut self.navigator
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &MockHost {
        self.navigator.host()
    }

    /// The entity the host currently shows as active.
    #[must_use]
    pub fn focused(&self) -> Option<EntityId> {
        self.host().active_item()
    }

    /// Active items of the history, oldest first.
    #[must_use]
    pub fn recorded(&self) -> Vec<Option<EntityId>> {
        self.navigator
            .history()
            .iter()
            .map(|s| s.active_item().copied())
            .collect()
    }

    /// History-changed events fired so far.
    #[must_use]
    pub fn events(&self) -> u64 {
        self.navigator.revision()
    }

    // ------------------------------------------------------------------
    // Host side
    // ------------------------------------------------------------------

    /// Deliver pending host notifications to the navigator.
    ///
    /// Returns how many were delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while self.navigator.host_mut().take_notification() {
            if delivered == DISPATCH_BUDGET {
                warn!(delivered, "focus notifications did not settle");
                break;
            }
            self.navigator.on_external_focus_changed();
            delivered += 1;
        }
        delivered
    }

    /// The user selects `id`.
    pub fn click(&mut self, id: EntityId) {
        self.navigator.host_mut().user_select(id);
        self.pump();
    }

    /// The user selects `ids` within `context`.
    pub fn click_many(&mut self, ids: &[EntityId], context: Option<EntityId>) {
        self.navigator.host_mut().user_select_many(ids, context);
        self.pump();
    }

    /// The user clicks empty space.
    pub fn deselect(&mut self) {
        self.navigator.host_mut().user_deselect();
        self.pump();
    }

    /// Destroy `id`.
    pub fn delete(&mut self, id: EntityId) -> bool {
        let removed = self.navigator.host_mut().delete(id);
        self.pump();
        removed
    }

    // ------------------------------------------------------------------
    // Navigator side
    // ------------------------------------------------------------------

    /// History/Back.
    pub fn back(&mut self) -> bool {
        let applied = self.navigator.back();
        self.pump();
        applied
    }

    /// History/Forward.
    pub fn forward(&mut self) -> bool {
        let applied = self.navigator.forward();
        self.pump();
        applied
    }

    /// Select buffer index `index`.
    pub fn select_index(&mut self, index: usize) -> bool {
        let applied = self.navigator.select_index(index);
        self.pump();
        applied
    }

    /// Run a named command.
    pub fn execute(&mut self, command: HistoryCommand) -> bool {
        let changed = self.navigator.execute(command);
        self.pump();
        changed
    }

    /// Feed a key event through the bindings.
    pub fn key(&mut self, event: &KeyEvent) -> Option<HistoryCommand> {
        let command = self.navigator.handle_key(event);
        self.pump();
        command
    }

    /// Poll `buttons` once.
    pub fn tick<S>(&mut self, buttons: &mut S) -> Vec<HistoryCommand>
    where
        S: NavButtonSource + ?Sized,
    {
        let commands = self.navigator.tick(buttons);
        self.pump();
        commands
    }

    /// Replay one scripted step.
    pub fn apply(&mut self, op: Op) {
        let pool = self.pool.max(1);
        match op {
            Op::Click(i) => self.click(i % pool),
            Op::ClickPair(a, b) => self.click_many(&[a % pool, b % pool], None),
            Op::Deselect => self.deselect(),
            Op::Delete(i) => {
                self.delete(i % pool);
            }
            Op::Back => {
                self.back();
            }
            Op::Forward => {
                self.forward();
            }
            Op::SelectIndex(i) => {
                self.select_index(i);
            }
            Op::Clear => {
                self.execute(HistoryCommand::Clear);
            }
            Op::Prune => {
                self.navigator.prune_invalid_entries();
            }
        }
    }

    /// Check the structural invariants of the history. Returns a description
    /// of the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        let history = self.navigator.history();
        if history.len() > history.capacity() {
            return Err(format!(
                "len {} exceeds capacity {}",
                history.len(),
                history.capacity()
            ));
        }
        match history.current_index() {
            None if !history.is_empty() => {
                return Err(format!("no cursor with {} entries", history.len()));
            }
            Some(i) if i >= history.len() => {
                return Err(format!("cursor {i} out of range for {}", history.len()));
            }
            _ => {}
        }
        if self.host().has_pending_notification() {
            return Err("host notification left undelivered".to_string());
        }
        if self.navigator.is_suppressing() {
            return Err("suppression token left armed".to_string());
        }
        Ok(())
    }
}
