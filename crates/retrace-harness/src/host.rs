#![forbid(unsafe_code)]

//! In-memory host.

use std::collections::HashSet;

use retrace_core::host::{HandleResolver, HostFocus};
use tracing::trace;

/// Handle of a [`MockHost`] entity.
pub type EntityId = u32;

/// Entity store plus focus state.
///
/// Writes that leave the observable focus unchanged raise nothing; any number
/// of changing writes between two [`take_notification`](Self::take_notification)
/// calls raise one notification.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    alive: HashSet<EntityId>,
    next_id: EntityId,
    active: Option<EntityId>,
    selection: Vec<EntityId>,
    context: Option<EntityId>,
    pending: bool,
    raised: u64,
}

impl MockHost {
    /// An empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with `count` live entities, ids `0..count`.
    #[must_use]
    pub fn with_entities(count: u32) -> Self {
        let mut host = Self::new();
        for _ in 0..count {
            host.spawn();
        }
        host
    }

    /// Create a live entity.
    pub fn spawn(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    /// Destroy `id`. Destroying the focused entity clears focus, which the
    /// host reports like any other focus change.
    pub fn delete(&mut self, id: EntityId) -> bool {
        if !self.alive.remove(&id) {
            return false;
        }
        let before = self.observed();
        if self.active == Some(id) {
            self.active = None;
        }
        self.selection.retain(|item| *item != id);
        self.mark_if_changed(&before);
        true
    }

    /// The user picks `id` on their own.
    pub fn user_select(&mut self, id: EntityId) {
        self.user_select_many(&[id], None);
    }

    /// The user picks several entities; the first becomes the active one.
    pub fn user_select_many(&mut self, ids: &[EntityId], context: Option<EntityId>) {
        self.set_focus(ids.first(), context.as_ref());
        self.set_selected_items(ids);
    }

    /// The user clicks empty space.
    pub fn user_deselect(&mut self) {
        self.set_focus(None, None);
        self.set_selected_items(&[]);
    }

    /// Consume the pending notification, if any.
    pub fn take_notification(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a notification is waiting.
    #[must_use]
    pub fn has_pending_notification(&self) -> bool {
        self.pending
    }

    /// Notifications raised so far, coalesced ones counted once.
    #[must_use]
    pub fn notifications_raised(&self) -> u64 {
        self.raised
    }

    /// Number of live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.alive.len()
    }

    fn observed(&self) -> (Option<EntityId>, Vec<EntityId>, Option<EntityId>) {
        (self.active, self.selection.clone(), self.context)
    }

    fn mark_if_changed(&mut self, before: &(Option<EntityId>, Vec<EntityId>, Option<EntityId>)) {
        if *before == self.observed() {
            return;
        }
        if !self.pending {
            self.pending = true;
            self.raised += 1;
            trace!(raised = self.raised, "host focus changed");
        }
    }
}

impl HandleResolver for MockHost {
    type Handle = EntityId;

    fn is_alive(&self, handle: &EntityId) -> bool {
        self.alive.contains(handle)
    }
}

impl HostFocus for MockHost {
    fn active_item(&self) -> Option<EntityId> {
        self.active
    }

    fn selected_items(&self) -> Vec<EntityId> {
        self.selection.clone()
    }

    fn context(&self) -> Option<EntityId> {
        self.context
    }

    fn set_focus(&mut self, active: Option<&EntityId>, context: Option<&EntityId>) {
        let before = self.observed();
        // A destroyed entity cannot take focus.
        self.active = active.copied().filter(|id| self.alive.contains(id));
        self.context = context.copied();
        self.mark_if_changed(&before);
    }

    fn set_selected_items(&mut self, items: &[EntityId]) {
        let before = self.observed();
        self.selection = items.to_vec();
        self.mark_if_changed(&before);
    }
}
