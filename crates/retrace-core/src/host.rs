#![forbid(unsafe_code)]

//! Host adapter seams.
//!
//! The history never owns the entities it records. It keeps opaque handles
//! and asks the host whether they still resolve, the same relation-plus-lookup
//! shape as a weak reference. [`HandleResolver`] is that lookup on its own;
//! [`HostFocus`] adds reading and writing the host's current focus.
//!
//! # Notification contract
//!
//! The host subscribes the navigator to its focus-changed notification. A
//! host implementation must:
//!
//! 1. raise a notification only when the observable focus (active item,
//!    selected items, or context) actually changed;
//! 2. coalesce the two writes of one snapshot application
//!    ([`set_focus`](HostFocus::set_focus) followed by
//!    [`set_selected_items`](HostFocus::set_selected_items)) into at most one
//!    notification;
//! 3. deliver that notification before any other focus change is processed.
//!
//! The navigator relies on (1) and (2) to keep its one-shot suppression token
//! from outliving the change it was armed for.

use std::fmt::Debug;
use std::hash::Hash;

/// Liveness lookup for host-owned entities.
pub trait HandleResolver {
    /// Opaque, stable identifier of a host entity. Equality and hashing must
    /// operate on the handle alone, never on the referenced entity.
    type Handle: Clone + Eq + Hash + Debug;

    /// Whether `handle` still resolves to a live entity.
    fn is_alive(&self, handle: &Self::Handle) -> bool;
}

impl<R: HandleResolver + ?Sized> HandleResolver for &R {
    type Handle = R::Handle;

    fn is_alive(&self, handle: &Self::Handle) -> bool {
        (**self).is_alive(handle)
    }
}

/// Read/write access to the host's current focus and multi-selection.
pub trait HostFocus: HandleResolver {
    /// The primary focused entity, if any.
    fn active_item(&self) -> Option<Self::Handle>;

    /// All jointly selected entities, in host order.
    fn selected_items(&self) -> Vec<Self::Handle>;

    /// Secondary identifier needed to re-apply focus (e.g. an owning container).
    fn context(&self) -> Option<Self::Handle>;

    /// Make `active` the primary focus within `context`.
    fn set_focus(&mut self, active: Option<&Self::Handle>, context: Option<&Self::Handle>);

    /// Replace the multi-selection.
    fn set_selected_items(&mut self, items: &[Self::Handle]);

    /// Whether the host currently has no live primary focus.
    fn focus_is_empty(&self) -> bool {
        match self.active_item() {
            Some(active) => !self.is_alive(&active),
            None => true,
        }
    }
}
