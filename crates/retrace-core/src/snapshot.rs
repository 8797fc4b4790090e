#![forbid(unsafe_code)]

//! Recorded focus points.
//!
//! A [`FocusSnapshot`] is taken from the host at the moment a focus change is
//! observed and is never mutated afterwards. It holds handles only; whether
//! it still points at something is answered by a [`HandleResolver`].
//!
//! # Equality
//!
//! Two snapshots are equal iff their `active_item` handles are equal. The
//! selection list and context do not take part, in either direction: `!=` is
//! the exact negation of `==`, and `Hash` agrees with `Eq`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::host::{HandleResolver, HostFocus};

/// One recorded focus point: a primary item, its co-selected items, and an
/// optional context.
#[derive(Clone)]
pub struct FocusSnapshot<H> {
    active_item: Option<H>,
    items: Vec<H>,
    context: Option<H>,
}

impl<H> FocusSnapshot<H> {
    /// Create a snapshot from explicit parts.
    #[must_use]
    pub fn new(active_item: Option<H>, items: Vec<H>, context: Option<H>) -> Self {
        Self {
            active_item,
            items,
            context,
        }
    }

    /// Snapshot of a single item with no context.
    #[must_use]
    pub fn single(item: H) -> Self
    where
        H: Clone,
    {
        Self::new(Some(item.clone()), vec![item], None)
    }

    /// Take a fresh reading of the host's current focus.
    #[must_use]
    pub fn capture<A>(host: &A) -> Self
    where
        A: HostFocus<Handle = H> + ?Sized,
    {
        Self::new(host.active_item(), host.selected_items(), host.context())
    }

    /// The primary focused item.
    #[must_use]
    pub fn active_item(&self) -> Option<&H> {
        self.active_item.as_ref()
    }

    /// The jointly selected items, in the order they were captured.
    #[must_use]
    pub fn items(&self) -> &[H] {
        &self.items
    }

    /// The secondary context handle.
    #[must_use]
    pub fn context(&self) -> Option<&H> {
        self.context.as_ref()
    }

    /// `true` iff the primary item is absent or no longer resolves.
    pub fn is_empty<R>(&self, resolver: &R) -> bool
    where
        R: HandleResolver<Handle = H> + ?Sized,
    {
        match &self.active_item {
            Some(active) => !resolver.is_alive(active),
            None => true,
        }
    }

    /// Whether the host already shows exactly this snapshot (active item,
    /// selected items, and context all match).
    pub fn restores_exactly<A>(&self, host: &A) -> bool
    where
        A: HostFocus<Handle = H> + ?Sized,
        H: PartialEq,
    {
        host.active_item().as_ref() == self.active_item.as_ref()
            && host.context().as_ref() == self.context.as_ref()
            && host.selected_items() == self.items
    }

    /// Write this snapshot back to the host.
    pub fn apply_to<A>(&self, host: &mut A)
    where
        A: HostFocus<Handle = H> + ?Sized,
    {
        host.set_focus(self.active_item.as_ref(), self.context.as_ref());
        host.set_selected_items(&self.items);
    }
}

impl<H: PartialEq> PartialEq for FocusSnapshot<H> {
    fn eq(&self, other: &Self) -> bool {
        self.active_item == other.active_item
    }
}

impl<H: Eq> Eq for FocusSnapshot<H> {}

impl<H: Hash> Hash for FocusSnapshot<H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.active_item.hash(state);
    }
}

impl<H: fmt::Debug> fmt::Debug for FocusSnapshot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSnapshot")
            .field("active_item", &self.active_item)
            .field("items", &self.items.len())
            .field("context", &self.context)
            .finish()
    }
}

impl<H: fmt::Debug> fmt::Display for FocusSnapshot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.active_item {
            Some(active) => write!(f, "{active:?}")?,
            None => f.write_str("<none>")?,
        }
        if self.items.len() > 1 {
            write!(f, " (+{})", self.items.len() - 1)?;
        }
        Ok(())
    }
}
