#![forbid(unsafe_code)]

//! List view model over the focus history.
//!
//! [`HistoryList`] caches one [`HistoryRow`] per recorded snapshot, newest
//! first, which is the order a history panel shows them in. It does not
//! render anything; a host UI reads [`entries`](HistoryList::entries) or
//! [`visible_rows`](HistoryList::visible_rows) and forwards clicks through
//! [`select_at`](HistoryList::select_at).
//!
//! ```text
//!  buffer (oldest first)        view (newest first)
//!  0: a                         0: c   <- view 0 = buffer len-1
//!  1: b   <- cursor             1: b * current
//!  2: c                         2: a
//! ```

use retrace_core::host::{HandleResolver, HostFocus};
use retrace_core::keybinding::HistoryCommand;
use retrace_core::snapshot::FocusSnapshot;
use tracing::debug;

use crate::history::BoundedHistory;
use crate::navigator::Navigator;

/// One row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow<H> {
    /// The recorded snapshot.
    pub snapshot: FocusSnapshot<H>,
    /// Whether the history cursor sits on this entry.
    pub is_current: bool,
    /// Whether the entry's item no longer resolves.
    pub is_stale: bool,
}

/// Cached rows plus the navigator revision they were built from.
#[derive(Debug, Clone)]
pub struct HistoryList<H> {
    rows: Vec<HistoryRow<H>>,
    revision: Option<u64>,
    show_stale: bool,
}

impl<H> Default for HistoryList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HistoryList<H> {
    /// An empty list that hides stale rows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            revision: None,
            show_stale: false,
        }
    }

    /// Show stale rows in [`visible_rows`](Self::visible_rows) too.
    #[must_use]
    pub fn with_show_stale(mut self, show: bool) -> Self {
        self.show_stale = show;
        self
    }

    /// Every cached row, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryRow<H>] {
        &self.rows
    }

    /// View index of the current row.
    #[must_use]
    pub fn cursor_index(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.is_current)
    }

    /// Rows a panel should draw. Stale rows are left out unless
    /// [`with_show_stale`](Self::with_show_stale) asked for them.
    pub fn visible_rows(&self) -> impl Iterator<Item = &HistoryRow<H>> {
        let show_stale = self.show_stale;
        self.rows.iter().filter(move |row| show_stale || !row.is_stale)
    }

    /// Navigator revision the rows were built from, if they came from one.
    #[must_use]
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Rebuild the rows from `history`, marking entries `resolver` no longer
    /// knows as stale.
    pub fn refresh<R>(&mut self, history: &BoundedHistory<FocusSnapshot<H>>, resolver: &R)
    where
        H: Clone,
        R: HandleResolver<Handle = H> + ?Sized,
    {
        let cursor = history.current_index();
        self.rows = history
            .iter()
            .enumerate()
            .rev()
            .map(|(index, snapshot)| HistoryRow {
                snapshot: snapshot.clone(),
                is_current: cursor == Some(index),
                is_stale: snapshot.is_empty(resolver),
            })
            .collect();
        self.revision = None;
    }

    /// Whether `navigator` has changed since the last [`sync`](Self::sync).
    #[must_use]
    pub fn needs_refresh<A>(&self, navigator: &Navigator<A>) -> bool
    where
        A: HostFocus<Handle = H>,
    {
        self.revision != Some(navigator.revision())
    }

    /// Rebuild from `navigator` if it changed. Returns `true` if it did.
    pub fn sync<A>(&mut self, navigator: &Navigator<A>) -> bool
    where
        H: Clone,
        A: HostFocus<Handle = H>,
    {
        if !self.needs_refresh(navigator) {
            return false;
        }
        self.refresh(navigator.history(), navigator.host());
        self.revision = Some(navigator.revision());
        true
    }

    /// Select the row at `view_index` (an index into
    /// [`entries`](Self::entries)) and apply it through the navigator.
    ///
    /// Returns `false` without touching the navigator when the index is out
    /// of range or the rows are older than the navigator.
    pub fn select_at<A>(&self, view_index: usize, navigator: &mut Navigator<A>) -> bool
    where
        A: HostFocus<Handle = H>,
    {
        if self.revision.is_some() && self.needs_refresh(navigator) {
            debug!(view_index, "selection on out-of-date history list ignored");
            return false;
        }
        let Some(index) = self
            .rows
            .len()
            .checked_sub(1)
            .and_then(|newest| newest.checked_sub(view_index))
        else {
            return false;
        };
        navigator.select_index(index)
    }

    /// Run one of the panel's buttons.
    pub fn execute<A>(&self, command: HistoryCommand, navigator: &mut Navigator<A>) -> bool
    where
        A: HostFocus<Handle = H>,
    {
        navigator.execute(command)
    }
}
