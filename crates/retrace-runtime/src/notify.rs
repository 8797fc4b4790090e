#![forbid(unsafe_code)]

//! "History changed" notification.
//!
//! # Design
//!
//! [`ChangeNotifier<T>`] stores subscribers as `Weak` callbacks and hands the
//! strong side back to the caller inside a [`Subscription`] guard. Dropping
//! the guard unsubscribes; dead entries are pruned lazily on the next
//! notification. Subscribers run in registration order and receive a shared
//! reference to the state that changed.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: a callback only ever sees `&T`, so it cannot
//!   mutate the history or call back into the navigator. Observers that want
//!   to react with navigation must defer it until the current call returns.
//! - **Subscriber leak**: guards kept alive forever keep their callbacks
//!   alive. Nothing else holds them.

use std::rc::{Rc, Weak};

use tracing::{debug, info_span};
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Single-threaded publish/subscribe hub for change events.
///
/// # Invariants
///
/// 1. `revision()` increments by exactly 1 on every `notify`.
/// 2. Live subscribers are called in registration order.
/// 3. Subscribers whose guard was dropped are never called again.
pub struct ChangeNotifier<T: ?Sized> {
    subscribers: Vec<CallbackWeak<T>>,
    revision: u64,
}

impl<T: ?Sized> std::fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("revision", &self.revision)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl<T: ?Sized> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ChangeNotifier<T> {
    /// Create a notifier with no subscribers at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            revision: 0,
        }
    }

    /// Number of notifications sent so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Bump the revision and call every live subscriber with `value`.
    pub fn notify(&mut self, value: &T) {
        self.revision += 1;
        self.subscribers.retain(|w| w.strong_count() > 0);
        let callbacks: Vec<CallbackRc<T>> =
            self.subscribers.iter().filter_map(Weak::upgrade).collect();

        if callbacks.is_empty() {
            return;
        }

        let start = Instant::now();
        let span = info_span!(
            "retrace.history_changed",
            revision = self.revision,
            subscribers = callbacks.len() as u64,
            duration_us = tracing::field::Empty
        );
        let _guard = span.enter();

        for cb in &callbacks {
            cb(value);
        }

        let duration_us = start.elapsed().as_micros() as u64;
        span.record("duration_us", duration_us);
        debug!(duration_us, "history observers notified");
    }
}

impl<T: ?Sized + 'static> ChangeNotifier<T> {
    /// Register `callback`. It stays registered while the returned guard
    /// lives.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it makes the callback unreachable: the strong `Rc` goes away and
/// the notifier's `Weak` fails to upgrade from then on.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn revision_counts_notifications() {
        let mut n: ChangeNotifier<u32> = ChangeNotifier::new();
        assert_eq!(n.revision(), 0);
        n.notify(&1);
        n.notify(&2);
        assert_eq!(n.revision(), 2);
    }

    #[test]
    fn subscribers_receive_value_in_order() {
        let mut n: ChangeNotifier<u32> = ChangeNotifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _s1 = n.subscribe(move |v| l1.borrow_mut().push(("first", *v)));
        let l2 = Rc::clone(&log);
        let _s2 = n.subscribe(move |v| l2.borrow_mut().push(("second", *v)));

        n.notify(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn dropped_subscription_stops_callbacks() {
        let mut n: ChangeNotifier<u32> = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = n.subscribe(move |_| h.set(h.get() + 1));

        n.notify(&0);
        drop(sub);
        n.notify(&0);

        assert_eq!(hits.get(), 1);
        assert_eq!(n.subscriber_count(), 0, "dead subscriber pruned on notify");
    }

    #[test]
    fn works_with_unsized_payload() {
        let mut n: ChangeNotifier<str> = ChangeNotifier::new();
        let seen = Rc::new(RefCell::new(String::new()));
        let s = Rc::clone(&seen);
        let _sub = n.subscribe(move |v: &str| s.borrow_mut().push_str(v));
        n.notify("hello");
        assert_eq!(&*seen.borrow(), "hello");
    }
}
