//! The shared "current location" value.
//!
//! [`LocationStore`] holds one [`Location`] and an ordered list of
//! subscribers. Every [`set`](LocationStore::set) swaps the value and then
//! calls each subscriber once, in subscription order, before returning.
//! Nothing is batched or deduplicated: setting an equal value notifies again.
//!
//! A single reentrant lock spans the swap and the fan-out, so a subscriber
//! that reads the store from inside its callback sees the new value rather
//! than deadlocking.

use crate::location::Location;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle returned by [`LocationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&Location) + Send + Sync>;

struct Inner {
	value: Location,
	subscribers: Vec<(SubscriptionId, Subscriber)>,
}

/// Lock-guarded holder of the current location.
pub struct LocationStore {
	inner: ReentrantMutex<RefCell<Inner>>,
	next_id: AtomicU64,
}

impl fmt::Debug for LocationStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let guard = self.inner.lock();
		let inner = guard.borrow();
		f.debug_struct("LocationStore")
			.field("value", &inner.value)
			.field("subscribers", &inner.subscribers.len())
			.finish()
	}
}

impl Default for LocationStore {
	fn default() -> Self {
		Self::new(Location::default())
	}
}

impl LocationStore {
	/// Creates a store holding `initial`.
	pub fn new(initial: Location) -> Self {
		Self {
			inner: ReentrantMutex::new(RefCell::new(Inner {
				value: initial,
				subscribers: Vec::new(),
			})),
			next_id: AtomicU64::new(0),
		}
	}

	/// Returns a copy of the current location.
	pub fn get(&self) -> Location {
		self.inner.lock().borrow().value.clone()
	}

	/// Replaces the current location and notifies every subscriber.
	pub fn set(&self, location: Location) {
		let guard = self.inner.lock();
		let subscribers: Vec<Subscriber> = {
			let mut inner = guard.borrow_mut();
			inner.value = location.clone();
			inner
				.subscribers
				.iter()
				.map(|(_, subscriber)| Arc::clone(subscriber))
				.collect()
		};

		tracing::trace!(path = location.pathname(), subscribers = subscribers.len(), "location set");
		for subscriber in subscribers {
			subscriber(&location);
		}
	}

	/// Registers a callback invoked after every [`set`](Self::set).
	///
	/// The callback is not invoked for the current value.
	pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
	where
		F: Fn(&Location) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
		let guard = self.inner.lock();
		guard.borrow_mut().subscribers.push((id, Arc::new(subscriber)));
		id
	}

	/// Removes a subscriber. Returns `false` if the id was unknown.
	///
	/// Removing a subscriber during a notification pass does not stop the
	/// pass already in progress from calling it.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let guard = self.inner.lock();
		let mut inner = guard.borrow_mut();
		let before = inner.subscribers.len();
		inner.subscribers.retain(|(existing, _)| *existing != id);
		inner.subscribers.len() != before
	}

	/// Number of registered subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.lock().borrow().subscribers.len()
	}
}
