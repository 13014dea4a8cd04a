//! History binding contract and an in-memory implementation.
//!
//! The router never touches a browser directly. It reads the current
//! location, pushes or replaces entries, and listens for back/forward through
//! a [`HistoryBinding`]. [`MemoryHistory`] implements the contract with an
//! entry stack so the router runs, and is tested, off the browser.

use crate::error::HistoryError;
use crate::location::Location;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a registered popstate or click listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
	pub(crate) fn next() -> Self {
		Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// Callback fired when the user moves through history.
pub type PopStateCallback = Arc<dyn Fn() + Send + Sync>;

/// How a location was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry was pushed.
	Push,
	/// The current entry was replaced.
	Replace,
	/// Back/forward.
	Pop,
}

/// Browser history capabilities the router depends on.
pub trait HistoryBinding: Send + Sync {
	/// The location the browser is currently showing.
	fn current_location(&self) -> Location;

	/// Appends an entry after the current one, discarding forward entries.
	fn push_entry(&self, href: &str, state: &Value) -> Result<(), HistoryError>;

	/// Overwrites the current entry.
	fn replace_entry(&self, href: &str, state: &Value) -> Result<(), HistoryError>;

	/// Index of the current entry in the session history.
	fn position(&self) -> usize;

	/// Moves `delta` entries without touching the entry list, firing popstate
	/// like a user-initiated back/forward. Returns `false` if out of range.
	fn go(&self, delta: isize) -> bool;

	/// Registers a back/forward listener.
	fn on_pop_state(&self, callback: PopStateCallback) -> ListenerId;

	/// Removes a listener registered with [`on_pop_state`](Self::on_pop_state).
	fn remove_listener(&self, id: ListenerId) -> bool;

	/// Origin used to resolve relative targets and classify link clicks.
	fn origin(&self) -> Option<Url> {
		None
	}
}

/// One entry in a [`MemoryHistory`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	/// `path?search#hash` of the entry.
	pub href: String,
	/// State stored alongside the entry.
	pub state: Value,
}

impl HistoryEntry {
	fn new(href: &str, state: &Value) -> Self {
		Self {
			href: href.to_string(),
			state: state.clone(),
		}
	}

	fn location(&self) -> Location {
		Location::parse(&self.href).with_state(self.state.clone())
	}
}

struct MemoryState {
	entries: Vec<HistoryEntry>,
	index: usize,
	listeners: Vec<(ListenerId, PopStateCallback)>,
}

/// History backed by an in-process entry stack.
///
/// ```
/// use waypoint_router::{HistoryBinding, MemoryHistory};
///
/// let history = MemoryHistory::with_initial("/home");
/// history.push_entry("/about", &serde_json::Value::Null).unwrap();
/// assert!(history.back());
/// assert_eq!(history.current_location().pathname(), "/home");
/// ```
pub struct MemoryHistory {
	state: Mutex<MemoryState>,
	origin: Option<Url>,
	entry_limit: Option<usize>,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("MemoryHistory")
			.field("entries", &state.entries)
			.field("index", &state.index)
			.field("origin", &self.origin.as_ref().map(Url::as_str))
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHistory {
	/// Creates a history with a single `/` entry.
	pub fn new() -> Self {
		Self::with_initial("/")
	}

	/// Creates a history whose only entry is `href`.
	pub fn with_initial(href: &str) -> Self {
		Self {
			state: Mutex::new(MemoryState {
				entries: vec![HistoryEntry::new(href, &Value::Null)],
				index: 0,
				listeners: Vec::new(),
			}),
			origin: None,
			entry_limit: None,
		}
	}

	/// Sets the origin reported by [`HistoryBinding::origin`].
	pub fn with_origin(mut self, origin: &str) -> Result<Self, url::ParseError> {
		self.origin = Some(Url::parse(origin)?);
		Ok(self)
	}

	/// Rejects pushes that would grow the stack beyond `limit` entries.
	pub fn with_entry_limit(mut self, limit: usize) -> Self {
		self.entry_limit = Some(limit);
		self
	}

	/// All entries, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.state.lock().entries.clone()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.state.lock().entries.len()
	}

	/// Always `false`: a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		self.state.lock().entries.is_empty()
	}

	/// Index of the current entry.
	pub fn index(&self) -> usize {
		self.state.lock().index
	}

	/// Moves one entry back. Returns `false` at the oldest entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `false` at the newest entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries and fires popstate listeners.
	///
	/// Out-of-range moves and `go(0)` do nothing and return `false`.
	pub fn go(&self, delta: isize) -> bool {
		let listeners: Vec<PopStateCallback> = {
			let mut state = self.state.lock();
			let Some(target) = state.index.checked_add_signed(delta) else {
				return false;
			};
			if delta == 0 || target >= state.entries.len() {
				return false;
			}
			state.index = target;
			state
				.listeners
				.iter()
				.map(|(_, callback)| Arc::clone(callback))
				.collect()
		};

		// Listeners read the history back, so the lock is released first.
		for listener in listeners {
			listener();
		}
		true
	}
}

impl HistoryBinding for MemoryHistory {
	fn current_location(&self) -> Location {
		let state = self.state.lock();
		state.entries[state.index].location()
	}

	fn push_entry(&self, href: &str, entry_state: &Value) -> Result<(), HistoryError> {
		let mut state = self.state.lock();
		let kept = state.index + 1;
		if let Some(limit) = self.entry_limit {
			if kept >= limit {
				return Err(HistoryError::QuotaExceeded { limit });
			}
		}
		state.entries.truncate(kept);
		state.entries.push(HistoryEntry::new(href, entry_state));
		state.index = kept;
		Ok(())
	}

	fn replace_entry(&self, href: &str, entry_state: &Value) -> Result<(), HistoryError> {
		let mut state = self.state.lock();
		let index = state.index;
		state.entries[index] = HistoryEntry::new(href, entry_state);
		Ok(())
	}

	fn position(&self) -> usize {
		self.index()
	}

	fn go(&self, delta: isize) -> bool {
		MemoryHistory::go(self, delta)
	}

	fn on_pop_state(&self, callback: PopStateCallback) -> ListenerId {
		let id = ListenerId::next();
		self.state.lock().listeners.push((id, callback));
		id
	}

	fn remove_listener(&self, id: ListenerId) -> bool {
		let mut state = self.state.lock();
		let before = state.listeners.len();
		state.listeners.retain(|(existing, _)| *existing != id);
		state.listeners.len() != before
	}

	fn origin(&self) -> Option<Url> {
		self.origin.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::atomic::AtomicUsize;

	#[rstest]
	fn test_push_truncates_forward_entries() {
		// Arrange
		let history = MemoryHistory::with_initial("/a");
		history.push_entry("/b", &Value::Null).unwrap();
		history.push_entry("/c", &Value::Null).unwrap();
		assert!(history.back());
		assert!(history.back());

		// Act
		history.push_entry("/d", &Value::Null).unwrap();

		// Assert
		let hrefs: Vec<String> = history.entries().into_iter().map(|e| e.href).collect();
		assert_eq!(hrefs, vec!["/a", "/d"]);
		assert_eq!(history.index(), 1);
	}

	#[rstest]
	fn test_replace_keeps_length() {
		let history = MemoryHistory::with_initial("/a");
		history.replace_entry("/b?x=1", &json!({ "k": 1 })).unwrap();

		assert_eq!(history.len(), 1);
		let current = history.current_location();
		assert_eq!(current.href(), "/b?x=1");
		assert_eq!(current.state(), &json!({ "k": 1 }));
	}

	#[rstest]
	#[case(-1, false, 0)]
	#[case(0, false, 0)]
	#[case(1, true, 1)]
	#[case(2, true, 2)]
	#[case(3, false, 0)]
	fn test_go_bounds(#[case] delta: isize, #[case] moved: bool, #[case] index: usize) {
		let history = MemoryHistory::with_initial("/a");
		history.push_entry("/b", &Value::Null).unwrap();
		history.push_entry("/c", &Value::Null).unwrap();
		history.go(-2);

		assert_eq!(history.go(delta), moved);
		assert_eq!(history.index(), index);
	}

	#[rstest]
	fn test_binding_go_moves_without_truncating() {
		let history = MemoryHistory::with_initial("/a");
		history.push_entry("/b", &Value::Null).unwrap();
		history.push_entry("/c", &Value::Null).unwrap();
		let binding: &dyn HistoryBinding = &history;

		assert!(binding.go(-2));
		assert_eq!(binding.position(), 0);
		assert!(binding.go(1));

		assert_eq!(binding.current_location().pathname(), "/b");
		assert_eq!(history.len(), 3);
	}

	#[rstest]
	fn test_pop_state_listeners_fire_and_can_be_removed() {
		// Arrange
		let history = MemoryHistory::with_initial("/a");
		history.push_entry("/b", &Value::Null).unwrap();
		let fired = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&fired);
		let id = history.on_pop_state(Arc::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		}));

		// Act
		history.back();
		assert!(history.remove_listener(id));
		history.forward();

		// Assert
		assert_eq!(fired.load(Ordering::SeqCst), 1);
		assert!(!history.remove_listener(id));
	}

	#[rstest]
	fn test_entry_limit() {
		let history = MemoryHistory::with_initial("/a").with_entry_limit(2);
		history.push_entry("/b", &Value::Null).unwrap();

		let err = history.push_entry("/c", &Value::Null).unwrap_err();

		assert_eq!(err, HistoryError::QuotaExceeded { limit: 2 });
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_origin() {
		assert!(MemoryHistory::new().origin().is_none());
		let history = MemoryHistory::new().with_origin("https://app.example.com").unwrap();
		assert_eq!(history.origin().unwrap().host_str(), Some("app.example.com"));
	}
}
