/* src/holder/store/mod.rs */

mod read;
mod replace;
mod sub;
mod typed;
mod write;

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use super::{Map, StoreEvent};
use crate::signal::{Notifier, SubscriptionId};

/// Thread-safe settings store.
///
/// Every read hands out a deep copy, so callers can never reach into the
/// stored tree and bypass change notification. All access goes through one
/// reentrant lock; change events fire while it is held, which lets event
/// handlers read the store back on the same thread.
///
/// Cloning a `Store` yields another handle to the same entries.
#[derive(Clone)]
pub struct Store {
	pub(crate) inner: Arc<StoreInner>,
}

pub(crate) struct StoreInner {
	pub(crate) entries: ReentrantMutex<RefCell<Map>>,
	pub(crate) events: Notifier<StoreEvent>,
}

impl Store {
	/// Creates a new empty store.
	pub fn new() -> Self {
		Self::from_map(Map::new())
	}

	/// Creates a store holding `entries`.
	pub fn from_map(entries: Map) -> Self {
		Self {
			inner: Arc::new(StoreInner {
				entries: ReentrantMutex::new(RefCell::new(entries)),
				events: Notifier::new(),
			}),
		}
	}

	/// The notifier fired on every change. Use it to forward or weakly connect.
	pub fn on_change(&self) -> &Notifier<StoreEvent> {
		&self.inner.events
	}

	/// Subscribes `callback` to store change events.
	pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
	where
		F: Fn(&StoreEvent) + Send + Sync + 'static,
	{
		self.inner.events.connect(callback)
	}

	/// Removes a subscription. Returns false if it was already gone.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.inner.events.disconnect(id)
	}

	/// True if both handles refer to the same entries.
	pub fn ptr_eq(&self, other: &Store) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub(crate) fn emit(&self, event: StoreEvent) {
		self.inner.events.emit(&event);
	}
}

impl Default for Store {
	fn default() -> Self {
		Self::new()
	}
}

impl From<Map> for Store {
	fn from(entries: Map) -> Self {
		Self::from_map(entries)
	}
}

impl fmt::Debug for Store {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let guard = self.inner.entries.lock();
		let entries = guard.borrow();
		f.debug_struct("Store").field("entries", &*entries).finish()
	}
}
