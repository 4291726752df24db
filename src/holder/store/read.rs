/* src/holder/store/read.rs */

use super::super::{Map, Value};
use super::Store;

impl Store {
	/// True if `key` is present. Never logs and never mutates.
	pub fn has(&self, key: &str) -> bool {
		let guard = self.inner.entries.lock();
		guard.borrow().contains_key(key)
	}

	/// Gets a deep copy of the value stored at `key`.
	pub fn get(&self, key: &str) -> Option<Value> {
		let guard = self.inner.entries.lock();
		guard.borrow().get(key).cloned()
	}

	/// Gets a deep copy of the value at `key`, or `default` if absent.
	pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
		self.get(key).unwrap_or_else(|| default.into())
	}

	/// Looks up several keys at once, in order. Absent keys yield `None`.
	pub fn get_values<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Option<Value>> {
		let guard = self.inner.entries.lock();
		let entries = guard.borrow();
		keys.iter().map(|key| entries.get(key.as_ref()).cloned()).collect()
	}

	/// Returns a deep copy of every entry.
	pub fn get_all(&self) -> Map {
		let guard = self.inner.entries.lock();
		guard.borrow().clone()
	}

	/// Returns all keys in the store, sorted.
	pub fn keys(&self) -> Vec<String> {
		let guard = self.inner.entries.lock();
		guard.borrow().keys().cloned().collect()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		let guard = self.inner.entries.lock();
		guard.borrow().len()
	}

	/// Returns true if the store is empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
