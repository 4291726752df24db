/* src/holder/store/write.rs */

use super::super::{StoreEvent, Value};
use super::Store;

impl Store {
	/// Sets `key` to `value`.
	///
	/// Fires one change event when the key is new or the value differs.
	/// Writing an equal value is a no-op.
	pub fn set(&self, key: &str, value: impl Into<Value>) {
		let value = value.into();
		let guard = self.inner.entries.lock();

		let changed = {
			let mut entries = guard.borrow_mut();
			match entries.get(key) {
				Some(existing) if *existing == value => false,
				_ => {
					entries.insert(key.to_string(), value);
					true
				}
			}
		};

		// The borrow is released before handlers run, so they may read or write back.
		if changed {
			self.emit(StoreEvent::Changed {
				key: key.to_string(),
			});
		}
		drop(guard);
	}

	/// Removes `key`. Returns false, and fires nothing, if it was absent.
	pub fn delete(&self, key: &str) -> bool {
		let guard = self.inner.entries.lock();
		let removed = guard.borrow_mut().remove(key).is_some();
		if removed {
			self.emit(StoreEvent::Removed {
				key: key.to_string(),
			});
		}
		drop(guard);
		removed
	}
}
