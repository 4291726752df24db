/* src/holder/store/sub.rs */

use std::sync::Arc;

use super::super::{HoldError, Map, StoreEvent, Value};
use super::Store;

impl Store {
	/// Gets the mapping at `key` as a sub-store.
	///
	/// An absent key is first materialized with `default` (an empty mapping if
	/// `None`), so this read may fire a change event. A present value that is not
	/// a mapping yields `None` and a warning.
	///
	/// The sub-store writes through: every change to it stores its whole mapping
	/// back under `key` here, which in turn fires this store's change event. The
	/// link holds this store weakly and ends when either side is dropped.
	pub fn get_as_sub_store(&self, key: &str, default: impl Into<Option<Map>>) -> Option<Store> {
		let guard = self.inner.entries.lock();

		let value = match self.get(key) {
			Some(value) => value,
			None => {
				let value = Value::Map(default.into().unwrap_or_default());
				self.set(key, value.clone());
				value
			}
		};

		let result = match value {
			Value::Map(entries) => Some(self.link_sub_store(key, entries)),
			other => {
				log::warn!(
					"Getting key '{}' as sub-store fails for not being a mapping but a {}",
					key,
					other.type_name()
				);
				None
			}
		};
		drop(guard);
		result
	}

	/// Sets `key` to a snapshot of `sub`'s entries.
	pub fn set_as_sub_store(&self, key: &str, sub: &Store) {
		self.set(key, Value::Map(sub.get_all()));
	}

	/// Sets `key` to `value`, which must be a mapping.
	pub fn set_as_map(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		match value.into() {
			map @ Value::Map(_) => {
				self.set(key, map);
				Ok(())
			}
			other => Err(HoldError::TypeMismatch {
				key: key.to_string(),
				expected: "mapping",
				found: other.type_name(),
			}),
		}
	}

	fn link_sub_store(&self, key: &str, entries: Map) -> Store {
		let sub = Store::from_map(entries);
		let parent = Arc::downgrade(&self.inner);
		let child = Arc::downgrade(&sub.inner);
		let key = key.to_string();

		sub.inner.events.connect(move |event: &StoreEvent| {
			let (Some(parent), Some(child)) = (parent.upgrade(), child.upgrade()) else {
				return;
			};
			let parent = Store { inner: parent };
			let child = Store { inner: child };
			parent.merge_child(&key, &child, event);
		});
		sub
	}

	// Applies one child change to the mapping under `key`, leaving its other
	// entries as they are so sibling handles on the same key do not clobber
	// each other.
	fn merge_child(&self, key: &str, child: &Store, event: &StoreEvent) {
		let guard = self.inner.entries.lock();

		let mut entries = match self.get(key) {
			Some(Value::Map(entries)) => entries,
			_ => child.get_all(),
		};
		match event {
			StoreEvent::Changed { key: changed } => match child.get(changed) {
				Some(value) => {
					entries.insert(changed.clone(), value);
				}
				None => {
					entries.remove(changed);
				}
			},
			StoreEvent::Removed { key: removed } => {
				entries.remove(removed);
			}
		}
		self.set(key, Value::Map(entries));
		drop(guard);
	}
}

impl From<&Store> for Value {
	fn from(store: &Store) -> Self {
		Value::Map(store.get_all())
	}
}

impl From<Store> for Value {
	fn from(store: Store) -> Self {
		Value::from(&store)
	}
}
