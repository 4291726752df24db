/* src/holder/store/replace.rs */

use super::super::Map;
use super::Store;

impl Store {
	/// Atomically replaces all entries without firing any event.
	///
	/// Used when state comes from disk rather than from a caller, so that
	/// loading or erasing never schedules a save on its own.
	pub(crate) fn replace_all(&self, entries: Map) -> Map {
		let guard = self.inner.entries.lock();
		guard.replace(entries)
	}
}
