/* src/controller/maintenance.rs */

use crate::holder::{Map, Value};

use super::DurableStore;

impl DurableStore {
	/// Removes every setting and deletes the file.
	///
	/// The save loop is stopped first and waited for, so a save already in
	/// flight cannot recreate the file afterwards. With `restart_after_erase`
	/// the store reloads (finding no file) and the loop starts again; without
	/// it, nothing is saved until [`shutdown`](DurableStore::shutdown) finds a
	/// new pending change.
	pub fn erase(&self, restart_after_erase: bool) {
		let inner = &self.inner;
		inner.debouncer.stop();

		log::info!("Wiping all settings in {:?}", inner.file.path());
		if let Err(e) = inner.remove_file() {
			log::error!("Unable to remove settings file: {}", e);
		}
		inner.store.replace_all(Map::new());
		inner.debouncer.disarm();

		if restart_after_erase {
			inner.load();
			if let Err(e) = inner.debouncer.start(inner) {
				log::error!("Unable to restart save thread for {:?}: {}", inner.file.path(), e);
			}
		}
	}

	/// Erases everything except `keys_to_backup`, then adds `settings_to_add`.
	///
	/// Backed-up keys that were absent come back as null. The result is saved
	/// immediately. Other threads may observe the intermediate states in memory,
	/// but only the final state is written by this call.
	pub fn backup_and_setup<K, I, S, V>(&self, keys_to_backup: &[K], settings_to_add: I)
	where
		K: AsRef<str>,
		I: IntoIterator<Item = (S, V)>,
		S: AsRef<str>,
		V: Into<Value>,
	{
		log::info!("Backing up keys...");
		let saved: Vec<(String, Value)> = keys_to_backup
			.iter()
			.map(|key| {
				let key = key.as_ref();
				(key.to_string(), self.get_or(key, Value::Null))
			})
			.collect();

		self.erase(true);

		log::info!("Restoring settings...");
		for (key, value) in saved {
			self.set(&key, value);
		}

		log::info!("Adding extra settings...");
		for (key, value) in settings_to_add {
			self.set(key.as_ref(), value);
		}
		self.force_save();
	}

	/// Stops the save loop and flushes once if a change is still pending.
	///
	/// A change whose background save failed counts as pending. Once nothing is
	/// pending, further calls do nothing. Called on drop.
	pub fn shutdown(&self) {
		self.inner.debouncer.finish(&*self.inner);
	}
}
