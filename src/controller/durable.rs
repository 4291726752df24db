/* src/controller/durable.rs */

//!
//! A settings store saved to a single file.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::holder::{Map, Store, StoreEvent, Value};
use crate::loader::format::AnyFormat;
use crate::loader::{FileSource, Format};
use crate::signal::{Config, Debouncer, Persistable, Subscription};

use super::{DurableStoreBuilder, PersistError};

/// A [`Store`] whose changes are saved to one file.
///
/// Construction loads the file if present, starting empty when it is missing
/// or unreadable. Every change arms a debounced save; the file is rewritten at
/// most once per save interval, always through an atomic replace.
///
/// Call [`shutdown`](DurableStore::shutdown) before the process exits to flush
/// a change still waiting for its interval. Dropping the store does the same.
pub struct DurableStore {
	pub(super) inner: Arc<DurableInner>,
	_watch: Subscription<StoreEvent>,
}

pub(super) struct DurableInner {
	pub(super) store: Store,
	pub(super) file: FileSource,
	pub(super) format: AnyFormat,
	pub(super) debouncer: Debouncer,
}

impl DurableStore {
	pub fn builder() -> DurableStoreBuilder {
		DurableStoreBuilder::new()
	}

	/// Opens `file_name` under `base_dir`, saving at most once per `save_interval`.
	pub fn new(
		base_dir: impl AsRef<Path>,
		file_name: impl AsRef<Path>,
		save_interval: Duration,
	) -> Result<Self, PersistError> {
		Self::builder()
			.base_dir(base_dir.as_ref())
			.file_name(file_name.as_ref())
			.save_interval(save_interval)
			.build()
	}

	pub(super) fn open(file: FileSource, format: AnyFormat, config: Config) -> Result<Self, PersistError> {
		let inner = Arc::new(DurableInner {
			store: Store::new(),
			file,
			format,
			debouncer: Debouncer::new(config),
		});
		inner.load();

		let watch = inner.debouncer.watch(inner.store.on_change());
		inner.debouncer.start(&inner).map_err(PersistError::Spawn)?;

		Ok(Self {
			inner,
			_watch: watch,
		})
	}

	/// The in-memory store. Also reachable through `Deref`.
	pub fn store(&self) -> &Store {
		&self.inner.store
	}

	/// The fully resolved file path.
	pub fn path(&self) -> &Path {
		self.inner.file.path()
	}

	/// The staging file a save writes before renaming it over [`path`](DurableStore::path).
	pub fn temp_path(&self) -> PathBuf {
		self.inner.file.temp_path()
	}

	pub fn format(&self) -> AnyFormat {
		self.inner.format
	}

	pub fn config(&self) -> &Config {
		self.inner.debouncer.config()
	}

	/// When the pending save was last armed, if one is pending.
	pub fn pending_since(&self) -> Option<Instant> {
		self.inner.debouncer.armed_at()
	}

	/// True while the background save loop is running.
	pub fn is_running(&self) -> bool {
		self.inner.debouncer.is_running()
	}

	/// Saves now, outside the debounce window, and reports the outcome.
	pub fn try_save(&self) -> Result<(), PersistError> {
		self.inner.save()
	}

	/// Saves now, outside the debounce window.
	///
	/// Meant for right before an intentional restart. Failures are logged and
	/// leave a save pending, so the loop or [`shutdown`](DurableStore::shutdown)
	/// tries again.
	pub fn force_save(&self) {
		if !self.inner.flush() {
			self.inner.debouncer.arm();
		}
	}
}

impl Deref for DurableStore {
	type Target = Store;

	fn deref(&self) -> &Store {
		&self.inner.store
	}
}

impl AsRef<Store> for DurableStore {
	fn as_ref(&self) -> &Store {
		&self.inner.store
	}
}

impl Drop for DurableStore {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl DurableInner {
	/// Replaces the in-memory state with the file's, or with nothing.
	///
	/// A missing, unreadable or corrupt file is never fatal.
	pub(super) fn load(&self) {
		let entries = match self.read() {
			Ok(Some(entries)) => entries,
			Ok(None) => Map::new(),
			Err(e) => {
				log::warn!("Error reading preferences file {:?}: {}", self.file.path(), e);
				Map::new()
			}
		};
		self.store.replace_all(entries);
	}

	fn read(&self) -> Result<Option<Map>, PersistError> {
		let Some(bytes) = self.file.read()? else {
			return Ok(None);
		};
		log::info!("Reading preferences from {:?}", self.file.path());

		match self.format.parse::<Value>(&bytes)? {
			Value::Map(entries) => Ok(Some(entries)),
			other => Err(PersistError::NotAMapping {
				path: self.file.path().to_path_buf(),
				found: other.type_name(),
			}),
		}
	}

	pub(super) fn save(&self) -> Result<(), PersistError> {
		log::info!("Saving preferences to {:?}", self.file.path());
		// The snapshot is taken under the store lock; the I/O below runs without it.
		let snapshot = Value::Map(self.store.get_all());
		let bytes = self.format.render(&snapshot)?;
		self.file.write_atomic(&bytes)?;
		Ok(())
	}

	pub(super) fn remove_file(&self) -> Result<(), PersistError> {
		self.file.remove().map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => PersistError::MissingFile(self.file.path().to_path_buf()),
			_ => PersistError::Io(e),
		})
	}
}

impl Persistable for DurableInner {
	fn flush(&self) -> bool {
		match self.save() {
			Ok(()) => true,
			Err(e) => {
				log::error!("Error writing preferences {:?}: {}", self.file.path(), e);
				false
			}
		}
	}

	fn identify(&self) -> String {
		let name = self
			.file
			.path()
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		format!("{}: '{}'", env!("CARGO_PKG_NAME"), name)
	}
}
