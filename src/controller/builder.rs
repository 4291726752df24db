/* src/controller/builder.rs */

use std::path::PathBuf;
use std::time::Duration;

use crate::loader::FileSource;
use crate::loader::format::AnyFormat;
use crate::signal::Config;

use super::{DurableStore, PersistError};

/// Builder for [`DurableStore`].
///
/// `base_dir` and `file_name` are required. The format defaults to the one
/// matching the file extension, or JSON.
pub struct DurableStoreBuilder {
	base_dir: Option<PathBuf>,
	file_name: Option<PathBuf>,
	format: Option<AnyFormat>,
	config: Config,
}

impl DurableStoreBuilder {
	pub fn new() -> Self {
		Self {
			base_dir: None,
			file_name: None,
			format: None,
			config: Config::default(),
		}
	}

	/// Directory the file name is resolved under.
	pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
		self.base_dir = Some(base_dir.into());
		self
	}

	pub fn file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
		self.file_name = Some(file_name.into());
		self
	}

	pub fn format(mut self, format: AnyFormat) -> Self {
		self.format = Some(format);
		self
	}

	/// Minimum quiet time after the last change before saving.
	pub fn save_interval(mut self, interval: Duration) -> Self {
		self.config.interval = interval;
		self
	}

	/// Longest the save loop sleeps between checks.
	pub fn poll_interval(mut self, poll: Duration) -> Self {
		self.config.poll = poll;
		self
	}

	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	pub fn build(self) -> Result<DurableStore, PersistError> {
		let base_dir = self
			.base_dir
			.ok_or_else(|| PersistError::Builder("base_dir is required".to_string()))?;
		let file_name = self
			.file_name
			.ok_or_else(|| PersistError::Builder("file_name is required".to_string()))?;
		if file_name.as_os_str().is_empty() {
			return Err(PersistError::Builder("file_name must not be empty".to_string()));
		}
		if self.config.poll.is_zero() {
			return Err(PersistError::Builder("poll interval must be non-zero".to_string()));
		}

		let file = FileSource::resolve(base_dir, file_name);
		let format = self
			.format
			.or_else(|| AnyFormat::from_path(file.path()))
			.unwrap_or_default();

		DurableStore::open(file, format, self.config)
	}
}

impl Default for DurableStoreBuilder {
	fn default() -> Self {
		Self::new()
	}
}
