/* src/loader/source/file.rs */

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::super::FmtError;

/// Suffix of the sibling file a save is staged in before it replaces the target.
pub const TEMP_SUFFIX: &str = ".new";

/// A single settings file, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileSource {
	path: PathBuf,
}

impl FileSource {
	/// Create a new FileSource for the file at `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Resolves `file_name` under `base_dir`. An absolute `file_name` is used as is.
	pub fn resolve(base_dir: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Self {
		Self::new(base_dir.as_ref().join(file_name))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The sibling `<path>.new` a write is staged in.
	pub fn temp_path(&self) -> PathBuf {
		let mut name = OsString::from(self.path.as_os_str());
		name.push(TEMP_SUFFIX);
		PathBuf::from(name)
	}

	pub fn exists(&self) -> bool {
		self.path.is_file()
	}

	/// Reads the whole file, or `None` if it does not exist.
	pub fn read(&self) -> Result<Option<Vec<u8>>, FmtError> {
		match fs::read(&self.path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(FmtError::Io(e)),
		}
	}

	/// Replaces the file with `contents` so that a crash at any point leaves
	/// either the old or the new file at `path`, never a partial one.
	///
	/// 1. Create the parent directory if needed.
	/// 2. Write `<path>.new` and fsync it.
	/// 3. Rename it over `path`.
	/// 4. Fsync the parent directory so the rename itself is durable.
	pub fn write_atomic(&self, contents: &[u8]) -> Result<(), FmtError> {
		let directory = self.directory();
		if !directory.as_os_str().is_empty() {
			fs::create_dir_all(directory)?;
		}

		let temp_path = self.temp_path();
		{
			let mut file = OpenOptions::new()
				.write(true)
				.create(true)
				.truncate(true)
				.open(&temp_path)?;
			file.write_all(contents)?;
			file.flush()?;
			file.sync_all()?;
		}

		fs::rename(&temp_path, &self.path)?;
		sync_directory(directory)?;
		Ok(())
	}

	/// Deletes the file.
	pub fn remove(&self) -> io::Result<()> {
		fs::remove_file(&self.path)
	}

	fn directory(&self) -> &Path {
		self.path.parent().unwrap_or(Path::new(""))
	}
}

#[cfg(unix)]
fn sync_directory(directory: &Path) -> io::Result<()> {
	let directory = if directory.as_os_str().is_empty() {
		Path::new(".")
	} else {
		directory
	};
	fs::File::open(directory)?.sync_all()
}

// Directories cannot be opened for syncing here; the rename is as durable as the platform makes it.
#[cfg(not(unix))]
fn sync_directory(_directory: &Path) -> io::Result<()> {
	Ok(())
}
