/* src/controller/error.rs */

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::FmtError;

/// Errors that can occur while persisting a [`DurableStore`](super::DurableStore).
///
/// Only construction surfaces these directly. Background saves, loads and
/// erases log them and carry on with the in-memory state.
#[derive(Debug, Error)]
pub enum PersistError {
	#[error("Format error: {0}")]
	Format(#[from] FmtError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("settings file {path:?} holds a {found}, not a mapping")]
	NotAMapping { path: PathBuf, found: &'static str },

	#[error("settings file {0:?} does not exist")]
	MissingFile(PathBuf),

	#[error("failed to start save thread: {0}")]
	Spawn(#[source] std::io::Error),

	#[error("Builder error: {0}")]
	Builder(String),
}
