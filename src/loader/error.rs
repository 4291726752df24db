/* src/loader/error.rs */

/// Core error type for the loader module.
#[derive(Debug, thiserror::Error)]
pub enum FmtError {
	/// Decoding error from format implementation.
	#[error("parse error: {0}")]
	ParseError(String),

	/// Encoding error from format implementation.
	#[error("render error: {0}")]
	RenderError(String),

	/// IO error from the file source.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}
