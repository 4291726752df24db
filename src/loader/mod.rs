/* src/loader/mod.rs */

//!
//! Encoding of the settings tree and its on-disk file.
//!
//! - [`Format`] - encode/decode pair, see [`format`] for the implementations
//! - [`FileSource`] - reads the file and replaces it atomically

pub mod error;
pub mod format;
pub mod source;

pub use error::FmtError;
pub use source::FileSource;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Abstract format that converts between bytes and a structured object.
pub trait Format: Send + Sync {
	/// List of supported extensions or identifiers.
	fn extensions(&self) -> &'static [&'static str];

	/// Parse the raw bytes into the target type.
	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError>;

	/// Render the value into raw bytes.
	fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, FmtError>;
}
