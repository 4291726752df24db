/* src/loader/format/mod.rs */

use std::path::Path;

use super::{FmtError, Format};
use serde::Serialize;
use serde::de::DeserializeOwned;

mod json;
pub use json::Json;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// An enum wrapper for all supported formats, enabling dynamic dispatch-like behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnyFormat {
	#[default]
	Json,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl AnyFormat {
	/// Every format compiled into this build.
	pub fn all() -> &'static [AnyFormat] {
		&[
			AnyFormat::Json,
			#[cfg(feature = "yaml")]
			AnyFormat::Yaml,
		]
	}

	/// Picks the format whose extensions include that of `path`.
	pub fn from_path(path: &Path) -> Option<AnyFormat> {
		let ext = path.extension()?.to_str()?.to_ascii_lowercase();
		Self::all()
			.iter()
			.copied()
			.find(|format| format.extensions().contains(&ext.as_str()))
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => Json.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
		}
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		match self {
			Self::Json => Json.parse(input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.parse(input),
		}
	}

	fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, FmtError> {
		match self {
			Self::Json => Json.render(value),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.render(value),
		}
	}
}
