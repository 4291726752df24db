/* src/loader/format/json.rs */

use super::super::{FmtError, Format};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

/// JSON format using `serde_json`, rendered with four-space indentation.
pub struct Json;

impl Format for Json {
	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		serde_json::from_slice(input).map_err(|e| FmtError::ParseError(e.to_string()))
	}

	fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, FmtError> {
		let mut out = Vec::new();
		let mut serializer =
			serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
		value
			.serialize(&mut serializer)
			.map_err(|e| FmtError::RenderError(e.to_string()))?;
		Ok(out)
	}
}
