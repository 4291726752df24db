/* tests/format_tests.rs */

use holdfast::holder::{Map, Value};
use holdfast::loader::format::{AnyFormat, Json};
use holdfast::loader::{FileSource, FmtError, Format};
use std::path::Path;

fn sample() -> Value {
	let mut nested = Map::new();
	nested.insert("enabled".to_string(), Value::Bool(true));
	let mut root = Map::new();
	root.insert("port".to_string(), Value::Int(8080));
	root.insert("ratio".to_string(), Value::Float(0.25));
	root.insert("name".to_string(), Value::from("demo"));
	root.insert("tags".to_string(), Value::from(vec!["a", "b"]));
	root.insert("unset".to_string(), Value::Null);
	root.insert("tls".to_string(), Value::Map(nested));
	Value::Map(root)
}

#[test]
fn test_json_render_is_indented_and_sorted() {
	let bytes = Json.render(&sample()).unwrap();
	let text = String::from_utf8(bytes).unwrap();

	assert!(text.contains("\n    \"name\": \"demo\""));
	let order: Vec<usize> = ["name", "port", "ratio", "tags", "tls", "unset"]
		.iter()
		.map(|key| text.find(&format!("\"{key}\"")).unwrap())
		.collect();
	assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_json_parse_preserves_types() {
	let bytes = Json.render(&sample()).unwrap();
	let parsed: Value = Json.parse(&bytes).unwrap();
	assert_eq!(parsed, sample());

	let whole: Value = Json.parse(b"{\"f\": 2.0, \"i\": 2}").unwrap();
	let whole = whole.into_map().unwrap();
	assert_eq!(whole.get("f"), Some(&Value::Float(2.0)));
	assert_eq!(whole.get("i"), Some(&Value::Int(2)));
}

#[test]
fn test_json_parse_error() {
	let err = Json.parse::<Value>(b"{not json").unwrap_err();
	assert!(matches!(err, FmtError::ParseError(_)));
}

#[test]
fn test_format_from_path() {
	assert_eq!(AnyFormat::from_path(Path::new("a/settings.json")), Some(AnyFormat::Json));
	assert_eq!(AnyFormat::from_path(Path::new("settings.JSON")), Some(AnyFormat::Json));
	assert_eq!(AnyFormat::from_path(Path::new("settings")), None);
	assert_eq!(AnyFormat::from_path(Path::new("settings.ini")), None);
	assert_eq!(AnyFormat::default(), AnyFormat::Json);
}

#[test]
fn test_value_display() {
	assert_eq!(Value::Null.to_string(), "null");
	assert_eq!(Value::Bool(false).to_string(), "false");
	assert_eq!(Value::Int(-7).to_string(), "-7");
	assert_eq!(Value::Float(2.0).to_string(), "2.0");
	assert_eq!(Value::Float(13.501).to_string(), "13.501");
	assert_eq!(Value::from("plain").to_string(), "plain");
	assert_eq!(Value::from(vec!["x"]).to_string(), "[\"x\"]");
}

#[test]
fn test_file_source_paths() {
	let source = FileSource::resolve("/var/lib/app", "prefs.json");
	assert_eq!(source.path(), Path::new("/var/lib/app/prefs.json"));
	assert_eq!(source.temp_path(), Path::new("/var/lib/app/prefs.json.new"));
}

#[test]
fn test_file_source_write_atomic() {
	let dir = tempfile::tempdir().unwrap();
	let source = FileSource::resolve(dir.path(), "sub/prefs.json");

	assert_eq!(source.read().unwrap(), None);
	assert!(!source.exists());

	source.write_atomic(b"first").unwrap();
	source.write_atomic(b"second").unwrap();
	assert_eq!(source.read().unwrap(), Some(b"second".to_vec()));
	assert!(!source.temp_path().exists());

	source.remove().unwrap();
	assert!(source.remove().is_err());
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_round_trip() {
	use holdfast::loader::format::Yaml;

	let bytes = Yaml.render(&sample()).unwrap();
	let parsed: Value = Yaml.parse(&bytes).unwrap();
	assert_eq!(parsed, sample());
	assert_eq!(AnyFormat::from_path(Path::new("settings.yml")), Some(AnyFormat::Yaml));
}
