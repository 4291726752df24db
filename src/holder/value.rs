/* src/holder/value.rs */

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

/// Nested mapping type. Keys stay sorted so encoded files are stable.
pub type Map = BTreeMap<String, Value>;

/// A dynamically-typed setting value.
///
/// Mirrors the tree of primitives a structured text format can hold. Cloning is
/// always a deep copy.
///
/// A non-finite `Float` is encoded as null by JSON and so does not survive a
/// save. It also never equals itself, so storing NaN with
/// [`Store::set`](super::Store::set) fires a change event every time. The
/// typed setters reject non-finite floats.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<Value>),
	Map(Map),
}

impl Value {
	/// Short name of the variant, used in log lines and errors.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Int(_) => "integer",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::List(_) => "list",
			Value::Map(_) => "mapping",
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&Vec<Value>> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	pub fn into_map(self) -> Option<Map> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}
}

macro_rules! from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Int(i64::from(value))
				}
			}
		)*
	};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::List(value.into_iter().map(Into::into).collect())
	}
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
	fn from(value: BTreeMap<String, V>) -> Self {
		Value::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
	}
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
	fn from(value: HashMap<String, V>) -> Self {
		Value::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Float(x) => write_float(f, *x),
			Value::String(s) => f.write_str(s),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write_nested(f, item)?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("{")?;
				for (i, (key, item)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key:?}: ")?;
					write_nested(f, item)?;
				}
				f.write_str("}")
			}
		}
	}
}

// Strings nested in containers are quoted, top-level strings are not.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
	match value {
		Value::String(s) => write!(f, "{s:?}"),
		other => write!(f, "{other}"),
	}
}

// A float always renders with a fractional part so it reads back as a float.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
	if x.is_nan() {
		return f.write_str("nan");
	}
	if x.is_infinite() {
		return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
	}
	let text = x.to_string();
	if text.contains(['.', 'e', 'E']) {
		f.write_str(&text)
	} else {
		write!(f, "{text}.0")
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(i) => serializer.serialize_i64(*i),
			Value::Float(x) => serializer.serialize_f64(*x),
			Value::String(s) => serializer.serialize_str(s),
			Value::List(items) => serializer.collect_seq(items),
			Value::Map(map) => serializer.collect_map(map),
		}
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a null, boolean, number, string, list or mapping")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
		Ok(Value::Int(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
		Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
		Ok(Value::Float(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
		Ok(Value::String(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
		Ok(Value::String(v))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::List(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
		let mut map = Map::new();
		while let Some((key, value)) = access.next_entry::<String, Value>()? {
			map.insert(key, value);
		}
		Ok(Value::Map(map))
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}
