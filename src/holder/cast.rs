/* src/holder/cast.rs */

//! Lenient conversions between [`Value`] variants.
//!
//! Reads fall back to a default when a conversion fails, writes reject it.
//! Both go through the functions here.

use std::fmt;
use std::sync::LazyLock;

use fancy_regex::Regex;

use super::Value;

/// Optional sign, digits, optional fraction, optional exponent.
static DECIMAL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("decimal number pattern is valid")
});

/// Strings that read as `false` regardless of case.
const FALSE_WORDS: [&str; 3] = ["no", "false", "0"];

/// The primitive a typed accessor converts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
	Int,
	Float,
	String,
	Boolean,
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Target::Int => "integer",
			Target::Float => "float",
			Target::String => "string",
			Target::Boolean => "boolean",
		})
	}
}

/// Converts `value` into the `target` variant, or `None` when it has no such form.
pub fn cast(value: &Value, target: Target) -> Option<Value> {
	match target {
		Target::Int => to_int(value).map(Value::Int),
		// NaN and infinities have no encoding in the settings file.
		Target::Float => to_float(value).filter(|x| x.is_finite()).map(Value::Float),
		Target::String => Some(Value::String(value.to_string())),
		Target::Boolean => Some(Value::Bool(to_bool(value))),
	}
}

pub fn to_int(value: &Value) -> Option<i64> {
	match value {
		Value::Bool(b) => Some(i64::from(*b)),
		Value::Int(i) => Some(*i),
		Value::Float(x) => truncate(*x),
		Value::String(s) => s.trim().parse().ok(),
		Value::Null | Value::List(_) | Value::Map(_) => None,
	}
}

pub fn to_float(value: &Value) -> Option<f64> {
	match value {
		Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
		Value::Int(i) => Some(*i as f64),
		Value::Float(x) => Some(*x),
		Value::String(s) => s.trim().parse().ok(),
		Value::Null | Value::List(_) | Value::Map(_) => None,
	}
}

/// Truth value of `value`. Every variant has one, so this never fails.
pub fn to_bool(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Int(i) => *i != 0,
		Value::Float(x) => *x != 0.0,
		Value::String(s) => string_to_bool(s),
		Value::List(items) => !items.is_empty(),
		Value::Map(map) => !map.is_empty(),
	}
}

fn string_to_bool(s: &str) -> bool {
	let lowered = s.to_lowercase();
	if FALSE_WORDS.contains(&lowered.as_str()) {
		return false;
	}
	if DECIMAL_NUMBER.is_match(s).unwrap_or(false) {
		// "0.5" is false: the number is truncated before the zero test.
		return s.parse::<f64>().ok().and_then(truncate).is_none_or(|i| i != 0);
	}
	true
}

fn truncate(x: f64) -> Option<i64> {
	if !x.is_finite() {
		return None;
	}
	let t = x.trunc();
	if t >= i64::MIN as f64 && t < i64::MAX as f64 {
		Some(t as i64)
	} else {
		None
	}
}
