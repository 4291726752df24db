/* src/holder/store/typed.rs */

use super::super::cast::{self, Target};
use super::super::{HoldError, Value};
use super::Store;

impl Store {
	/// Gets the value at `key` as an integer, or `default` if absent, null or not convertible.
	pub fn get_as_int(&self, key: &str, default: impl Into<Option<i64>>) -> Option<i64> {
		self.get_as(key, Target::Int, default.into(), Value::as_i64)
	}

	/// Gets the value at `key` as a float, or `default` if absent, null or not convertible.
	pub fn get_as_float(&self, key: &str, default: impl Into<Option<f64>>) -> Option<f64> {
		self.get_as(key, Target::Float, default.into(), Value::as_f64)
	}

	/// Gets the value at `key` in its string form, or `default` if absent or null.
	pub fn get_as_string(&self, key: &str, default: impl Into<Option<String>>) -> Option<String> {
		self.get_as(key, Target::String, default.into(), |v| {
			v.as_str().map(str::to_string)
		})
	}

	/// Gets the truth value at `key`, or `default` if absent or null.
	///
	/// Strings reading `no`, `false` or `0` (any case) are false. Other strings
	/// that look like a decimal number are false when the number truncates to zero.
	/// Any other string is true.
	pub fn get_as_boolean(&self, key: &str, default: impl Into<Option<bool>>) -> Option<bool> {
		self.get_as(key, Target::Boolean, default.into(), Value::as_bool)
	}

	/// Gets the list at `key`, or `default` if absent or not a list.
	pub fn get_as_list(&self, key: &str, default: impl Into<Option<Vec<Value>>>) -> Option<Vec<Value>> {
		match self.get(key) {
			Some(Value::List(items)) => Some(items),
			Some(other) => {
				log::warn!(
					"Getting key '{}' as list fails for not being a list but a {}",
					key,
					other.type_name()
				);
				default.into()
			}
			None => default.into(),
		}
	}

	pub fn set_as_int(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		self.set_as(key, value.into(), Target::Int)
	}

	pub fn set_as_float(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		self.set_as(key, value.into(), Target::Float)
	}

	pub fn set_as_string(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		self.set_as(key, value.into(), Target::String)
	}

	pub fn set_as_boolean(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		self.set_as(key, value.into(), Target::Boolean)
	}

	/// Sets `key` to `value`, which must be a list.
	pub fn set_as_list(&self, key: &str, value: impl Into<Value>) -> Result<(), HoldError> {
		match value.into() {
			list @ Value::List(_) => {
				self.set(key, list);
				Ok(())
			}
			other => Err(HoldError::TypeMismatch {
				key: key.to_string(),
				expected: "list",
				found: other.type_name(),
			}),
		}
	}

	fn get_as<T>(
		&self,
		key: &str,
		target: Target,
		default: Option<T>,
		extract: impl Fn(&Value) -> Option<T>,
	) -> Option<T> {
		let value = match self.get(key) {
			None | Some(Value::Null) => return default,
			Some(value) => value,
		};
		match cast::cast(&value, target).as_ref().and_then(extract) {
			Some(converted) => Some(converted),
			None => {
				log::warn!("Cannot cast {} to type {}", value, target);
				default
			}
		}
	}

	// Writes must not silently change type intent, so a failed cast aborts the write.
	fn set_as(&self, key: &str, value: Value, target: Target) -> Result<(), HoldError> {
		let converted = cast::cast(&value, target).ok_or_else(|| HoldError::Cast {
			value: value.to_string(),
			target,
		})?;
		self.set(key, converted);
		Ok(())
	}
}
