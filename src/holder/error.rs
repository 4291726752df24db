/* src/holder/error.rs */

use super::Target;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoldError {
	/// A typed write was given a value with no form in the target type.
	///
	/// The store is left untouched when this is returned.
	#[error("cannot set {value} as {target}")]
	Cast { value: String, target: Target },
	/// A container write was given a value of the wrong shape.
	#[error("cannot set key '{key}' as {expected}: got {found}")]
	TypeMismatch {
		key: String,
		expected: &'static str,
		found: &'static str,
	},
}
