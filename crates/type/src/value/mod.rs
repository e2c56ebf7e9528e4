// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

pub mod decimal;
mod kind;
mod ordered_f64;
pub mod temporal;

pub use decimal::Decimal;
pub use kind::Type;
pub use ordered_f64::OrderedF64;
pub use temporal::{DateTime, Timespan};

/// A scalar value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Bool(bool),
	/// A 4-byte signed integer
	Int(i32),
	/// An 8-byte signed integer
	Long(i64),
	/// An 8-byte floating point
	Real(OrderedF64),
	/// An arbitrary-precision decimal
	Decimal(Decimal),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A date and time value with nanosecond precision in UTC
	DateTime(DateTime),
	/// A signed duration with nanosecond precision
	Timespan(Timespan),
	/// A UUID
	Uuid(uuid::Uuid),
	/// A dynamic, semi-structured value
	Any(Box<serde_json::Value>),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Bool(v.into())
	}

	pub fn int(v: impl Into<i32>) -> Self {
		Value::Int(v.into())
	}

	pub fn long(v: impl Into<i64>) -> Self {
		Value::Long(v.into())
	}

	pub fn real(v: impl Into<f64>) -> Self {
		Value::Real(OrderedF64::new(v.into()))
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn datetime(v: DateTime) -> Self {
		Value::DateTime(v)
	}

	pub fn timespan(v: Timespan) -> Self {
		Value::Timespan(v)
	}

	pub fn any(v: serde_json::Value) -> Self {
		Value::Any(Box::new(v))
	}

	pub fn kind(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Bool(_) => Type::Bool,
			Value::Int(_) => Type::Int,
			Value::Long(_) => Type::Long,
			Value::Real(_) => Type::Real,
			Value::Decimal(_) => Type::Decimal,
			Value::Utf8(_) => Type::Utf8,
			Value::DateTime(_) => Type::DateTime,
			Value::Timespan(_) => Type::Timespan,
			Value::Uuid(_) => Type::Uuid,
			Value::Any(_) => Type::Any,
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	/// Equality as used by grouping and join keys: undefined equals
	/// undefined, NaN is never equal to itself, strings compare ordinally,
	/// everything else structurally.
	pub fn semantic_eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Undefined, Value::Undefined) => true,
			(Value::Real(a), Value::Real(b)) => a.value() == b.value(),
			(a, b) => a == b,
		}
	}

	/// Hash consistent with `semantic_eq`: values that compare equal hash
	/// equally (0.0 and -0.0 collapse; NaN hashes to its bits but never
	/// compares equal, so it can never collide into an existing group).
	pub fn semantic_hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Value::Undefined => {}
			Value::Bool(v) => v.hash(state),
			Value::Int(v) => v.hash(state),
			Value::Long(v) => v.hash(state),
			Value::Real(v) => {
				let normalized = if v.value() == 0.0 {
					0.0f64
				} else {
					v.value()
				};
				normalized.to_bits().hash(state);
			}
			Value::Decimal(v) => v.hash(state),
			Value::Utf8(v) => v.hash(state),
			Value::DateTime(v) => v.hash(state),
			Value::Timespan(v) => v.hash(state),
			Value::Uuid(v) => v.hash(state),
			Value::Any(v) => v.to_string().hash(state),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("(null)"),
			Value::Bool(v) => Display::fmt(v, f),
			Value::Int(v) => Display::fmt(v, f),
			Value::Long(v) => Display::fmt(v, f),
			Value::Real(v) => Display::fmt(v, f),
			Value::Decimal(v) => Display::fmt(v, f),
			Value::Utf8(v) => f.write_str(v),
			Value::DateTime(v) => Display::fmt(v, f),
			Value::Timespan(v) => Display::fmt(v, f),
			Value::Uuid(v) => Display::fmt(v, f),
			Value::Any(v) => Display::fmt(v, f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind() {
		assert_eq!(Value::long(7).kind(), Type::Long);
		assert_eq!(Value::utf8("x").kind(), Type::Utf8);
		assert_eq!(Value::Undefined.kind(), Type::Undefined);
	}

	#[test]
	fn test_semantic_eq_undefined() {
		assert!(Value::Undefined.semantic_eq(&Value::Undefined));
		assert!(!Value::Undefined.semantic_eq(&Value::long(0)));
	}

	#[test]
	fn test_semantic_eq_nan() {
		let nan = Value::real(f64::NAN);
		assert!(!nan.semantic_eq(&nan.clone()));
		assert!(Value::real(0.0).semantic_eq(&Value::real(-0.0)));
	}

	#[test]
	fn test_display() {
		assert_eq!(Value::utf8("acd").to_string(), "acd");
		assert_eq!(Value::Undefined.to_string(), "(null)");
	}
}
