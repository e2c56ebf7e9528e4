// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The closed set of scalar value kinds the engine recognizes.
///
/// Every column and every expression result carries exactly one kind.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Bool,
	/// A 4-byte signed integer
	Int,
	/// An 8-byte signed integer
	Long,
	/// An 8-byte floating point
	Real,
	/// An arbitrary-precision decimal
	Decimal,
	/// A UTF-8 encoded text
	Utf8,
	/// A date and time value with nanosecond precision in UTC
	DateTime,
	/// A signed duration with nanosecond precision
	Timespan,
	/// A UUID
	Uuid,
	/// A dynamic, semi-structured value (JSON shaped)
	Any,
	/// Value is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(self, Type::Int | Type::Long | Type::Real | Type::Decimal)
	}

	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int | Type::Long)
	}

	pub fn is_bool(&self) -> bool {
		matches!(self, Type::Bool)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Type::DateTime | Type::Timespan)
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Type::Undefined)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Type::Bool => "bool",
			Type::Int => "int",
			Type::Long => "long",
			Type::Real => "real",
			Type::Decimal => "decimal",
			Type::Utf8 => "string",
			Type::DateTime => "datetime",
			Type::Timespan => "timespan",
			Type::Uuid => "guid",
			Type::Any => "dynamic",
			Type::Undefined => "null",
		};
		f.write_str(name)
	}
}
