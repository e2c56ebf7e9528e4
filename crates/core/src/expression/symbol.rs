// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	fmt::{Display, Formatter},
	sync::Arc,
};

use tabulon_type::{Error, Fragment, Result, Type};

use crate::table::TableSchema;

/// The result type the external type checker resolved for an expression.
///
/// The engine's own taxonomy is `Type`; `value_kind` is the mapping layer
/// between the two, used whenever a result schema is derived from the
/// typed syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSymbol {
	Bool,
	Int,
	Long,
	Real,
	Decimal,
	String,
	DateTime,
	Timespan,
	Guid,
	Dynamic,
	Null,
	Unknown,
	Tabular(Arc<TableSchema>),
}

impl TypeSymbol {
	/// Maps the resolved type into the engine's value-kind taxonomy.
	/// Tabular and unresolved types have no scalar kind; asking for one is
	/// a build-time error on the construct that carried the symbol.
	pub fn value_kind(&self, fragment: &Fragment) -> Result<Type> {
		match self {
			TypeSymbol::Bool => Ok(Type::Bool),
			TypeSymbol::Int => Ok(Type::Int),
			TypeSymbol::Long => Ok(Type::Long),
			TypeSymbol::Real => Ok(Type::Real),
			TypeSymbol::Decimal => Ok(Type::Decimal),
			TypeSymbol::String => Ok(Type::Utf8),
			TypeSymbol::DateTime => Ok(Type::DateTime),
			TypeSymbol::Timespan => Ok(Type::Timespan),
			TypeSymbol::Guid => Ok(Type::Uuid),
			TypeSymbol::Dynamic => Ok(Type::Any),
			TypeSymbol::Null => Ok(Type::Undefined),
			TypeSymbol::Unknown | TypeSymbol::Tabular(_) => Err(Error::UnsupportedExpression {
				kind: format!("expression of non-scalar type `{}`", self),
				fragment: fragment.clone(),
			}),
		}
	}

	pub fn from_kind(kind: Type) -> Self {
		match kind {
			Type::Bool => TypeSymbol::Bool,
			Type::Int => TypeSymbol::Int,
			Type::Long => TypeSymbol::Long,
			Type::Real => TypeSymbol::Real,
			Type::Decimal => TypeSymbol::Decimal,
			Type::Utf8 => TypeSymbol::String,
			Type::DateTime => TypeSymbol::DateTime,
			Type::Timespan => TypeSymbol::Timespan,
			Type::Uuid => TypeSymbol::Guid,
			Type::Any => TypeSymbol::Dynamic,
			Type::Undefined => TypeSymbol::Null,
		}
	}
}

impl Display for TypeSymbol {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TypeSymbol::Bool => f.write_str("bool"),
			TypeSymbol::Int => f.write_str("int"),
			TypeSymbol::Long => f.write_str("long"),
			TypeSymbol::Real => f.write_str("real"),
			TypeSymbol::Decimal => f.write_str("decimal"),
			TypeSymbol::String => f.write_str("string"),
			TypeSymbol::DateTime => f.write_str("datetime"),
			TypeSymbol::Timespan => f.write_str("timespan"),
			TypeSymbol::Guid => f.write_str("guid"),
			TypeSymbol::Dynamic => f.write_str("dynamic"),
			TypeSymbol::Null => f.write_str("null"),
			TypeSymbol::Unknown => f.write_str("unknown"),
			TypeSymbol::Tabular(schema) => write!(f, "table({})", schema),
		}
	}
}

/// Identity of a built-in function as resolved by the type checker.
///
/// The registry is keyed by this symbol, never by name string — overloads
/// are distinct symbols to the checker, and a rename cannot silently bind
/// to the wrong implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionSymbol {
	Strlen,
	Strcat,
	Toupper,
	Tolower,
	Abs,
	Sqrt,
	Round,
	Iff,
	Isnull,
	Isempty,
	Tostring,
	Toint,
	Todouble,
	Tolong,
	Count,
	Countif,
	Sum,
	Avg,
	Min,
	Max,
	Dcount,
}

impl FunctionSymbol {
	pub fn name(&self) -> &'static str {
		match self {
			FunctionSymbol::Strlen => "strlen",
			FunctionSymbol::Strcat => "strcat",
			FunctionSymbol::Toupper => "toupper",
			FunctionSymbol::Tolower => "tolower",
			FunctionSymbol::Abs => "abs",
			FunctionSymbol::Sqrt => "sqrt",
			FunctionSymbol::Round => "round",
			FunctionSymbol::Iff => "iff",
			FunctionSymbol::Isnull => "isnull",
			FunctionSymbol::Isempty => "isempty",
			FunctionSymbol::Tostring => "tostring",
			FunctionSymbol::Toint => "toint",
			FunctionSymbol::Todouble => "todouble",
			FunctionSymbol::Tolong => "tolong",
			FunctionSymbol::Count => "count",
			FunctionSymbol::Countif => "countif",
			FunctionSymbol::Sum => "sum",
			FunctionSymbol::Avg => "avg",
			FunctionSymbol::Min => "min",
			FunctionSymbol::Max => "max",
			FunctionSymbol::Dcount => "dcount",
		}
	}
}

impl Display for FunctionSymbol {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
