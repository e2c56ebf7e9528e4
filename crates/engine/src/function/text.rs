// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_core::{BitVec, ColumnData, expression::FunctionSymbol};
use tabulon_type::{Fragment, Result, Type, Value};

use crate::function::{Arity, ScalarFunction};

/// `tostring` semantics, shared with `strcat`: null renders as the empty
/// string, everything else as its display form.
pub(crate) fn render_value(value: &Value) -> String {
	match value {
		Value::Undefined => String::new(),
		other => other.to_string(),
	}
}

pub(crate) struct Strlen;

impl ScalarFunction for Strlen {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Strlen
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Utf8(s) => Value::long(s.chars().count() as i64),
			_ => Value::Undefined,
		})
	}

	fn eval_columnar(
		&self,
		args: &[ColumnData],
		rows: usize,
		_result: Type,
		_fragment: &Fragment,
	) -> Result<ColumnData> {
		// Specialized over the string column to skip per-row boxing.
		match &args[0] {
			ColumnData::Utf8(values, validity) => Ok(ColumnData::Long(
				values.iter().map(|s| s.chars().count() as i64).collect(),
				validity.clone(),
			)),
			_ => Ok(ColumnData::Long(vec![0; rows], BitVec::new(rows, false))),
		}
	}
}

pub(crate) struct Strcat;

impl ScalarFunction for Strcat {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Strcat
	}

	fn arity(&self) -> Arity {
		Arity::AtLeast(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		let mut out = String::new();
		for arg in args {
			out.push_str(&render_value(arg));
		}
		Ok(Value::utf8(out))
	}
}

pub(crate) struct Toupper;

impl ScalarFunction for Toupper {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Toupper
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Utf8(s) => Value::utf8(s.to_uppercase()),
			_ => Value::Undefined,
		})
	}
}

pub(crate) struct Tolower;

impl ScalarFunction for Tolower {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Tolower
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Utf8(s) => Value::utf8(s.to_lowercase()),
			_ => Value::Undefined,
		})
	}
}

pub(crate) struct Isempty;

impl ScalarFunction for Isempty {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Isempty
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(Value::bool(match &args[0] {
			Value::Undefined => true,
			Value::Utf8(s) => s.is_empty(),
			_ => false,
		}))
	}
}

pub(crate) struct Tostring;

impl ScalarFunction for Tostring {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Tostring
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(Value::utf8(render_value(&args[0])))
	}
}

#[cfg(test)]
mod tests {
	use tabulon_core::expression::FunctionSymbol;
	use tabulon_type::{Fragment, Value};

	use crate::function::{ScalarFunction, registry};

	fn eval(symbol: FunctionSymbol, args: &[Value]) -> Value {
		registry()
			.get_scalar(symbol)
			.unwrap()
			.eval_scalar(args, &Fragment::none())
			.unwrap()
	}

	#[test]
	fn strlen_counts_chars_and_propagates_null() {
		assert_eq!(eval(FunctionSymbol::Strlen, &[Value::utf8("héllo")]), Value::long(5));
		assert_eq!(eval(FunctionSymbol::Strlen, &[Value::Undefined]), Value::Undefined);
	}

	#[test]
	fn strcat_skips_nulls() {
		let out = eval(
			FunctionSymbol::Strcat,
			&[Value::utf8("a"), Value::Undefined, Value::utf8("b")],
		);
		assert_eq!(out, Value::utf8("ab"));
	}

	#[test]
	fn tostring_renders_null_as_empty() {
		assert_eq!(eval(FunctionSymbol::Tostring, &[Value::Undefined]), Value::utf8(""));
		assert_eq!(eval(FunctionSymbol::Tostring, &[Value::long(42)]), Value::utf8("42"));
	}

	#[test]
	fn isempty_accepts_null_and_empty_string() {
		assert_eq!(eval(FunctionSymbol::Isempty, &[Value::Undefined]), Value::bool(true));
		assert_eq!(eval(FunctionSymbol::Isempty, &[Value::utf8("")]), Value::bool(true));
		assert_eq!(eval(FunctionSymbol::Isempty, &[Value::utf8("x")]), Value::bool(false));
	}
}
