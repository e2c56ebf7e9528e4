// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_core::expression::FunctionSymbol;
use tabulon_type::{Error, Fragment, Result, Type, Value};

use crate::{
	evaluate::{EvalInput, Expr},
	function::{Arity, ScalarFunction},
};

pub(crate) struct Isnull;

impl ScalarFunction for Isnull {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Isnull
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(Value::bool(args[0].is_undefined()))
	}
}

/// `iff(condition, then, otherwise)`. A null condition yields null.
pub(crate) struct Iff;

impl ScalarFunction for Iff {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Iff
	}

	fn arity(&self) -> Arity {
		Arity::Exact(3)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Bool(true) => args[1].clone(),
			Value::Bool(false) => args[2].clone(),
			_ => Value::Undefined,
		})
	}
}

/// Lenient conversion: anything that does not convert becomes null.
pub(crate) struct Toint;

impl ScalarFunction for Toint {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Toint
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Int(v) => Value::int(*v),
			Value::Long(v) => i32::try_from(*v).map(Value::int).unwrap_or(Value::Undefined),
			Value::Real(v) => {
				let truncated = v.value().trunc();
				if truncated >= i32::MIN as f64 && truncated <= i32::MAX as f64 {
					Value::int(truncated as i32)
				} else {
					Value::Undefined
				}
			}
			Value::Utf8(s) => {
				s.trim().parse::<i32>().map(Value::int).unwrap_or(Value::Undefined)
			}
			Value::Bool(v) => Value::int(i32::from(*v)),
			_ => Value::Undefined,
		})
	}
}

/// Lenient conversion to real; failures become null.
pub(crate) struct Todouble;

impl ScalarFunction for Todouble {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Todouble
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Int(v) => Value::real(*v as f64),
			Value::Long(v) => Value::real(*v as f64),
			Value::Real(v) => Value::real(v.value()),
			Value::Decimal(v) => v.to_f64().map(Value::real).unwrap_or(Value::Undefined),
			Value::Utf8(s) => {
				s.trim().parse::<f64>().map(Value::real).unwrap_or(Value::Undefined)
			}
			_ => Value::Undefined,
		})
	}
}

/// Strict conversion to long: a non-convertible value is a data error
/// attributed to the offending argument, not a silent null.
pub(crate) struct Tolong;

impl ScalarFunction for Tolong {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Tolong
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], fragment: &Fragment) -> Result<Value> {
		match &args[0] {
			Value::Undefined => Ok(Value::Undefined),
			Value::Int(v) => Ok(Value::long(*v as i64)),
			Value::Long(v) => Ok(Value::long(*v)),
			Value::Real(v) => Ok(Value::long(v.value().trunc() as i64)),
			Value::Bool(v) => Ok(Value::long(i64::from(*v))),
			Value::Utf8(s) => {
				s.trim().parse::<i64>().map(Value::long).map_err(|_| Error::Conversion {
					value: s.clone(),
					target: Type::Long,
					fragment: fragment.clone(),
				})
			}
			other => Err(Error::Conversion {
				value: other.to_string(),
				target: Type::Long,
				fragment: fragment.clone(),
			}),
		}
	}

	/// Row convention override: evaluating the argument here lets a
	/// conversion failure carry the argument's own fragment.
	fn eval_row(&self, args: &[Expr], input: &EvalInput, _fragment: &Fragment) -> Result<Value> {
		let value = args[0].evaluate(input)?.into_scalar(args[0].node_name())?;
		self.eval_scalar(&[value], args[0].fragment())
	}
}

#[cfg(test)]
mod tests {
	use tabulon_type::{Error, Fragment, Value};

	use super::{Iff, Isnull, Todouble, Toint, Tolong};
	use crate::function::ScalarFunction;

	#[test]
	fn iff_selects_branch_and_nulls_on_null_condition() {
		let f = Fragment::none();
		let then = Value::utf8("yes");
		let otherwise = Value::utf8("no");
		assert_eq!(
			Iff.eval_scalar(&[Value::bool(true), then.clone(), otherwise.clone()], &f).unwrap(),
			then,
		);
		assert_eq!(
			Iff.eval_scalar(&[Value::bool(false), then.clone(), otherwise.clone()], &f).unwrap(),
			otherwise,
		);
		assert_eq!(
			Iff.eval_scalar(&[Value::Undefined, then, otherwise], &f).unwrap(),
			Value::Undefined,
		);
	}

	#[test]
	fn isnull_only_matches_undefined() {
		let f = Fragment::none();
		assert_eq!(Isnull.eval_scalar(&[Value::Undefined], &f).unwrap(), Value::bool(true));
		assert_eq!(Isnull.eval_scalar(&[Value::utf8("")], &f).unwrap(), Value::bool(false));
	}

	#[test]
	fn lenient_conversions_null_on_failure() {
		let f = Fragment::none();
		assert_eq!(Toint.eval_scalar(&[Value::utf8("12")], &f).unwrap(), Value::int(12));
		assert_eq!(Toint.eval_scalar(&[Value::utf8("twelve")], &f).unwrap(), Value::Undefined);
		assert_eq!(
			Todouble.eval_scalar(&[Value::utf8("2.5")], &f).unwrap(),
			Value::real(2.5),
		);
		assert_eq!(Todouble.eval_scalar(&[Value::utf8("x")], &f).unwrap(), Value::Undefined);
	}

	#[test]
	fn tolong_errors_on_bad_input() {
		let f = Fragment::none();
		assert_eq!(Tolong.eval_scalar(&[Value::utf8(" 7 ")], &f).unwrap(), Value::long(7));
		assert_eq!(Tolong.eval_scalar(&[Value::Undefined], &f).unwrap(), Value::Undefined);
		let err = Tolong.eval_scalar(&[Value::utf8("seven")], &f).unwrap_err();
		assert!(matches!(err, Error::Conversion { .. }));
	}
}
