// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_core::expression::FunctionSymbol;
use tabulon_type::{Decimal, Fragment, Result, Value};

use crate::function::{Arity, ScalarFunction};

fn as_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Int(v) => Some(*v as f64),
		Value::Long(v) => Some(*v as f64),
		Value::Real(v) => Some(v.value()),
		Value::Decimal(v) => v.to_f64(),
		_ => None,
	}
}

/// `abs` keeps the kind of its argument.
pub(crate) struct Abs;

impl ScalarFunction for Abs {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Abs
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match &args[0] {
			Value::Int(v) => Value::int(v.wrapping_abs()),
			Value::Long(v) => Value::long(v.wrapping_abs()),
			Value::Real(v) => Value::real(v.value().abs()),
			Value::Decimal(v) => Value::Decimal(Decimal::new(v.inner().abs())),
			Value::Timespan(v) => Value::timespan(tabulon_type::Timespan::from_nanos(
				v.nanos().wrapping_abs(),
			)),
			_ => Value::Undefined,
		})
	}
}

pub(crate) struct Sqrt;

impl ScalarFunction for Sqrt {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Sqrt
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		Ok(match as_f64(&args[0]) {
			Some(v) => Value::real(v.sqrt()),
			None => Value::Undefined,
		})
	}
}

/// `round(value)` or `round(value, digits)`.
pub(crate) struct Round;

impl ScalarFunction for Round {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Round
	}

	fn arity(&self) -> Arity {
		Arity::Range(1, 2)
	}

	fn eval_scalar(&self, args: &[Value], _fragment: &Fragment) -> Result<Value> {
		let Some(value) = as_f64(&args[0]) else {
			return Ok(Value::Undefined);
		};
		let digits = match args.get(1) {
			None => 0,
			Some(Value::Int(v)) => *v as i64,
			Some(Value::Long(v)) => *v,
			Some(Value::Undefined) => return Ok(Value::Undefined),
			Some(_) => return Ok(Value::Undefined),
		};
		let factor = 10f64.powi(digits as i32);
		Ok(Value::real((value * factor).round() / factor))
	}
}

#[cfg(test)]
mod tests {
	use tabulon_type::{Fragment, Value};

	use super::{Abs, Round, Sqrt};
	use crate::function::ScalarFunction;

	#[test]
	fn abs_keeps_argument_kind() {
		let f = Fragment::none();
		assert_eq!(Abs.eval_scalar(&[Value::int(-3)], &f).unwrap(), Value::int(3));
		assert_eq!(Abs.eval_scalar(&[Value::long(-3)], &f).unwrap(), Value::long(3));
		assert_eq!(Abs.eval_scalar(&[Value::real(-0.5)], &f).unwrap(), Value::real(0.5));
		assert_eq!(Abs.eval_scalar(&[Value::Undefined], &f).unwrap(), Value::Undefined);
	}

	#[test]
	fn sqrt_widens_to_real() {
		let out = Sqrt.eval_scalar(&[Value::long(9)], &Fragment::none()).unwrap();
		assert_eq!(out, Value::real(3.0));
	}

	#[test]
	fn round_honors_digits() {
		let f = Fragment::none();
		assert_eq!(
			Round.eval_scalar(&[Value::real(2.567), Value::long(1)], &f).unwrap(),
			Value::real(2.6),
		);
		assert_eq!(Round.eval_scalar(&[Value::real(2.5)], &f).unwrap(), Value::real(3.0));
	}
}
