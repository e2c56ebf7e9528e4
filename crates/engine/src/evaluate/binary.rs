// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Binary operator kernels.
//!
//! `resolve_operator` is the static dispatch table: given an operator and
//! the two operand kinds it hands back the one kernel that implements the
//! pair, or `None` when the pair has no meaning. Resolution happens while
//! the expression tree is built; evaluation just runs the bound kernel.
//!
//! Every kernel takes two equal-length columns and produces a column.
//! Undefined slots propagate: a row where either operand is invalid yields
//! an invalid output slot, except for `and`/`or` which follow three-valued
//! logic.

use std::borrow::Cow;

use tabulon_core::{BitVec, ColumnData, expression::BinaryOp};
use tabulon_type::{DateTime, Decimal, Error, Result, Timespan, Type};

pub(crate) type Kernel = fn(&ColumnData, &ColumnData) -> Result<ColumnData>;

#[derive(Clone, Copy)]
pub(crate) struct BinaryOpImpl {
	pub result: Type,
	pub kernel: Kernel,
}

pub(crate) fn resolve_operator(op: BinaryOp, left: Type, right: Type) -> Option<BinaryOpImpl> {
	use BinaryOp::*;
	// A null operand takes on the other side's kind; the operand accessors
	// widen all-undefined columns into any working representation.
	let (left, right) = match (left, right) {
		(Type::Undefined, Type::Undefined) => return None,
		(Type::Undefined, other) | (other, Type::Undefined) => (other, other),
		pair => pair,
	};
	match op {
		Add | Subtract | Multiply | Divide => resolve_arithmetic(op, left, right),
		Equal | NotEqual | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
			resolve_comparison(op, left, right)
		}
		And | Or => resolve_logical(op, left, right),
		Contains | StartsWith | EndsWith => resolve_text(op, left, right),
	}
}

fn resolve_arithmetic(op: BinaryOp, left: Type, right: Type) -> Option<BinaryOpImpl> {
	use BinaryOp::*;
	use Type::*;
	let (result, kernel) = match (left, right) {
		(Int, Int) => (
			Int,
			match op {
				Add => int_add,
				Subtract => int_sub,
				Multiply => int_mul,
				Divide => int_div,
				_ => return None,
			},
		),
		(Int | Long, Int | Long) => (
			Long,
			match op {
				Add => long_add,
				Subtract => long_sub,
				Multiply => long_mul,
				Divide => long_div,
				_ => return None,
			},
		),
		(Int | Long | Real, Int | Long | Real) => (
			Real,
			match op {
				Add => real_add,
				Subtract => real_sub,
				Multiply => real_mul,
				Divide => real_div,
				_ => return None,
			},
		),
		(Decimal, Decimal | Int | Long) | (Int | Long, Decimal) => (
			Decimal,
			match op {
				Add => decimal_add,
				Subtract => decimal_sub,
				Multiply => decimal_mul,
				Divide => decimal_div,
				_ => return None,
			},
		),
		(DateTime, Timespan) => (
			DateTime,
			match op {
				Add => datetime_plus_timespan,
				Subtract => datetime_minus_timespan,
				_ => return None,
			},
		),
		(Timespan, DateTime) if op == Add => (DateTime, timespan_plus_datetime as Kernel),
		(DateTime, DateTime) if op == Subtract => (Timespan, datetime_minus_datetime as Kernel),
		(Timespan, Timespan) => (
			Timespan,
			match op {
				Add => timespan_add,
				Subtract => timespan_sub,
				_ => return None,
			},
		),
		_ => return None,
	};
	Some(BinaryOpImpl { result, kernel })
}

fn resolve_comparison(op: BinaryOp, left: Type, right: Type) -> Option<BinaryOpImpl> {
	use BinaryOp::*;
	use Type::*;
	let kernel = match (left, right) {
		(Int | Long, Int | Long) => match op {
			Equal => long_eq,
			NotEqual => long_ne,
			LessThan => long_lt,
			LessThanOrEqual => long_le,
			GreaterThan => long_gt,
			GreaterThanOrEqual => long_ge,
			_ => return None,
		},
		(Int | Long | Real | Decimal, Int | Long | Real | Decimal) => match op {
			Equal => real_eq,
			NotEqual => real_ne,
			LessThan => real_lt,
			LessThanOrEqual => real_le,
			GreaterThan => real_gt,
			GreaterThanOrEqual => real_ge,
			_ => return None,
		},
		(Utf8, Utf8) => match op {
			Equal => utf8_eq,
			NotEqual => utf8_ne,
			LessThan => utf8_lt,
			LessThanOrEqual => utf8_le,
			GreaterThan => utf8_gt,
			GreaterThanOrEqual => utf8_ge,
			_ => return None,
		},
		(DateTime, DateTime) => match op {
			Equal => datetime_eq,
			NotEqual => datetime_ne,
			LessThan => datetime_lt,
			LessThanOrEqual => datetime_le,
			GreaterThan => datetime_gt,
			GreaterThanOrEqual => datetime_ge,
			_ => return None,
		},
		(Timespan, Timespan) => match op {
			Equal => timespan_eq,
			NotEqual => timespan_ne,
			LessThan => timespan_lt,
			LessThanOrEqual => timespan_le,
			GreaterThan => timespan_gt,
			GreaterThanOrEqual => timespan_ge,
			_ => return None,
		},
		(Bool, Bool) => match op {
			Equal => bool_eq,
			NotEqual => bool_ne,
			_ => return None,
		},
		(Uuid, Uuid) => match op {
			Equal => uuid_eq,
			NotEqual => uuid_ne,
			_ => return None,
		},
		_ => return None,
	};
	Some(BinaryOpImpl { result: Type::Bool, kernel })
}

fn resolve_logical(op: BinaryOp, left: Type, right: Type) -> Option<BinaryOpImpl> {
	if left != Type::Bool || right != Type::Bool {
		return None;
	}
	let kernel = match op {
		BinaryOp::And => bool_and,
		BinaryOp::Or => bool_or,
		_ => return None,
	};
	Some(BinaryOpImpl { result: Type::Bool, kernel })
}

fn resolve_text(op: BinaryOp, left: Type, right: Type) -> Option<BinaryOpImpl> {
	if left != Type::Utf8 || right != Type::Utf8 {
		return None;
	}
	let kernel = match op {
		BinaryOp::Contains => utf8_contains,
		BinaryOp::StartsWith => utf8_startswith,
		BinaryOp::EndsWith => utf8_endswith,
		_ => return None,
	};
	Some(BinaryOpImpl { result: Type::Bool, kernel })
}

fn kind_mismatch() -> Error {
	Error::internal("binary kernel invoked with mismatched column kinds")
}

// Operand accessors. Each widens the column into the kernel's working
// representation; an `Undefined` column becomes an all-invalid column of
// the target representation.

fn int_parts(col: &ColumnData) -> Option<(Cow<'_, [i32]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Int(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => {
			Some((Cow::Owned(vec![0; *len]), Cow::Owned(BitVec::new(*len, false))))
		}
		_ => None,
	}
}

fn long_parts(col: &ColumnData) -> Option<(Cow<'_, [i64]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Long(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Int(values, validity) => Some((
			Cow::Owned(values.iter().map(|&v| v as i64).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Undefined(len) => {
			Some((Cow::Owned(vec![0; *len]), Cow::Owned(BitVec::new(*len, false))))
		}
		_ => None,
	}
}

fn real_parts(col: &ColumnData) -> Option<(Cow<'_, [f64]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Real(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Int(values, validity) => Some((
			Cow::Owned(values.iter().map(|&v| v as f64).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Long(values, validity) => Some((
			Cow::Owned(values.iter().map(|&v| v as f64).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Decimal(values, validity) => Some((
			Cow::Owned(values.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Undefined(len) => {
			Some((Cow::Owned(vec![0.0; *len]), Cow::Owned(BitVec::new(*len, false))))
		}
		_ => None,
	}
}

fn decimal_parts(col: &ColumnData) -> Option<(Cow<'_, [Decimal]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Decimal(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Int(values, validity) => Some((
			Cow::Owned(values.iter().map(|&v| Decimal::from_i64(v as i64)).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Long(values, validity) => Some((
			Cow::Owned(values.iter().map(|&v| Decimal::from_i64(v)).collect()),
			Cow::Borrowed(validity),
		)),
		ColumnData::Undefined(len) => Some((
			Cow::Owned(vec![Decimal::zero(); *len]),
			Cow::Owned(BitVec::new(*len, false)),
		)),
		_ => None,
	}
}

fn utf8_parts(col: &ColumnData) -> Option<(Cow<'_, [String]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Utf8(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => Some((
			Cow::Owned(vec![String::new(); *len]),
			Cow::Owned(BitVec::new(*len, false)),
		)),
		_ => None,
	}
}

fn bool_parts(col: &ColumnData) -> Option<(Cow<'_, [bool]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Bool(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => {
			Some((Cow::Owned(vec![false; *len]), Cow::Owned(BitVec::new(*len, false))))
		}
		_ => None,
	}
}

fn datetime_parts(col: &ColumnData) -> Option<(Cow<'_, [DateTime]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::DateTime(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => Some((
			Cow::Owned(vec![DateTime::from_nanos(0); *len]),
			Cow::Owned(BitVec::new(*len, false)),
		)),
		_ => None,
	}
}

fn timespan_parts(col: &ColumnData) -> Option<(Cow<'_, [Timespan]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Timespan(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => Some((
			Cow::Owned(vec![Timespan::from_nanos(0); *len]),
			Cow::Owned(BitVec::new(*len, false)),
		)),
		_ => None,
	}
}

fn uuid_parts(col: &ColumnData) -> Option<(Cow<'_, [uuid::Uuid]>, Cow<'_, BitVec>)> {
	match col {
		ColumnData::Uuid(values, validity) => {
			Some((Cow::Borrowed(values), Cow::Borrowed(validity)))
		}
		ColumnData::Undefined(len) => Some((
			Cow::Owned(vec![uuid::Uuid::nil(); *len]),
			Cow::Owned(BitVec::new(*len, false)),
		)),
		_ => None,
	}
}

/// A kernel producing a value column. The body yields `None` for a null
/// output slot (division by zero, say).
macro_rules! arith_kernel {
	($name:ident, $lparts:ident, $rparts:ident, $variant:ident, $zero:expr,
	 |$a:ident, $b:ident| $body:expr) => {
		fn $name(left: &ColumnData, right: &ColumnData) -> Result<ColumnData> {
			let (lv, lb) = $lparts(left).ok_or_else(kind_mismatch)?;
			let (rv, rb) = $rparts(right).ok_or_else(kind_mismatch)?;
			let n = lv.len();
			let mut values = Vec::with_capacity(n);
			let mut validity = BitVec::with_capacity(n);
			for i in 0..n {
				let slot = if lb.get(i) && rb.get(i) {
					let $a = lv[i].clone();
					let $b = rv[i].clone();
					$body
				} else {
					None
				};
				match slot {
					Some(v) => {
						values.push(v);
						validity.push(true);
					}
					None => {
						values.push($zero);
						validity.push(false);
					}
				}
			}
			Ok(ColumnData::$variant(values, validity))
		}
	};
}

/// A kernel producing a bool column; invalid inputs yield invalid slots.
macro_rules! compare_kernel {
	($name:ident, $parts:ident, |$a:ident, $b:ident| $body:expr) => {
		fn $name(left: &ColumnData, right: &ColumnData) -> Result<ColumnData> {
			let (lv, lb) = $parts(left).ok_or_else(kind_mismatch)?;
			let (rv, rb) = $parts(right).ok_or_else(kind_mismatch)?;
			let n = lv.len();
			let mut values = Vec::with_capacity(n);
			let mut validity = BitVec::with_capacity(n);
			for i in 0..n {
				let valid = lb.get(i) && rb.get(i);
				let $a = &lv[i];
				let $b = &rv[i];
				values.push(valid && $body);
				validity.push(valid);
			}
			Ok(ColumnData::Bool(values, validity))
		}
	};
}

arith_kernel!(int_add, int_parts, int_parts, Int, 0, |a, b| Some(a.wrapping_add(b)));
arith_kernel!(int_sub, int_parts, int_parts, Int, 0, |a, b| Some(a.wrapping_sub(b)));
arith_kernel!(int_mul, int_parts, int_parts, Int, 0, |a, b| Some(a.wrapping_mul(b)));
arith_kernel!(int_div, int_parts, int_parts, Int, 0, |a, b| {
	if b == 0 { None } else { Some(a.wrapping_div(b)) }
});

arith_kernel!(long_add, long_parts, long_parts, Long, 0, |a, b| Some(a.wrapping_add(b)));
arith_kernel!(long_sub, long_parts, long_parts, Long, 0, |a, b| Some(a.wrapping_sub(b)));
arith_kernel!(long_mul, long_parts, long_parts, Long, 0, |a, b| Some(a.wrapping_mul(b)));
arith_kernel!(long_div, long_parts, long_parts, Long, 0, |a, b| {
	if b == 0 { None } else { Some(a.wrapping_div(b)) }
});

arith_kernel!(real_add, real_parts, real_parts, Real, 0.0, |a, b| Some(a + b));
arith_kernel!(real_sub, real_parts, real_parts, Real, 0.0, |a, b| Some(a - b));
arith_kernel!(real_mul, real_parts, real_parts, Real, 0.0, |a, b| Some(a * b));
arith_kernel!(real_div, real_parts, real_parts, Real, 0.0, |a, b| Some(a / b));

arith_kernel!(decimal_add, decimal_parts, decimal_parts, Decimal, Decimal::zero(), |a, b| {
	Some(a + b)
});
arith_kernel!(decimal_sub, decimal_parts, decimal_parts, Decimal, Decimal::zero(), |a, b| {
	Some(a - b)
});
arith_kernel!(decimal_mul, decimal_parts, decimal_parts, Decimal, Decimal::zero(), |a, b| {
	Some(a * b)
});
arith_kernel!(decimal_div, decimal_parts, decimal_parts, Decimal, Decimal::zero(), |a, b| {
	if b == Decimal::zero() { None } else { Some(a / b) }
});

arith_kernel!(
	datetime_plus_timespan,
	datetime_parts,
	timespan_parts,
	DateTime,
	DateTime::from_nanos(0),
	|a, b| Some(a + b)
);
arith_kernel!(
	timespan_plus_datetime,
	timespan_parts,
	datetime_parts,
	DateTime,
	DateTime::from_nanos(0),
	|a, b| Some(b + a)
);
arith_kernel!(
	datetime_minus_timespan,
	datetime_parts,
	timespan_parts,
	DateTime,
	DateTime::from_nanos(0),
	|a, b| Some(a - b)
);
arith_kernel!(
	datetime_minus_datetime,
	datetime_parts,
	datetime_parts,
	Timespan,
	Timespan::from_nanos(0),
	|a, b| Some(a - b)
);
arith_kernel!(timespan_add, timespan_parts, timespan_parts, Timespan, Timespan::from_nanos(0), |a, b| {
	Some(a + b)
});
arith_kernel!(timespan_sub, timespan_parts, timespan_parts, Timespan, Timespan::from_nanos(0), |a, b| {
	Some(a - b)
});

compare_kernel!(long_eq, long_parts, |a, b| a == b);
compare_kernel!(long_ne, long_parts, |a, b| a != b);
compare_kernel!(long_lt, long_parts, |a, b| a < b);
compare_kernel!(long_le, long_parts, |a, b| a <= b);
compare_kernel!(long_gt, long_parts, |a, b| a > b);
compare_kernel!(long_ge, long_parts, |a, b| a >= b);

compare_kernel!(real_eq, real_parts, |a, b| a == b);
compare_kernel!(real_ne, real_parts, |a, b| a != b);
compare_kernel!(real_lt, real_parts, |a, b| a < b);
compare_kernel!(real_le, real_parts, |a, b| a <= b);
compare_kernel!(real_gt, real_parts, |a, b| a > b);
compare_kernel!(real_ge, real_parts, |a, b| a >= b);

compare_kernel!(utf8_eq, utf8_parts, |a, b| a == b);
compare_kernel!(utf8_ne, utf8_parts, |a, b| a != b);
compare_kernel!(utf8_lt, utf8_parts, |a, b| a < b);
compare_kernel!(utf8_le, utf8_parts, |a, b| a <= b);
compare_kernel!(utf8_gt, utf8_parts, |a, b| a > b);
compare_kernel!(utf8_ge, utf8_parts, |a, b| a >= b);

compare_kernel!(datetime_eq, datetime_parts, |a, b| a == b);
compare_kernel!(datetime_ne, datetime_parts, |a, b| a != b);
compare_kernel!(datetime_lt, datetime_parts, |a, b| a < b);
compare_kernel!(datetime_le, datetime_parts, |a, b| a <= b);
compare_kernel!(datetime_gt, datetime_parts, |a, b| a > b);
compare_kernel!(datetime_ge, datetime_parts, |a, b| a >= b);

compare_kernel!(timespan_eq, timespan_parts, |a, b| a == b);
compare_kernel!(timespan_ne, timespan_parts, |a, b| a != b);
compare_kernel!(timespan_lt, timespan_parts, |a, b| a < b);
compare_kernel!(timespan_le, timespan_parts, |a, b| a <= b);
compare_kernel!(timespan_gt, timespan_parts, |a, b| a > b);
compare_kernel!(timespan_ge, timespan_parts, |a, b| a >= b);

compare_kernel!(bool_eq, bool_parts, |a, b| a == b);
compare_kernel!(bool_ne, bool_parts, |a, b| a != b);

compare_kernel!(uuid_eq, uuid_parts, |a, b| a == b);
compare_kernel!(uuid_ne, uuid_parts, |a, b| a != b);

// The bare text operators are case-insensitive.
compare_kernel!(utf8_contains, utf8_parts, |a, b| {
	a.to_lowercase().contains(&b.to_lowercase())
});
compare_kernel!(utf8_startswith, utf8_parts, |a, b| {
	a.to_lowercase().starts_with(&b.to_lowercase())
});
compare_kernel!(utf8_endswith, utf8_parts, |a, b| {
	a.to_lowercase().ends_with(&b.to_lowercase())
});

// Three-valued logic: a known false short-circuits `and`, a known true
// short-circuits `or`, everything else involving null is null.
fn bool_and(left: &ColumnData, right: &ColumnData) -> Result<ColumnData> {
	let (lv, lb) = bool_parts(left).ok_or_else(kind_mismatch)?;
	let (rv, rb) = bool_parts(right).ok_or_else(kind_mismatch)?;
	let n = lv.len();
	let mut values = Vec::with_capacity(n);
	let mut validity = BitVec::with_capacity(n);
	for i in 0..n {
		let l = lb.get(i).then(|| lv[i]);
		let r = rb.get(i).then(|| rv[i]);
		let slot = match (l, r) {
			(Some(false), _) | (_, Some(false)) => Some(false),
			(Some(true), Some(true)) => Some(true),
			_ => None,
		};
		values.push(slot.unwrap_or(false));
		validity.push(slot.is_some());
	}
	Ok(ColumnData::Bool(values, validity))
}

fn bool_or(left: &ColumnData, right: &ColumnData) -> Result<ColumnData> {
	let (lv, lb) = bool_parts(left).ok_or_else(kind_mismatch)?;
	let (rv, rb) = bool_parts(right).ok_or_else(kind_mismatch)?;
	let n = lv.len();
	let mut values = Vec::with_capacity(n);
	let mut validity = BitVec::with_capacity(n);
	for i in 0..n {
		let l = lb.get(i).then(|| lv[i]);
		let r = rb.get(i).then(|| rv[i]);
		let slot = match (l, r) {
			(Some(true), _) | (_, Some(true)) => Some(true),
			(Some(false), Some(false)) => Some(false),
			_ => None,
		};
		values.push(slot.unwrap_or(false));
		validity.push(slot.is_some());
	}
	Ok(ColumnData::Bool(values, validity))
}

#[cfg(test)]
mod tests {
	use tabulon_core::{BitVec, ColumnData, expression::BinaryOp};
	use tabulon_type::{Type, Value};

	use super::resolve_operator;

	fn run(op: BinaryOp, left: &ColumnData, right: &ColumnData) -> ColumnData {
		let imp = resolve_operator(op, left.kind(), right.kind()).unwrap();
		(imp.kernel)(left, right).unwrap()
	}

	#[test]
	fn long_addition_propagates_nulls() {
		let left = ColumnData::Long(vec![1, 2, 3], BitVec::from_iter([true, false, true]));
		let right = ColumnData::long([10, 20, 30]);
		let out = run(BinaryOp::Add, &left, &right);
		assert_eq!(out.get(0), Value::long(11));
		assert_eq!(out.get(1), Value::Undefined);
		assert_eq!(out.get(2), Value::long(33));
	}

	#[test]
	fn int_and_long_widen_to_long() {
		let imp = resolve_operator(BinaryOp::Add, Type::Int, Type::Long).unwrap();
		assert_eq!(imp.result, Type::Long);
		let out = run(BinaryOp::Add, &ColumnData::int([7]), &ColumnData::long([1]));
		assert_eq!(out.get(0), Value::long(8));
	}

	#[test]
	fn integer_division_by_zero_is_null() {
		let out = run(BinaryOp::Divide, &ColumnData::long([10, 10]), &ColumnData::long([2, 0]));
		assert_eq!(out.get(0), Value::long(5));
		assert_eq!(out.get(1), Value::Undefined);
	}

	#[test]
	fn real_division_follows_ieee() {
		let out = run(BinaryOp::Divide, &ColumnData::real([1.0]), &ColumnData::real([0.0]));
		assert_eq!(out.get(0), Value::real(f64::INFINITY));
	}

	#[test]
	fn contains_is_case_insensitive() {
		let names = ColumnData::utf8(["Apple", "Berry"]);
		let needle = ColumnData::utf8(["APP", "APP"]);
		let out = run(BinaryOp::Contains, &names, &needle);
		assert_eq!(out.get(0), Value::bool(true));
		assert_eq!(out.get(1), Value::bool(false));
	}

	#[test]
	fn and_short_circuits_null() {
		let known_false = ColumnData::bool([false, true]);
		let null = ColumnData::Undefined(2);
		let out = run(BinaryOp::And, &known_false, &null);
		// false and null == false; true and null == null
		assert_eq!(out.get(0), Value::bool(false));
		assert_eq!(out.get(1), Value::Undefined);
	}

	#[test]
	fn or_short_circuits_null() {
		let known = ColumnData::bool([true, false]);
		let null = ColumnData::Undefined(2);
		let out = run(BinaryOp::Or, &known, &null);
		assert_eq!(out.get(0), Value::bool(true));
		assert_eq!(out.get(1), Value::Undefined);
	}

	#[test]
	fn comparison_with_null_is_null() {
		let left = ColumnData::Long(vec![1, 0], BitVec::from_iter([true, false]));
		let right = ColumnData::long([1, 1]);
		let out = run(BinaryOp::Equal, &left, &right);
		assert_eq!(out.get(0), Value::bool(true));
		assert_eq!(out.get(1), Value::Undefined);
	}

	#[test]
	fn unsupported_pairs_do_not_resolve() {
		assert!(resolve_operator(BinaryOp::Add, Type::Bool, Type::Bool).is_none());
		assert!(resolve_operator(BinaryOp::LessThan, Type::Uuid, Type::Uuid).is_none());
		assert!(resolve_operator(BinaryOp::Contains, Type::Long, Type::Utf8).is_none());
	}
}
