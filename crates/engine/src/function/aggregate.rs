// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	collections::HashSet,
	hash::{Hash, Hasher},
};

use tabulon_core::{ColumnData, TableChunk, expression::FunctionSymbol};
use tabulon_type::{Error, Fragment, Result, Value};

use crate::{
	evaluate::Expr,
	function::{AggregateFunction, Arity},
};

fn argument_column(args: &[Expr], group: &TableChunk) -> Result<ColumnData> {
	args[0].evaluate_columnar(group)
}

pub(crate) struct Count;

impl AggregateFunction for Count {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Count
	}

	fn arity(&self) -> Arity {
		Arity::Exact(0)
	}

	fn eval_aggregate(
		&self,
		_args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		Ok(Value::long(group.row_count() as i64))
	}
}

pub(crate) struct Countif;

impl AggregateFunction for Countif {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Countif
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		fragment: &Fragment,
	) -> Result<Value> {
		match argument_column(args, group)? {
			ColumnData::Bool(values, validity) => {
				let count = values
					.iter()
					.enumerate()
					.filter(|&(i, &v)| v && validity.get(i))
					.count();
				Ok(Value::long(count as i64))
			}
			ColumnData::Undefined(_) => Ok(Value::long(0)),
			other => Err(Error::NonBooleanPredicate {
				found: other.kind(),
				fragment: fragment.clone(),
			}),
		}
	}
}

/// `sum` keeps the argument's kind; a group with no valid values sums to
/// null.
pub(crate) struct Sum;

impl AggregateFunction for Sum {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Sum
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		let mut acc: Option<Value> = None;
		for value in argument_column(args, group)?.iter() {
			if value.is_undefined() {
				continue;
			}
			acc = Some(match acc {
				None => value,
				Some(prev) => match (prev, value) {
					(Value::Int(a), Value::Int(b)) => Value::int(a.wrapping_add(b)),
					(Value::Long(a), Value::Long(b)) => Value::long(a.wrapping_add(b)),
					(Value::Real(a), Value::Real(b)) => Value::real(a.value() + b.value()),
					(Value::Decimal(a), Value::Decimal(b)) => Value::Decimal(a + b),
					(Value::Timespan(a), Value::Timespan(b)) => Value::timespan(a + b),
					(a, b) => {
						return Err(Error::internal(format!(
							"sum over mixed kinds {} and {}",
							a.kind(),
							b.kind(),
						)));
					}
				},
			});
		}
		Ok(acc.unwrap_or(Value::Undefined))
	}
}

/// `avg` is always real; nulls are skipped, an all-null group averages to
/// null.
pub(crate) struct Avg;

impl AggregateFunction for Avg {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Avg
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		let mut sum = 0.0;
		let mut count = 0usize;
		for value in argument_column(args, group)?.iter() {
			let v = match value {
				Value::Int(v) => v as f64,
				Value::Long(v) => v as f64,
				Value::Real(v) => v.value(),
				Value::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
				Value::Undefined => continue,
				other => {
					return Err(Error::internal(format!(
						"avg over non-numeric kind {}",
						other.kind(),
					)));
				}
			};
			sum += v;
			count += 1;
		}
		if count == 0 {
			Ok(Value::Undefined)
		} else {
			Ok(Value::real(sum / count as f64))
		}
	}
}

fn fold_extreme(
	args: &[Expr],
	group: &TableChunk,
	keep_left: impl Fn(&Value, &Value) -> bool,
) -> Result<Value> {
	let mut acc: Option<Value> = None;
	for value in argument_column(args, group)?.iter() {
		if value.is_undefined() {
			continue;
		}
		acc = Some(match acc {
			None => value,
			Some(prev) => {
				if keep_left(&prev, &value) {
					prev
				} else {
					value
				}
			}
		});
	}
	Ok(acc.unwrap_or(Value::Undefined))
}

/// Natural ordering of two same-kind values; reals use total order so NaN
/// sorts above every number.
fn ordered_le(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Int(a), Value::Int(b)) => a <= b,
		(Value::Long(a), Value::Long(b)) => a <= b,
		(Value::Real(a), Value::Real(b)) => a <= b,
		(Value::Decimal(a), Value::Decimal(b)) => a <= b,
		(Value::Utf8(a), Value::Utf8(b)) => a <= b,
		(Value::DateTime(a), Value::DateTime(b)) => a <= b,
		(Value::Timespan(a), Value::Timespan(b)) => a <= b,
		_ => true,
	}
}

pub(crate) struct Min;

impl AggregateFunction for Min {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Min
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		fold_extreme(args, group, |prev, next| ordered_le(prev, next))
	}
}

pub(crate) struct Max;

impl AggregateFunction for Max {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Max
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		fold_extreme(args, group, |prev, next| !ordered_le(prev, next))
	}
}

/// Exact distinct count of non-null values.
pub(crate) struct Dcount;

struct DistinctKey(Value);

impl PartialEq for DistinctKey {
	fn eq(&self, other: &Self) -> bool {
		self.0.semantic_eq(&other.0)
	}
}

impl Eq for DistinctKey {}

impl Hash for DistinctKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.semantic_hash(state);
	}
}

impl AggregateFunction for Dcount {
	fn symbol(&self) -> FunctionSymbol {
		FunctionSymbol::Dcount
	}

	fn arity(&self) -> Arity {
		Arity::Exact(1)
	}

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		_fragment: &Fragment,
	) -> Result<Value> {
		let mut seen = HashSet::new();
		for value in argument_column(args, group)?.iter() {
			if !value.is_undefined() {
				seen.insert(DistinctKey(value));
			}
		}
		Ok(Value::long(seen.len() as i64))
	}
}
