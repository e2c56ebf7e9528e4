// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_type::{DateTime, Decimal, OrderedF64, Timespan, Type, Value};

use crate::util::BitVec;

mod push;
mod take;

/// A homogeneous, densely indexed column of values of one kind.
///
/// Each typed variant stores raw values alongside a validity bitmap; an
/// unset validity bit means the value at that index is undefined. A column
/// whose every value is undefined can be stored as `Undefined(len)` without
/// committing to a kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
	Bool(Vec<bool>, BitVec),
	Int(Vec<i32>, BitVec),
	Long(Vec<i64>, BitVec),
	Real(Vec<f64>, BitVec),
	Decimal(Vec<Decimal>, BitVec),
	Utf8(Vec<String>, BitVec),
	DateTime(Vec<DateTime>, BitVec),
	Timespan(Vec<Timespan>, BitVec),
	Uuid(Vec<uuid::Uuid>, BitVec),
	Any(Vec<serde_json::Value>, BitVec),
	Undefined(usize),
}

impl ColumnData {
	pub fn kind(&self) -> Type {
		match self {
			ColumnData::Bool(..) => Type::Bool,
			ColumnData::Int(..) => Type::Int,
			ColumnData::Long(..) => Type::Long,
			ColumnData::Real(..) => Type::Real,
			ColumnData::Decimal(..) => Type::Decimal,
			ColumnData::Utf8(..) => Type::Utf8,
			ColumnData::DateTime(..) => Type::DateTime,
			ColumnData::Timespan(..) => Type::Timespan,
			ColumnData::Uuid(..) => Type::Uuid,
			ColumnData::Any(..) => Type::Any,
			ColumnData::Undefined(_) => Type::Undefined,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Bool(_, valid)
			| ColumnData::Int(_, valid)
			| ColumnData::Long(_, valid)
			| ColumnData::Real(_, valid)
			| ColumnData::Decimal(_, valid)
			| ColumnData::Utf8(_, valid)
			| ColumnData::DateTime(_, valid)
			| ColumnData::Timespan(_, valid)
			| ColumnData::Uuid(_, valid)
			| ColumnData::Any(_, valid) => valid.len(),
			ColumnData::Undefined(len) => *len,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_undefined(&self, index: usize) -> bool {
		match self {
			ColumnData::Bool(_, valid)
			| ColumnData::Int(_, valid)
			| ColumnData::Long(_, valid)
			| ColumnData::Real(_, valid)
			| ColumnData::Decimal(_, valid)
			| ColumnData::Utf8(_, valid)
			| ColumnData::DateTime(_, valid)
			| ColumnData::Timespan(_, valid)
			| ColumnData::Uuid(_, valid)
			| ColumnData::Any(_, valid) => !valid.get(index),
			ColumnData::Undefined(_) => true,
		}
	}

	pub fn get(&self, index: usize) -> Value {
		if self.is_undefined(index) {
			return Value::Undefined;
		}
		match self {
			ColumnData::Bool(values, _) => Value::Bool(values[index]),
			ColumnData::Int(values, _) => Value::Int(values[index]),
			ColumnData::Long(values, _) => Value::Long(values[index]),
			ColumnData::Real(values, _) => Value::Real(OrderedF64::new(values[index])),
			ColumnData::Decimal(values, _) => Value::Decimal(values[index].clone()),
			ColumnData::Utf8(values, _) => Value::Utf8(values[index].clone()),
			ColumnData::DateTime(values, _) => Value::DateTime(values[index]),
			ColumnData::Timespan(values, _) => Value::Timespan(values[index]),
			ColumnData::Uuid(values, _) => Value::Uuid(values[index]),
			ColumnData::Any(values, _) => Value::Any(Box::new(values[index].clone())),
			ColumnData::Undefined(_) => Value::Undefined,
		}
	}

	pub fn with_capacity(kind: Type, capacity: usize) -> Self {
		match kind {
			Type::Bool => ColumnData::Bool(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Int => ColumnData::Int(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Long => ColumnData::Long(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Real => ColumnData::Real(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Decimal => {
				ColumnData::Decimal(Vec::with_capacity(capacity), BitVec::with_capacity(capacity))
			}
			Type::Utf8 => ColumnData::Utf8(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::DateTime => {
				ColumnData::DateTime(Vec::with_capacity(capacity), BitVec::with_capacity(capacity))
			}
			Type::Timespan => {
				ColumnData::Timespan(Vec::with_capacity(capacity), BitVec::with_capacity(capacity))
			}
			Type::Uuid => ColumnData::Uuid(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Any => ColumnData::Any(Vec::with_capacity(capacity), BitVec::with_capacity(capacity)),
			Type::Undefined => ColumnData::Undefined(0),
		}
	}

	/// A column of `len` copies of one scalar, used when a constant is
	/// broadcast over a chunk.
	pub fn repeat(value: &Value, len: usize) -> Self {
		match value {
			Value::Undefined => ColumnData::Undefined(len),
			Value::Bool(v) => ColumnData::Bool(vec![*v; len], BitVec::new(len, true)),
			Value::Int(v) => ColumnData::Int(vec![*v; len], BitVec::new(len, true)),
			Value::Long(v) => ColumnData::Long(vec![*v; len], BitVec::new(len, true)),
			Value::Real(v) => ColumnData::Real(vec![v.value(); len], BitVec::new(len, true)),
			Value::Decimal(v) => ColumnData::Decimal(vec![v.clone(); len], BitVec::new(len, true)),
			Value::Utf8(v) => ColumnData::Utf8(vec![v.clone(); len], BitVec::new(len, true)),
			Value::DateTime(v) => ColumnData::DateTime(vec![*v; len], BitVec::new(len, true)),
			Value::Timespan(v) => ColumnData::Timespan(vec![*v; len], BitVec::new(len, true)),
			Value::Uuid(v) => ColumnData::Uuid(vec![*v; len], BitVec::new(len, true)),
			Value::Any(v) => ColumnData::Any(vec![(**v).clone(); len], BitVec::new(len, true)),
		}
	}

	/// Builds a column of the given kind from scalar values; undefined
	/// values become invalid slots.
	pub fn from_values(kind: Type, values: &[Value]) -> tabulon_type::Result<Self> {
		let mut data = Self::with_capacity(kind, values.len());
		for value in values {
			data.push(value.clone())?;
		}
		Ok(data)
	}

	pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(|i| self.get(i))
	}
}

impl ColumnData {
	pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
		let values: Vec<bool> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Bool(values, valid)
	}

	pub fn int(values: impl IntoIterator<Item = i32>) -> Self {
		let values: Vec<i32> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Int(values, valid)
	}

	pub fn long(values: impl IntoIterator<Item = i64>) -> Self {
		let values: Vec<i64> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Long(values, valid)
	}

	pub fn real(values: impl IntoIterator<Item = f64>) -> Self {
		let values: Vec<f64> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Real(values, valid)
	}

	pub fn utf8<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
		let values: Vec<String> = values.into_iter().map(Into::into).collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Utf8(values, valid)
	}

	pub fn datetime(values: impl IntoIterator<Item = DateTime>) -> Self {
		let values: Vec<DateTime> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::DateTime(values, valid)
	}

	pub fn timespan(values: impl IntoIterator<Item = Timespan>) -> Self {
		let values: Vec<Timespan> = values.into_iter().collect();
		let valid = BitVec::new(values.len(), true);
		ColumnData::Timespan(values, valid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_round_trip() {
		let data = ColumnData::long([1, 2, 3]);
		assert_eq!(data.len(), 3);
		assert_eq!(data.get(1), Value::Long(2));
		assert_eq!(data.kind(), Type::Long);
	}

	#[test]
	fn test_undefined_column() {
		let data = ColumnData::Undefined(4);
		assert_eq!(data.len(), 4);
		assert_eq!(data.get(2), Value::Undefined);
		assert!(data.is_undefined(0));
	}

	#[test]
	fn test_repeat() {
		let data = ColumnData::repeat(&Value::utf8("x"), 3);
		assert_eq!(data.len(), 3);
		assert_eq!(data.get(2), Value::utf8("x"));

		let nulls = ColumnData::repeat(&Value::Undefined, 2);
		assert_eq!(nulls, ColumnData::Undefined(2));
	}

	#[test]
	fn test_from_values_with_nulls() {
		let data =
			ColumnData::from_values(Type::Long, &[Value::Long(1), Value::Undefined, Value::Long(3)]).unwrap();
		assert_eq!(data.len(), 3);
		assert_eq!(data.get(0), Value::Long(1));
		assert_eq!(data.get(1), Value::Undefined);
		assert_eq!(data.get(2), Value::Long(3));
	}
}
