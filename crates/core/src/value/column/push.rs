// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_type::{Error, Result, Value};

use crate::value::column::ColumnData;

impl ColumnData {
	/// Appends one scalar. Pushing `Undefined` into a typed column appends
	/// an invalid slot; pushing a typed value into a mismatching column is
	/// an internal error, the caller is responsible for kind agreement.
	pub fn push(&mut self, value: Value) -> Result<()> {
		match (self, value) {
			(ColumnData::Bool(values, valid), Value::Bool(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Int(values, valid), Value::Int(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Long(values, valid), Value::Long(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Real(values, valid), Value::Real(v)) => {
				values.push(v.value());
				valid.push(true);
			}
			(ColumnData::Decimal(values, valid), Value::Decimal(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Utf8(values, valid), Value::Utf8(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::DateTime(values, valid), Value::DateTime(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Timespan(values, valid), Value::Timespan(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Uuid(values, valid), Value::Uuid(v)) => {
				values.push(v);
				valid.push(true);
			}
			(ColumnData::Any(values, valid), Value::Any(v)) => {
				values.push(*v);
				valid.push(true);
			}
			(ColumnData::Bool(values, valid), Value::Undefined) => {
				values.push(false);
				valid.push(false);
			}
			(ColumnData::Int(values, valid), Value::Undefined) => {
				values.push(0);
				valid.push(false);
			}
			(ColumnData::Long(values, valid), Value::Undefined) => {
				values.push(0);
				valid.push(false);
			}
			(ColumnData::Real(values, valid), Value::Undefined) => {
				values.push(0.0);
				valid.push(false);
			}
			(ColumnData::Decimal(values, valid), Value::Undefined) => {
				values.push(tabulon_type::Decimal::zero());
				valid.push(false);
			}
			(ColumnData::Utf8(values, valid), Value::Undefined) => {
				values.push(String::new());
				valid.push(false);
			}
			(ColumnData::DateTime(values, valid), Value::Undefined) => {
				values.push(Default::default());
				valid.push(false);
			}
			(ColumnData::Timespan(values, valid), Value::Undefined) => {
				values.push(Default::default());
				valid.push(false);
			}
			(ColumnData::Uuid(values, valid), Value::Undefined) => {
				values.push(uuid::Uuid::nil());
				valid.push(false);
			}
			(ColumnData::Any(values, valid), Value::Undefined) => {
				values.push(serde_json::Value::Null);
				valid.push(false);
			}
			(ColumnData::Undefined(len), Value::Undefined) => *len += 1,
			(column, value) => {
				return Err(Error::internal(format!(
					"cannot push {} value into {} column",
					value.kind(),
					column.kind()
				)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tabulon_type::{Type, Value};

	use super::*;

	#[test]
	fn test_push_matching() {
		let mut data = ColumnData::with_capacity(Type::Utf8, 2);
		data.push(Value::utf8("a")).unwrap();
		data.push(Value::Undefined).unwrap();
		assert_eq!(data.len(), 2);
		assert_eq!(data.get(0), Value::utf8("a"));
		assert_eq!(data.get(1), Value::Undefined);
	}

	#[test]
	fn test_push_mismatch_fails() {
		let mut data = ColumnData::with_capacity(Type::Long, 1);
		assert!(data.push(Value::utf8("nope")).is_err());
	}

	#[test]
	fn test_push_into_undefined() {
		let mut data = ColumnData::Undefined(1);
		data.push(Value::Undefined).unwrap();
		assert_eq!(data.len(), 2);
		assert!(data.push(Value::long(1)).is_err());
	}
}
