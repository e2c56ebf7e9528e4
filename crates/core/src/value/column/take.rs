// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use crate::{util::BitVec, value::column::ColumnData};

fn gather<T: Clone>(values: &[T], valid: &BitVec, indices: &[usize]) -> (Vec<T>, BitVec) {
	let mut out = Vec::with_capacity(indices.len());
	let mut out_valid = BitVec::with_capacity(indices.len());
	for &i in indices {
		out.push(values[i].clone());
		out_valid.push(valid.get(i));
	}
	(out, out_valid)
}

impl ColumnData {
	/// A new column containing the rows at `indices`, in the given order.
	/// Indices may repeat (join fan-out relies on this).
	pub fn take(&self, indices: &[usize]) -> ColumnData {
		match self {
			ColumnData::Bool(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Bool(v, b)
			}
			ColumnData::Int(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Int(v, b)
			}
			ColumnData::Long(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Long(v, b)
			}
			ColumnData::Real(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Real(v, b)
			}
			ColumnData::Decimal(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Decimal(v, b)
			}
			ColumnData::Utf8(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Utf8(v, b)
			}
			ColumnData::DateTime(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::DateTime(v, b)
			}
			ColumnData::Timespan(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Timespan(v, b)
			}
			ColumnData::Uuid(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Uuid(v, b)
			}
			ColumnData::Any(values, valid) => {
				let (v, b) = gather(values, valid, indices);
				ColumnData::Any(v, b)
			}
			ColumnData::Undefined(_) => ColumnData::Undefined(indices.len()),
		}
	}
}

#[cfg(test)]
mod tests {
	use tabulon_type::Value;

	use super::*;

	#[test]
	fn test_take_preserves_order() {
		let data = ColumnData::long([10, 20, 30, 40]);
		let taken = data.take(&[0, 2]);
		assert_eq!(taken.len(), 2);
		assert_eq!(taken.get(0), Value::Long(10));
		assert_eq!(taken.get(1), Value::Long(30));
	}

	#[test]
	fn test_take_repeats_indices() {
		let data = ColumnData::utf8(["a", "b"]);
		let taken = data.take(&[1, 1, 0]);
		assert_eq!(taken.len(), 3);
		assert_eq!(taken.get(0), Value::utf8("b"));
		assert_eq!(taken.get(2), Value::utf8("a"));
	}

	#[test]
	fn test_take_empty() {
		let data = ColumnData::long([1, 2, 3]);
		assert_eq!(data.take(&[]).len(), 0);
	}
}
