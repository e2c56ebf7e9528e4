// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use tabulon_type::{Error, Result};

use crate::{
	table::{row::Row, schema::TableSchema},
	value::column::ColumnData,
};

/// A fixed-row-count slice of a table: one column per schema entry, all of
/// identical length. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TableChunk {
	schema: Arc<TableSchema>,
	columns: Vec<ColumnData>,
}

impl TableChunk {
	pub fn new(schema: Arc<TableSchema>, columns: Vec<ColumnData>) -> Result<Self> {
		if columns.len() != schema.len() {
			return Err(Error::internal(format!(
				"chunk has {} columns, schema expects {}",
				columns.len(),
				schema.len()
			)));
		}
		let row_count = columns.first().map_or(0, ColumnData::len);
		for (ordinal, column) in columns.iter().enumerate() {
			if column.len() != row_count {
				return Err(Error::internal(format!(
					"column {} holds {} rows, chunk holds {}",
					ordinal,
					column.len(),
					row_count
				)));
			}
			// All-undefined columns are allowed to stand in for any
			// declared kind.
			let declared = schema.column(ordinal).map(|c| c.kind());
			if let Some(declared) = declared {
				let actual = column.kind();
				if !actual.is_undefined() && actual != declared {
					return Err(Error::internal(format!(
						"column {} is {}, schema declares {}",
						ordinal, actual, declared
					)));
				}
			}
		}
		Ok(Self {
			schema,
			columns,
		})
	}

	pub fn empty(schema: Arc<TableSchema>) -> Self {
		let columns = schema.columns().iter().map(|c| ColumnData::with_capacity(c.kind(), 0)).collect();
		Self {
			schema,
			columns,
		}
	}

	pub fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	pub fn columns(&self) -> &[ColumnData] {
		&self.columns
	}

	pub fn column(&self, ordinal: usize) -> Option<&ColumnData> {
		self.columns.get(ordinal)
	}

	pub fn column_by_name(&self, name: &str) -> Option<&ColumnData> {
		self.schema.ordinal_of(name).and_then(|ordinal| self.columns.get(ordinal))
	}

	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, ColumnData::len)
	}

	pub fn row(&self, index: usize) -> Row<'_> {
		Row::new(self, index)
	}

	/// A new chunk containing the rows at `indices`, preserving the given
	/// order. Indices may repeat.
	pub fn take(&self, indices: &[usize]) -> Self {
		Self {
			schema: self.schema.clone(),
			columns: self.columns.iter().map(|c| c.take(indices)).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use tabulon_type::{Type, Value};

	use super::*;
	use crate::table::schema::ColumnDef;

	fn schema() -> Arc<TableSchema> {
		Arc::new(
			TableSchema::new(vec![
				ColumnDef::new("Name", Type::Utf8),
				ColumnDef::new("Count", Type::Long),
			])
			.unwrap(),
		)
	}

	#[test]
	fn test_schema_invariant() {
		let chunk = TableChunk::new(
			schema(),
			vec![ColumnData::utf8(["acd", "def"]), ColumnData::long([100, 30])],
		)
		.unwrap();
		assert_eq!(chunk.row_count(), 2);
		assert_eq!(chunk.columns().len(), chunk.schema().len());
	}

	#[test]
	fn test_column_count_mismatch_rejected() {
		let result = TableChunk::new(schema(), vec![ColumnData::utf8(["only"])]);
		assert!(result.is_err());
	}

	#[test]
	fn test_ragged_columns_rejected() {
		let result = TableChunk::new(
			schema(),
			vec![ColumnData::utf8(["a", "b"]), ColumnData::long([1])],
		);
		assert!(result.is_err());
	}

	#[test]
	fn test_kind_mismatch_rejected() {
		let result = TableChunk::new(
			schema(),
			vec![ColumnData::long([1, 2]), ColumnData::long([1, 2])],
		);
		assert!(result.is_err());
	}

	#[test]
	fn test_undefined_column_accepted() {
		let chunk = TableChunk::new(
			schema(),
			vec![ColumnData::Undefined(2), ColumnData::long([1, 2])],
		)
		.unwrap();
		assert_eq!(chunk.row(0).get(0), Value::Undefined);
	}

	#[test]
	fn test_take() {
		let chunk = TableChunk::new(
			schema(),
			vec![ColumnData::utf8(["a", "b", "c"]), ColumnData::long([1, 2, 3])],
		)
		.unwrap();
		let taken = chunk.take(&[2, 0]);
		assert_eq!(taken.row_count(), 2);
		assert_eq!(taken.row(0).get(1), Value::Long(3));
		assert_eq!(taken.row(1).get(0), Value::utf8("a"));
	}
}
