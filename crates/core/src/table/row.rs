// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use tabulon_type::Value;

use crate::table::chunk::TableChunk;

/// A read-only positional view over one record of a chunk. It owns no data;
/// lookups index into the chunk's columns by ordinal, with named access
/// resolved through the chunk's schema.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
	chunk: &'a TableChunk,
	index: usize,
}

impl<'a> Row<'a> {
	pub(crate) fn new(chunk: &'a TableChunk, index: usize) -> Self {
		debug_assert!(index < chunk.row_count());
		Self {
			chunk,
			index,
		}
	}

	pub fn chunk(&self) -> &'a TableChunk {
		self.chunk
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn get(&self, ordinal: usize) -> Value {
		self.chunk.column(ordinal).map_or(Value::Undefined, |c| c.get(self.index))
	}

	pub fn by_name(&self, name: &str) -> Option<Value> {
		self.chunk.schema().ordinal_of(name).map(|ordinal| self.get(ordinal))
	}

	pub fn values(&self) -> Vec<Value> {
		(0..self.chunk.schema().len()).map(|ordinal| self.get(ordinal)).collect()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use tabulon_type::Type;

	use super::*;
	use crate::{
		table::schema::{ColumnDef, TableSchema},
		value::column::ColumnData,
	};

	#[test]
	fn test_named_lookup() {
		let schema = Arc::new(
			TableSchema::new(vec![
				ColumnDef::new("Name", Type::Utf8),
				ColumnDef::new("Count", Type::Long),
			])
			.unwrap(),
		);
		let chunk = TableChunk::new(
			schema,
			vec![ColumnData::utf8(["acd"]), ColumnData::long([100])],
		)
		.unwrap();

		let row = chunk.row(0);
		assert_eq!(row.by_name("Count"), Some(Value::Long(100)));
		assert_eq!(row.by_name("Missing"), None);
		assert_eq!(row.values(), vec![Value::utf8("acd"), Value::Long(100)]);
	}
}
