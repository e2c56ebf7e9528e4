// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use tabulon_type::{Error, Result, Value};

use crate::{
	table::{
		chunk::TableChunk,
		schema::TableSchema,
		source::{ChunkIter, TableSource},
	},
	value::column::ColumnData,
};

/// A fully materialized table: a schema plus shared chunks. Base tables and
/// data-table literals are `MemTable`s; operators never are.
#[derive(Clone, Debug)]
pub struct MemTable {
	schema: Arc<TableSchema>,
	chunks: Vec<Arc<TableChunk>>,
}

impl MemTable {
	pub fn new(schema: Arc<TableSchema>, chunks: Vec<TableChunk>) -> Result<Self> {
		for chunk in &chunks {
			if !chunk.schema().is_compatible(&schema) {
				return Err(Error::internal(format!(
					"chunk schema `{}` does not match table schema `{}`",
					chunk.schema(),
					schema
				)));
			}
		}
		Ok(Self {
			schema,
			chunks: chunks.into_iter().map(Arc::new).collect(),
		})
	}

	pub fn empty(schema: Arc<TableSchema>) -> Self {
		Self {
			schema,
			chunks: Vec::new(),
		}
	}

	/// Builds a single-chunk table from row-major values.
	pub fn from_rows(schema: Arc<TableSchema>, rows: &[Vec<Value>]) -> Result<Self> {
		let mut columns: Vec<ColumnData> =
			schema.columns().iter().map(|c| ColumnData::with_capacity(c.kind(), rows.len())).collect();

		for row in rows {
			if row.len() != schema.len() {
				return Err(Error::internal(format!(
					"row holds {} values, schema expects {}",
					row.len(),
					schema.len()
				)));
			}
			for (ordinal, value) in row.iter().enumerate() {
				columns[ordinal].push(value.clone())?;
			}
		}

		let chunk = TableChunk::new(schema.clone(), columns)?;
		Ok(Self {
			schema,
			chunks: vec![Arc::new(chunk)],
		})
	}
}

impl TableSource for MemTable {
	fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	fn chunks(&self) -> ChunkIter<'_> {
		Box::new(self.chunks.iter().cloned().map(Ok))
	}
}
