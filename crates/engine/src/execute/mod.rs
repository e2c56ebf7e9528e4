// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Tabular operators.
//!
//! Each operator expression evaluates against a table input and wraps it
//! in a derived `TableSource` rather than materializing anything up front.
//! Filter and project stream chunk by chunk; summarize and the build side
//! of join buffer, and recompute on every traversal so a derived source
//! stays re-enumerable.

mod filter;
mod join;
mod project;
mod summarize;

pub use filter::FilterExpr;
pub use join::JoinExpr;
pub use project::ProjectExpr;
pub use summarize::SummarizeExpr;

pub(crate) use project::{ProjectColumn, output_name};

use std::{
	hash::{Hash, Hasher},
	sync::Arc,
};

use tabulon_core::{ColumnData, TableChunk, TableSchema};
use tabulon_type::{Result, Value};

/// A grouping or join key compared with value semantics: null equals
/// null, NaN never equals anything including itself.
pub(crate) struct GroupKey(pub(crate) Vec<Value>);

impl PartialEq for GroupKey {
	fn eq(&self, other: &Self) -> bool {
		self.0.len() == other.0.len()
			&& self.0.iter().zip(&other.0).all(|(a, b)| a.semantic_eq(b))
	}
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		for value in &self.0 {
			value.semantic_hash(state);
		}
	}
}

/// A row pinned by its chunk; the chunk stays alive for as long as any
/// operator still references one of its rows.
#[derive(Clone)]
pub(crate) struct RowRef {
	pub chunk: Arc<TableChunk>,
	pub row: usize,
}

/// Materializes scattered rows into one chunk of the given schema.
pub(crate) fn chunk_from_rows(schema: &Arc<TableSchema>, rows: &[RowRef]) -> Result<TableChunk> {
	let mut columns: Vec<ColumnData> = schema
		.columns()
		.iter()
		.map(|col| ColumnData::with_capacity(col.kind(), rows.len()))
		.collect();
	for row_ref in rows {
		let row = row_ref.chunk.row(row_ref.row);
		for (ordinal, column) in columns.iter_mut().enumerate() {
			column.push(row.get(ordinal))?;
		}
	}
	TableChunk::new(schema.clone(), columns)
}
