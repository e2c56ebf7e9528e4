// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use tabulon_core::{ChunkIter, ColumnData, TableChunk, TableSchema, TableSource};
use tabulon_type::{Error, Fragment, Result};
use tracing::trace;

use crate::evaluate::{EvalInput, EvalValue, Expr};

/// Keeps the rows whose predicate is true; false and null rows drop.
/// The schema passes through unchanged.
pub struct FilterExpr {
	pub(crate) predicate: Arc<Expr>,
	pub(crate) fragment: Fragment,
}

impl FilterExpr {
	pub(crate) fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		let EvalInput::Table(table) = input else {
			return Err(Error::UnsupportedInputShape {
				node: "filter operator",
				shape: input.shape(),
			});
		};
		Ok(EvalValue::Table(Arc::new(FilteredSource {
			schema: table.schema().clone(),
			input: table.clone(),
			predicate: self.predicate.clone(),
			fragment: self.fragment.clone(),
		})))
	}

	pub(crate) fn fragment(&self) -> &Fragment {
		&self.fragment
	}
}

struct FilteredSource {
	input: Arc<dyn TableSource>,
	predicate: Arc<Expr>,
	schema: Arc<TableSchema>,
	fragment: Fragment,
}

impl FilteredSource {
	fn filter_chunk(&self, chunk: Arc<TableChunk>) -> Result<Arc<TableChunk>> {
		let mask = self.predicate.evaluate_columnar(&chunk)?;
		let selected: Vec<usize> = match &mask {
			ColumnData::Bool(values, validity) => (0..chunk.row_count())
				.filter(|&i| validity.get(i) && values[i])
				.collect(),
			ColumnData::Undefined(_) => Vec::new(),
			other => {
				return Err(Error::NonBooleanPredicate {
					found: other.kind(),
					fragment: self.fragment.clone(),
				});
			}
		};
		trace!(rows = chunk.row_count(), kept = selected.len(), "filter chunk");
		if selected.len() == chunk.row_count() {
			Ok(chunk)
		} else {
			Ok(Arc::new(chunk.take(&selected)))
		}
	}
}

impl TableSource for FilteredSource {
	fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	fn chunks(&self) -> ChunkIter<'_> {
		Box::new(self.input.chunks().map(move |chunk| self.filter_chunk(chunk?)))
	}
}
