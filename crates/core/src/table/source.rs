// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use tabulon_type::{Result, Value};

use crate::table::{chunk::TableChunk, schema::TableSchema};

/// A fresh chunk iterator; produced anew by every `TableSource::chunks`
/// call.
pub type ChunkIter<'a> = Box<dyn Iterator<Item = Result<Arc<TableChunk>>> + 'a>;

/// A schema plus a lazy, finite, re-enumerable sequence of chunks.
///
/// Implementations never mutate: transformations wrap their input in a new
/// source (decorator chain). Every `chunks()` call must return a fresh
/// iterator — a source may be traversed more than once (a row-count probe
/// followed by a renderer, say), and traversals of an unmodified source
/// must yield identical rows. Derived sources are free to recompute on each
/// traversal.
pub trait TableSource: Send + Sync {
	fn schema(&self) -> &Arc<TableSchema>;

	fn chunks(&self) -> ChunkIter<'_>;

	/// All rows of the source, materialized in order. Concatenating the
	/// chunks' rows in order is the defined meaning of the source; no
	/// particular chunking granularity is promised.
	fn collect_rows(&self) -> Result<Vec<Vec<Value>>> {
		let mut rows = Vec::new();
		for chunk in self.chunks() {
			let chunk = chunk?;
			for i in 0..chunk.row_count() {
				rows.push(chunk.row(i).values());
			}
		}
		Ok(rows)
	}
}
