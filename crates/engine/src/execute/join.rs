// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{collections::HashMap, sync::Arc};

use tabulon_core::{
	ChunkIter, ColumnData, ColumnDef, TableChunk, TableSchema, TableSource,
	expression::{JoinKind, JoinNode},
};
use tabulon_type::{Error, Fragment, Result, Value};
use tracing::trace;

use crate::{
	evaluate::{BuildContext, EvalInput, EvalValue, Expr},
	execute::{GroupKey, RowRef},
};

/// An equi-join. One side is hashed (the build side), the other is
/// streamed chunk by chunk (the probe side); every match produces an
/// output row, so duplicate keys fan out. Null keys never match. The
/// output schema is the left columns followed by the right columns, with
/// colliding right names suffixed until unique.
pub struct JoinExpr {
	pub(crate) kind: JoinKind,
	pub(crate) right: Box<Expr>,
	pub(crate) on_left: String,
	pub(crate) on_right: String,
	pub(crate) left_fragment: Fragment,
	pub(crate) right_fragment: Fragment,
	pub(crate) fragment: Fragment,
}

impl JoinExpr {
	pub(crate) fn build(ctx: &BuildContext, node: &JoinNode) -> Result<Self> {
		Ok(Self {
			kind: node.kind,
			right: Box::new(Expr::build(ctx, &node.right)?),
			on_left: node.on_left.name.clone(),
			on_right: node.on_right.name.clone(),
			left_fragment: node.on_left.fragment.clone(),
			right_fragment: node.on_right.fragment.clone(),
			fragment: node.fragment.clone(),
		})
	}

	pub(crate) fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		let EvalInput::Table(left) = input else {
			return Err(Error::UnsupportedInputShape {
				node: "join operator",
				shape: input.shape(),
			});
		};
		let right = self
			.right
			.evaluate(&EvalInput::None)?
			.into_table(self.right.node_name())?;

		let left_key = left.schema().ordinal_of(&self.on_left).ok_or_else(|| {
			Error::UnknownColumn {
				name: self.on_left.clone(),
				fragment: self.left_fragment.clone(),
			}
		})?;
		let right_key = right.schema().ordinal_of(&self.on_right).ok_or_else(|| {
			Error::UnknownColumn {
				name: self.on_right.clone(),
				fragment: self.right_fragment.clone(),
			}
		})?;

		let schema = Arc::new(joined_schema(left.schema(), right.schema())?);
		Ok(EvalValue::Table(Arc::new(JoinedSource {
			left: left.clone(),
			right,
			kind: self.kind,
			left_key,
			right_key,
			schema,
		})))
	}

	pub(crate) fn fragment(&self) -> &Fragment {
		&self.fragment
	}
}

fn joined_schema(left: &TableSchema, right: &TableSchema) -> Result<TableSchema> {
	let mut defs: Vec<ColumnDef> = left.columns().to_vec();
	for col in right.columns() {
		let mut name = col.name().to_string();
		while defs.iter().any(|def| def.name() == name) {
			name.push('1');
		}
		defs.push(ColumnDef::new(name, col.kind()));
	}
	TableSchema::new(defs)
}

struct JoinedSource {
	left: Arc<dyn TableSource>,
	right: Arc<dyn TableSource>,
	kind: JoinKind,
	left_key: usize,
	right_key: usize,
	schema: Arc<TableSchema>,
}

struct BuildSide {
	rows: Vec<RowRef>,
	by_key: HashMap<GroupKey, Vec<usize>>,
}

impl JoinedSource {
	fn probe_side(&self) -> &Arc<dyn TableSource> {
		match self.kind {
			JoinKind::Inner | JoinKind::LeftOuter => &self.left,
			JoinKind::RightOuter => &self.right,
		}
	}

	fn build_side(&self) -> &Arc<dyn TableSource> {
		match self.kind {
			JoinKind::Inner | JoinKind::LeftOuter => &self.right,
			JoinKind::RightOuter => &self.left,
		}
	}

	fn probe_key(&self) -> usize {
		match self.kind {
			JoinKind::Inner | JoinKind::LeftOuter => self.left_key,
			JoinKind::RightOuter => self.right_key,
		}
	}

	fn build_key(&self) -> usize {
		match self.kind {
			JoinKind::Inner | JoinKind::LeftOuter => self.right_key,
			JoinKind::RightOuter => self.left_key,
		}
	}

	/// Hashes every build-side row by its key. Null keys are left out of
	/// the map entirely; they can never match.
	fn hash_build_side(&self) -> Result<BuildSide> {
		let key_ordinal = self.build_key();
		let mut rows = Vec::new();
		let mut by_key: HashMap<GroupKey, Vec<usize>> = HashMap::new();
		for chunk in self.build_side().chunks() {
			let chunk = chunk?;
			for row in 0..chunk.row_count() {
				let key = chunk.row(row).get(key_ordinal);
				let index = rows.len();
				rows.push(RowRef { chunk: chunk.clone(), row });
				if !key.is_undefined() {
					by_key.entry(GroupKey(vec![key])).or_default().push(index);
				}
			}
		}
		trace!(build_rows = rows.len(), keys = by_key.len(), "join build side hashed");
		Ok(BuildSide { rows, by_key })
	}

	fn join_chunk(&self, build: &BuildSide, probe: &TableChunk) -> Result<TableChunk> {
		let left_width = self.left.schema().len();
		let mut columns: Vec<ColumnData> = self
			.schema
			.columns()
			.iter()
			.map(|col| ColumnData::with_capacity(col.kind(), probe.row_count()))
			.collect();
		let (left_columns, right_columns) = columns.split_at_mut(left_width);
		let probe_key = self.probe_key();

		for row in 0..probe.row_count() {
			let key = probe.row(row).get(probe_key);
			let matches = if key.is_undefined() {
				None
			} else {
				build.by_key.get(&GroupKey(vec![key]))
			};
			match matches {
				Some(indices) => {
					for &index in indices {
						let build_row = &build.rows[index];
						match self.kind {
							JoinKind::Inner | JoinKind::LeftOuter => {
								push_row(left_columns, probe, row)?;
								push_row(
									right_columns,
									&build_row.chunk,
									build_row.row,
								)?;
							}
							JoinKind::RightOuter => {
								push_row(
									left_columns,
									&build_row.chunk,
									build_row.row,
								)?;
								push_row(right_columns, probe, row)?;
							}
						}
					}
				}
				None => match self.kind {
					JoinKind::Inner => {}
					JoinKind::LeftOuter => {
						push_row(left_columns, probe, row)?;
						push_nulls(right_columns)?;
					}
					JoinKind::RightOuter => {
						push_nulls(left_columns)?;
						push_row(right_columns, probe, row)?;
					}
				},
			}
		}
		TableChunk::new(self.schema.clone(), columns)
	}
}

fn push_row(columns: &mut [ColumnData], chunk: &TableChunk, row: usize) -> Result<()> {
	let values = chunk.row(row);
	for (ordinal, column) in columns.iter_mut().enumerate() {
		column.push(values.get(ordinal))?;
	}
	Ok(())
}

fn push_nulls(columns: &mut [ColumnData]) -> Result<()> {
	for column in columns {
		column.push(Value::Undefined)?;
	}
	Ok(())
}

impl TableSource for JoinedSource {
	fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	fn chunks(&self) -> ChunkIter<'_> {
		Box::new(JoinChunks {
			source: self,
			build: None,
			probe: None,
			done: false,
		})
	}
}

/// Streams the probe side, hashing the build side lazily on the first
/// pull. Each probe chunk maps to one output chunk, possibly empty.
struct JoinChunks<'a> {
	source: &'a JoinedSource,
	build: Option<BuildSide>,
	probe: Option<ChunkIter<'a>>,
	done: bool,
}

impl Iterator for JoinChunks<'_> {
	type Item = Result<Arc<TableChunk>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		if self.build.is_none() {
			match self.source.hash_build_side() {
				Ok(build) => {
					self.build = Some(build);
					self.probe = Some(self.source.probe_side().chunks());
				}
				Err(err) => {
					self.done = true;
					return Some(Err(err));
				}
			}
		}
		let next = self.probe.as_mut().and_then(|probe| probe.next());
		match next {
			None => {
				self.done = true;
				None
			}
			Some(Err(err)) => {
				self.done = true;
				Some(Err(err))
			}
			Some(Ok(chunk)) => {
				let Some(build) = self.build.as_ref() else {
					self.done = true;
					return Some(Err(Error::internal("join build side missing")));
				};
				match self.source.join_chunk(build, &chunk) {
					Ok(out) => Some(Ok(Arc::new(out))),
					Err(err) => {
						self.done = true;
						Some(Err(err))
					}
				}
			}
		}
	}
}
