// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use indexmap::IndexMap;
use tabulon_core::{
	ChunkIter, ColumnData, ColumnDef, TableChunk, TableSchema, TableSource,
	expression::{CallNode, SummarizeNode, SyntaxNode},
};
use tabulon_type::{Error, Fragment, Result, Type};
use tracing::trace;

use crate::{
	evaluate::{BuildContext, EvalInput, EvalValue, Expr},
	execute::{GroupKey, RowRef, chunk_from_rows, project::build_output_column, ProjectColumn},
	function::AggregateFunction,
};

pub(crate) struct AggregateColumn {
	name: String,
	func: Arc<dyn AggregateFunction>,
	args: Vec<Expr>,
	fragment: Fragment,
}

/// Groups rows by the `by` expressions and evaluates one aggregate value
/// per group. Groups appear in first-seen order; a group exists only if at
/// least one row mapped to it, so an empty input yields no rows.
pub struct SummarizeExpr {
	spec: Arc<SummarizeSpec>,
	fragment: Fragment,
}

struct SummarizeSpec {
	by: Vec<ProjectColumn>,
	aggregates: Vec<AggregateColumn>,
	schema: Arc<TableSchema>,
}

/// The default output name of an aggregate: `count_`, `sum_Price`, and so
/// on, unless an alias was given.
fn aggregate_name(call: &CallNode) -> String {
	match call.args.first() {
		Some(SyntaxNode::Name(name)) => format!("{}_{}", call.symbol.name(), name.name),
		_ => format!("{}_", call.symbol.name()),
	}
}

impl SummarizeExpr {
	pub(crate) fn build(ctx: &BuildContext, node: &SummarizeNode) -> Result<Self> {
		let by = node
			.by
			.iter()
			.enumerate()
			.map(|(index, expr)| build_output_column(ctx, expr, index))
			.collect::<Result<Vec<_>>>()?;

		let mut aggregates = Vec::with_capacity(node.aggregates.len());
		let mut defs: Vec<ColumnDef> =
			by.iter().map(|col| ColumnDef::new(col.name.clone(), col.kind)).collect();
		for agg in &node.aggregates {
			let (alias, call) = match agg {
				SyntaxNode::Named(named) => match named.expr.as_ref() {
					SyntaxNode::Call(call) => (Some(named.name.clone()), call),
					other => {
						return Err(Error::NotAnAggregate {
							name: other.to_string(),
							fragment: other.fragment().clone(),
						});
					}
				},
				SyntaxNode::Call(call) => (None, call),
				other => {
					return Err(Error::NotAnAggregate {
						name: other.to_string(),
						fragment: other.fragment().clone(),
					});
				}
			};
			let func = ctx.functions().get_aggregate(call.symbol).ok_or_else(|| {
				Error::NotAnAggregate {
					name: call.symbol.name().to_string(),
					fragment: call.fragment.clone(),
				}
			})?;
			func.arity().check(call.symbol.name(), call.args.len(), &call.fragment)?;
			let args = call
				.args
				.iter()
				.map(|arg| Expr::build(ctx, arg))
				.collect::<Result<Vec<_>>>()?;
			let kind = call.result.value_kind(&call.fragment)?;
			let name = alias.unwrap_or_else(|| aggregate_name(call));
			defs.push(ColumnDef::new(name.clone(), kind));
			aggregates.push(AggregateColumn {
				name,
				func,
				args,
				fragment: call.fragment.clone(),
			});
		}

		let schema = Arc::new(TableSchema::new(defs)?);
		Ok(Self {
			spec: Arc::new(SummarizeSpec { by, aggregates, schema }),
			fragment: node.fragment.clone(),
		})
	}

	pub(crate) fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		let EvalInput::Table(table) = input else {
			return Err(Error::UnsupportedInputShape {
				node: "summarize operator",
				shape: input.shape(),
			});
		};
		Ok(EvalValue::Table(Arc::new(SummarizedSource {
			input: table.clone(),
			spec: self.spec.clone(),
		})))
	}

	pub(crate) fn fragment(&self) -> &Fragment {
		&self.fragment
	}
}

struct SummarizedSource {
	input: Arc<dyn TableSource>,
	spec: Arc<SummarizeSpec>,
}

impl SummarizedSource {
	fn compute(&self) -> Result<TableChunk> {
		let spec = &self.spec;
		let mut groups: IndexMap<GroupKey, Vec<RowRef>> = IndexMap::new();
		for chunk in self.input.chunks() {
			let chunk = chunk?;
			let keys = spec
				.by
				.iter()
				.map(|col| col.expr.evaluate_columnar(&chunk))
				.collect::<Result<Vec<_>>>()?;
			for row in 0..chunk.row_count() {
				let key = GroupKey(keys.iter().map(|col| col.get(row)).collect());
				groups
					.entry(key)
					.or_insert_with(Vec::new)
					.push(RowRef { chunk: chunk.clone(), row });
			}
		}
		trace!(groups = groups.len(), "summarize");

		let mut columns: Vec<ColumnData> = spec
			.schema
			.columns()
			.iter()
			.map(|col| ColumnData::with_capacity(col.kind(), groups.len()))
			.collect();
		for (key, rows) in &groups {
			let group = chunk_from_rows(self.input.schema(), rows)?;
			for (ordinal, value) in key.0.iter().enumerate() {
				columns[ordinal].push(value.clone())?;
			}
			for (offset, agg) in spec.aggregates.iter().enumerate() {
				let value = agg.func.eval_aggregate(&agg.args, &group, &agg.fragment)?;
				columns[spec.by.len() + offset].push(value).map_err(|_| {
					Error::internal(format!(
						"aggregate `{}` yielded a value of the wrong kind",
						agg.name,
					))
				})?;
			}
		}
		TableChunk::new(spec.schema.clone(), columns)
	}
}

impl TableSource for SummarizedSource {
	fn schema(&self) -> &Arc<TableSchema> {
		&self.spec.schema
	}

	fn chunks(&self) -> ChunkIter<'_> {
		match self.compute() {
			Ok(chunk) => Box::new(std::iter::once(Ok(Arc::new(chunk)))),
			Err(err) => Box::new(std::iter::once(Err(err))),
		}
	}
}
