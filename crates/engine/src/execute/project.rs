// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use tabulon_core::{
	ChunkIter, ColumnDef, TableChunk, TableSchema, TableSource,
	expression::{ProjectNode, SyntaxNode},
};
use tabulon_type::{Error, Fragment, Result, Type};

use crate::evaluate::{BuildContext, EvalInput, EvalValue, Expr};

/// One output column of a projection or of a summarize `by` clause.
pub(crate) struct ProjectColumn {
	pub name: String,
	pub kind: Type,
	pub expr: Expr,
}

/// The output name of an expression in a projection position: an alias if
/// one was given, a column's own name for bare references, a generated
/// name for anything computed.
pub(crate) fn output_name(node: &SyntaxNode, index: usize) -> String {
	match node {
		SyntaxNode::Named(named) => named.name.clone(),
		SyntaxNode::Name(name) => name.name.clone(),
		_ => format!("Column{}", index + 1),
	}
}

pub(crate) fn build_output_column(ctx: &BuildContext, node: &SyntaxNode, index: usize) -> Result<ProjectColumn> {
	let name = output_name(node, index);
	let expr = Expr::build(ctx, node)?;
	let kind = expr.kind().ok_or_else(|| Error::UnsupportedExpression {
		kind: format!("non-scalar expression in column position `{node}`"),
		fragment: node.fragment().clone(),
	})?;
	Ok(ProjectColumn { name, kind, expr })
}

/// Replaces the schema with the declared output expressions, row for row.
pub struct ProjectExpr {
	spec: Arc<ProjectSpec>,
	fragment: Fragment,
}

struct ProjectSpec {
	columns: Vec<ProjectColumn>,
	schema: Arc<TableSchema>,
}

impl ProjectExpr {
	pub(crate) fn build(ctx: &BuildContext, node: &ProjectNode) -> Result<Self> {
		let columns = node
			.expressions
			.iter()
			.enumerate()
			.map(|(index, expr)| build_output_column(ctx, expr, index))
			.collect::<Result<Vec<_>>>()?;
		let schema = Arc::new(TableSchema::new(
			columns.iter().map(|col| ColumnDef::new(col.name.clone(), col.kind)).collect(),
		)?);
		Ok(Self {
			spec: Arc::new(ProjectSpec { columns, schema }),
			fragment: node.fragment.clone(),
		})
	}

	pub(crate) fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		let EvalInput::Table(table) = input else {
			return Err(Error::UnsupportedInputShape {
				node: "project operator",
				shape: input.shape(),
			});
		};
		Ok(EvalValue::Table(Arc::new(ProjectedSource {
			input: table.clone(),
			spec: self.spec.clone(),
		})))
	}

	pub(crate) fn fragment(&self) -> &Fragment {
		&self.fragment
	}
}

struct ProjectedSource {
	input: Arc<dyn TableSource>,
	spec: Arc<ProjectSpec>,
}

impl ProjectedSource {
	fn project_chunk(&self, chunk: Arc<TableChunk>) -> Result<Arc<TableChunk>> {
		let mut columns = Vec::with_capacity(self.spec.columns.len());
		for col in &self.spec.columns {
			let data = col.expr.evaluate_columnar(&chunk)?;
			if data.len() != chunk.row_count() {
				return Err(Error::internal(format!(
					"projection of `{}` yielded {} rows for a {}-row chunk",
					col.name,
					data.len(),
					chunk.row_count(),
				)));
			}
			columns.push(data);
		}
		Ok(Arc::new(TableChunk::new(self.spec.schema.clone(), columns)?))
	}
}

impl TableSource for ProjectedSource {
	fn schema(&self) -> &Arc<TableSchema> {
		&self.spec.schema
	}

	fn chunks(&self) -> ChunkIter<'_> {
		Box::new(self.input.chunks().map(move |chunk| self.project_chunk(chunk?)))
	}
}
