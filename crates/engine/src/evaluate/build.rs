// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{collections::HashMap, sync::Arc};

use tabulon_core::{
	MemTable, TableSchema, TableSource,
	expression::{SyntaxNode, TypeSymbol},
};
use tabulon_type::{Error, Result, Type, Value};
use tracing::instrument;

use crate::{
	evaluate::{
		BinaryExpr, CallExpr, ConstantExpr, DataTableExpr, Expr, NameExpr, PipeExpr,
		resolve_operator,
	},
	execute::{FilterExpr, JoinExpr, ProjectExpr, SummarizeExpr},
	function::{Functions, registry},
};

/// Everything name resolution needs while the tree is compiled: the
/// registered tables and the function registry.
pub struct BuildContext<'a> {
	tables: &'a HashMap<String, Arc<dyn TableSource>>,
	functions: &'static Functions,
}

impl<'a> BuildContext<'a> {
	pub fn new(tables: &'a HashMap<String, Arc<dyn TableSource>>) -> Self {
		Self {
			tables,
			functions: registry(),
		}
	}

	pub(crate) fn table(&self, name: &str) -> Option<&Arc<dyn TableSource>> {
		self.tables.get(name)
	}

	pub(crate) fn functions(&self) -> &'static Functions {
		self.functions
	}
}

impl Expr {
	/// Compiles the typed syntax tree into an evaluable expression tree,
	/// resolving tables, operators, and functions up front. All build-time
	/// errors surface here, before any chunk is produced.
	#[instrument(name = "expr_build", level = "trace", skip_all)]
	pub fn build(ctx: &BuildContext, node: &SyntaxNode) -> Result<Expr> {
		match node {
			SyntaxNode::Literal(literal) => Ok(Expr::Constant(ConstantExpr {
				value: literal.value.clone(),
				fragment: literal.fragment.clone(),
			})),
			SyntaxNode::Name(name) => {
				if let Some(table) = ctx.table(&name.name) {
					return Ok(Expr::Name(NameExpr {
						name: name.name.clone(),
						kind: None,
						table: Some(table.clone()),
						fragment: name.fragment.clone(),
					}));
				}
				if matches!(name.result, TypeSymbol::Tabular(_)) {
					return Err(Error::UnknownTable {
						name: name.name.clone(),
						fragment: name.fragment.clone(),
					});
				}
				let kind = name.result.value_kind(&name.fragment)?;
				Ok(Expr::Name(NameExpr {
					name: name.name.clone(),
					kind: Some(kind),
					table: None,
					fragment: name.fragment.clone(),
				}))
			}
			SyntaxNode::Paren(paren) => Expr::build(ctx, &paren.inner),
			// The alias is consumed by the enclosing projection; the
			// expression itself evaluates unchanged.
			SyntaxNode::Named(named) => Expr::build(ctx, &named.expr),
			SyntaxNode::Binary(binary) => {
				let left = Expr::build(ctx, &binary.left)?;
				let right = Expr::build(ctx, &binary.right)?;
				let (Some(left_kind), Some(right_kind)) = (left.kind(), right.kind())
				else {
					return Err(Error::UnsupportedExpression {
						kind: format!(
							"operator `{}` over a non-scalar operand",
							binary.op,
						),
						fragment: binary.fragment.clone(),
					});
				};
				let op_impl =
					resolve_operator(binary.op, left_kind, right_kind).ok_or_else(
						|| Error::UnsupportedOperator {
							op: binary.op.symbol(),
							left: left_kind,
							right: right_kind,
							fragment: binary.fragment.clone(),
						},
					)?;
				Ok(Expr::Binary(BinaryExpr {
					left: Box::new(left),
					right: Box::new(right),
					op_impl,
					fragment: binary.fragment.clone(),
				}))
			}
			SyntaxNode::Call(call) => {
				let Some(func) = ctx.functions().get_scalar(call.symbol) else {
					if ctx.functions().get_aggregate(call.symbol).is_some() {
						return Err(Error::AggregateOutsideSummarize {
							name: call.symbol.name().to_string(),
							fragment: call.fragment.clone(),
						});
					}
					return Err(Error::UnknownFunction {
						name: call.symbol.name().to_string(),
						fragment: call.fragment.clone(),
					});
				};
				func.arity().check(call.symbol.name(), call.args.len(), &call.fragment)?;
				let args = call
					.args
					.iter()
					.map(|arg| Expr::build(ctx, arg))
					.collect::<Result<Vec<_>>>()?;
				let kind = call.result.value_kind(&call.fragment)?;
				Ok(Expr::Call(CallExpr {
					func,
					args,
					kind,
					fragment: call.fragment.clone(),
				}))
			}
			SyntaxNode::Pipe(pipe) => Ok(Expr::Pipe(PipeExpr {
				left: Box::new(Expr::build(ctx, &pipe.left)?),
				right: Box::new(Expr::build(ctx, &pipe.right)?),
				fragment: pipe.fragment.clone(),
			})),
			SyntaxNode::DataTable(datatable) => {
				let width = datatable.columns.len();
				if width == 0 || datatable.values.len() % width != 0 {
					return Err(Error::UnsupportedExpression {
						kind: format!(
							"datatable literal with {} values for {} columns",
							datatable.values.len(),
							width,
						),
						fragment: datatable.fragment.clone(),
					});
				}
				let schema = Arc::new(TableSchema::new(datatable.columns.clone())?);
				let rows: Vec<Vec<Value>> =
					datatable.values.chunks(width).map(<[Value]>::to_vec).collect();
				let table = MemTable::from_rows(schema, &rows)?;
				Ok(Expr::DataTable(DataTableExpr {
					table: Arc::new(table),
					fragment: datatable.fragment.clone(),
				}))
			}
			SyntaxNode::Filter(filter) => {
				let predicate = Expr::build(ctx, &filter.predicate)?;
				let kind = predicate.kind().unwrap_or(Type::Undefined);
				// A literal null predicate is legal and selects nothing.
				if kind != Type::Bool && kind != Type::Undefined {
					return Err(Error::NonBooleanPredicate {
						found: kind,
						fragment: filter.predicate.fragment().clone(),
					});
				}
				Ok(Expr::Filter(FilterExpr {
					predicate: Arc::new(predicate),
					fragment: filter.fragment.clone(),
				}))
			}
			SyntaxNode::Project(project) => {
				Ok(Expr::Project(ProjectExpr::build(ctx, project)?))
			}
			SyntaxNode::Summarize(summarize) => {
				Ok(Expr::Summarize(SummarizeExpr::build(ctx, summarize)?))
			}
			SyntaxNode::Join(join) => Ok(Expr::Join(JoinExpr::build(ctx, join)?)),
		}
	}
}
