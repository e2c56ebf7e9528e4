// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! The compiled expression tree.
//!
//! `Expr::build` walks the typed syntax tree once and resolves everything
//! that can be resolved ahead of data: table bindings, function
//! implementations, binary operator kernels, and result schemas. Evaluating
//! a built tree therefore never does name or overload lookup.
//!
//! Evaluation has two modes. `evaluate` is the shaped mode: it takes one of
//! the four input shapes (none, scalar, row, table) and yields a scalar or
//! a table. `evaluate_columnar` is the vectorized mode used inside
//! operators: it takes a chunk and yields a whole column. Nodes reject
//! shapes they have no meaning for.

mod binary;
mod build;

pub use build::BuildContext;
pub(crate) use binary::{BinaryOpImpl, resolve_operator};

use std::sync::Arc;

use tabulon_core::{ColumnData, Row, TableChunk, TableSource};
use tabulon_type::{Error, Fragment, Result, Type, Value};

use crate::{
	execute::{FilterExpr, JoinExpr, ProjectExpr, SummarizeExpr},
	function::ScalarFunction,
};

/// What an expression is evaluated against.
pub enum EvalInput<'a> {
	None,
	Scalar(Value),
	Row(Row<'a>),
	Table(Arc<dyn TableSource>),
}

impl EvalInput<'_> {
	pub fn shape(&self) -> &'static str {
		match self {
			EvalInput::None => "no",
			EvalInput::Scalar(_) => "scalar",
			EvalInput::Row(_) => "row",
			EvalInput::Table(_) => "table",
		}
	}
}

/// What an expression evaluates to.
pub enum EvalValue {
	Scalar(Value),
	Table(Arc<dyn TableSource>),
}

impl EvalValue {
	pub fn into_scalar(self, node: &'static str) -> Result<Value> {
		match self {
			EvalValue::Scalar(value) => Ok(value),
			EvalValue::Table(_) => {
				Err(Error::internal(format!("{node} produced a table where a scalar was required")))
			}
		}
	}

	pub fn into_table(self, node: &'static str) -> Result<Arc<dyn TableSource>> {
		match self {
			EvalValue::Table(table) => Ok(table),
			EvalValue::Scalar(_) => {
				Err(Error::internal(format!("{node} produced a scalar where a table was required")))
			}
		}
	}
}

pub enum Expr {
	Constant(ConstantExpr),
	Name(NameExpr),
	Binary(BinaryExpr),
	Call(CallExpr),
	Pipe(PipeExpr),
	DataTable(DataTableExpr),
	Filter(FilterExpr),
	Project(ProjectExpr),
	Summarize(SummarizeExpr),
	Join(JoinExpr),
}

impl Expr {
	pub fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		match self {
			Expr::Constant(expr) => expr.evaluate(input),
			Expr::Name(expr) => expr.evaluate(input),
			Expr::Binary(expr) => expr.evaluate(input),
			Expr::Call(expr) => expr.evaluate(input),
			Expr::Pipe(expr) => expr.evaluate(input),
			Expr::DataTable(expr) => expr.evaluate(input),
			Expr::Filter(expr) => expr.evaluate(input),
			Expr::Project(expr) => expr.evaluate(input),
			Expr::Summarize(expr) => expr.evaluate(input),
			Expr::Join(expr) => expr.evaluate(input),
		}
	}

	/// Evaluates the expression over every row of a chunk at once.
	/// Only scalar-valued nodes have a columnar meaning.
	pub fn evaluate_columnar(&self, chunk: &TableChunk) -> Result<ColumnData> {
		match self {
			Expr::Constant(expr) => Ok(ColumnData::repeat(&expr.value, chunk.row_count())),
			Expr::Name(expr) => expr.evaluate_columnar(chunk),
			Expr::Binary(expr) => expr.evaluate_columnar(chunk),
			Expr::Call(expr) => expr.evaluate_columnar(chunk),
			other => Err(Error::UnsupportedInputShape {
				node: other.node_name(),
				shape: "columnar",
			}),
		}
	}

	/// The scalar result kind, or `None` for tabular-valued nodes.
	pub fn kind(&self) -> Option<Type> {
		match self {
			Expr::Constant(expr) => Some(expr.value.kind()),
			Expr::Name(expr) => expr.kind,
			Expr::Binary(expr) => Some(expr.op_impl.result),
			Expr::Call(expr) => Some(expr.kind),
			_ => None,
		}
	}

	pub fn fragment(&self) -> &Fragment {
		match self {
			Expr::Constant(expr) => &expr.fragment,
			Expr::Name(expr) => &expr.fragment,
			Expr::Binary(expr) => &expr.fragment,
			Expr::Call(expr) => &expr.fragment,
			Expr::Pipe(expr) => &expr.fragment,
			Expr::DataTable(expr) => &expr.fragment,
			Expr::Filter(expr) => expr.fragment(),
			Expr::Project(expr) => expr.fragment(),
			Expr::Summarize(expr) => expr.fragment(),
			Expr::Join(expr) => expr.fragment(),
		}
	}

	pub(crate) fn node_name(&self) -> &'static str {
		match self {
			Expr::Constant(_) => "constant",
			Expr::Name(expr) if expr.table.is_some() => "table reference",
			Expr::Name(_) => "column reference",
			Expr::Binary(_) => "binary expression",
			Expr::Call(_) => "function call",
			Expr::Pipe(_) => "pipe expression",
			Expr::DataTable(_) => "datatable literal",
			Expr::Filter(_) => "filter operator",
			Expr::Project(_) => "project operator",
			Expr::Summarize(_) => "summarize operator",
			Expr::Join(_) => "join operator",
		}
	}
}

pub struct ConstantExpr {
	pub(crate) value: Value,
	pub(crate) fragment: Fragment,
}

impl ConstantExpr {
	fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		match input {
			EvalInput::None | EvalInput::Scalar(_) | EvalInput::Row(_) => {
				Ok(EvalValue::Scalar(self.value.clone()))
			}
			EvalInput::Table(_) => Err(Error::UnsupportedInputShape {
				node: "constant",
				shape: input.shape(),
			}),
		}
	}
}

/// A name the checker resolved to either a registered table or a column of
/// the current row.
pub struct NameExpr {
	pub(crate) name: String,
	pub(crate) kind: Option<Type>,
	pub(crate) table: Option<Arc<dyn TableSource>>,
	pub(crate) fragment: Fragment,
}

impl NameExpr {
	fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		if let Some(table) = &self.table {
			return Ok(EvalValue::Table(table.clone()));
		}
		match input {
			EvalInput::Row(row) => {
				row.by_name(&self.name).map(EvalValue::Scalar).ok_or_else(|| {
					Error::UnknownColumn {
						name: self.name.clone(),
						fragment: self.fragment.clone(),
					}
				})
			}
			other => Err(Error::UnsupportedInputShape {
				node: "column reference",
				shape: other.shape(),
			}),
		}
	}

	fn evaluate_columnar(&self, chunk: &TableChunk) -> Result<ColumnData> {
		if self.table.is_some() {
			return Err(Error::UnsupportedInputShape {
				node: "table reference",
				shape: "columnar",
			});
		}
		chunk.column_by_name(&self.name).cloned().ok_or_else(|| Error::UnknownColumn {
			name: self.name.clone(),
			fragment: self.fragment.clone(),
		})
	}
}

/// A binary operation with the kernel for its operand kinds already bound.
pub struct BinaryExpr {
	pub(crate) left: Box<Expr>,
	pub(crate) right: Box<Expr>,
	pub(crate) op_impl: BinaryOpImpl,
	pub(crate) fragment: Fragment,
}

impl BinaryExpr {
	fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		if matches!(input, EvalInput::Table(_)) {
			return Err(Error::UnsupportedInputShape {
				node: "binary expression",
				shape: input.shape(),
			});
		}
		let left = self.left.evaluate(input)?.into_scalar(self.left.node_name())?;
		let right = self.right.evaluate(input)?.into_scalar(self.right.node_name())?;
		// The scalar path runs the columnar kernel over single-slot
		// columns so both modes share one definition of the operator.
		let left = ColumnData::repeat(&left, 1);
		let right = ColumnData::repeat(&right, 1);
		let out = (self.op_impl.kernel)(&left, &right)?;
		Ok(EvalValue::Scalar(out.get(0)))
	}

	fn evaluate_columnar(&self, chunk: &TableChunk) -> Result<ColumnData> {
		let left = self.left.evaluate_columnar(chunk)?;
		let right = self.right.evaluate_columnar(chunk)?;
		(self.op_impl.kernel)(&left, &right)
	}
}

/// A call bound to a built-in implementation by symbol identity.
pub struct CallExpr {
	pub(crate) func: Arc<dyn ScalarFunction>,
	pub(crate) args: Vec<Expr>,
	pub(crate) kind: Type,
	pub(crate) fragment: Fragment,
}

impl CallExpr {
	fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		if matches!(input, EvalInput::Table(_)) {
			return Err(Error::UnsupportedInputShape {
				node: "function call",
				shape: input.shape(),
			});
		}
		Ok(EvalValue::Scalar(self.func.eval_row(&self.args, input, &self.fragment)?))
	}

	fn evaluate_columnar(&self, chunk: &TableChunk) -> Result<ColumnData> {
		let args = self
			.args
			.iter()
			.map(|arg| arg.evaluate_columnar(chunk))
			.collect::<Result<Vec<_>>>()?;
		self.func.eval_columnar(&args, chunk.row_count(), self.kind, &self.fragment)
	}
}

/// The left side's result becomes the right side's input.
pub struct PipeExpr {
	pub(crate) left: Box<Expr>,
	pub(crate) right: Box<Expr>,
	pub(crate) fragment: Fragment,
}

impl PipeExpr {
	fn evaluate(&self, input: &EvalInput) -> Result<EvalValue> {
		let next = match self.left.evaluate(input)? {
			EvalValue::Scalar(value) => EvalInput::Scalar(value),
			EvalValue::Table(table) => EvalInput::Table(table),
		};
		self.right.evaluate(&next)
	}
}

/// An inline table literal, materialized once at build time.
pub struct DataTableExpr {
	pub(crate) table: Arc<dyn TableSource>,
	pub(crate) fragment: Fragment,
}

impl DataTableExpr {
	fn evaluate(&self, _input: &EvalInput) -> Result<EvalValue> {
		Ok(EvalValue::Table(self.table.clone()))
	}
}
