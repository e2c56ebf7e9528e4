// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! The typed, resolved syntax tree the external parser/type-checker hands
//! to the engine. Each node carries a syntactic kind (the enum variant), a
//! fragment of the query text, and resolved type/symbol information where
//! meaningful. The engine never parses text itself.

use std::fmt::{Display, Formatter};

use tabulon_type::{Fragment, Value};

mod symbol;

pub use symbol::{FunctionSymbol, TypeSymbol};

use crate::table::ColumnDef;

/// A typed syntax-tree node. The variant set is closed: any construct the
/// grammar supports but this enum does not is rejected at tree-build time.
#[derive(Clone, Debug)]
pub enum SyntaxNode {
	Name(NameNode),
	Literal(LiteralNode),
	Binary(BinaryNode),
	Paren(ParenNode),
	Call(CallNode),
	Named(NamedNode),
	Pipe(PipeNode),
	DataTable(DataTableNode),
	Filter(FilterNode),
	Project(ProjectNode),
	Summarize(SummarizeNode),
	Join(JoinNode),
}

impl SyntaxNode {
	pub fn kind_name(&self) -> &'static str {
		match self {
			SyntaxNode::Name(_) => "name reference",
			SyntaxNode::Literal(_) => "literal",
			SyntaxNode::Binary(_) => "binary expression",
			SyntaxNode::Paren(_) => "parenthesized expression",
			SyntaxNode::Call(_) => "function call",
			SyntaxNode::Named(_) => "named expression",
			SyntaxNode::Pipe(_) => "pipe expression",
			SyntaxNode::DataTable(_) => "datatable expression",
			SyntaxNode::Filter(_) => "filter operator",
			SyntaxNode::Project(_) => "project operator",
			SyntaxNode::Summarize(_) => "summarize operator",
			SyntaxNode::Join(_) => "join operator",
		}
	}

	pub fn fragment(&self) -> &Fragment {
		match self {
			SyntaxNode::Name(node) => &node.fragment,
			SyntaxNode::Literal(node) => &node.fragment,
			SyntaxNode::Binary(node) => &node.fragment,
			SyntaxNode::Paren(node) => &node.fragment,
			SyntaxNode::Call(node) => &node.fragment,
			SyntaxNode::Named(node) => &node.fragment,
			SyntaxNode::Pipe(node) => &node.fragment,
			SyntaxNode::DataTable(node) => &node.fragment,
			SyntaxNode::Filter(node) => &node.fragment,
			SyntaxNode::Project(node) => &node.fragment,
			SyntaxNode::Summarize(node) => &node.fragment,
			SyntaxNode::Join(node) => &node.fragment,
		}
	}
}

/// A resolved reference to a column (in row/table scope) or a base table
/// (in pipeline-start position).
#[derive(Clone, Debug)]
pub struct NameNode {
	pub name: String,
	pub result: TypeSymbol,
	pub fragment: Fragment,
}

/// A literal whose value the parser already materialized.
#[derive(Clone, Debug)]
pub struct LiteralNode {
	pub value: Value,
	pub fragment: Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
	Add,
	Subtract,
	Multiply,
	Divide,
	Equal,
	NotEqual,
	LessThan,
	LessThanOrEqual,
	GreaterThan,
	GreaterThanOrEqual,
	And,
	Or,
	Contains,
	StartsWith,
	EndsWith,
}

impl BinaryOp {
	pub fn symbol(&self) -> &'static str {
		match self {
			BinaryOp::Add => "+",
			BinaryOp::Subtract => "-",
			BinaryOp::Multiply => "*",
			BinaryOp::Divide => "/",
			BinaryOp::Equal => "==",
			BinaryOp::NotEqual => "!=",
			BinaryOp::LessThan => "<",
			BinaryOp::LessThanOrEqual => "<=",
			BinaryOp::GreaterThan => ">",
			BinaryOp::GreaterThanOrEqual => ">=",
			BinaryOp::And => "and",
			BinaryOp::Or => "or",
			BinaryOp::Contains => "contains",
			BinaryOp::StartsWith => "startswith",
			BinaryOp::EndsWith => "endswith",
		}
	}
}

impl Display for BinaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.symbol())
	}
}

#[derive(Clone, Debug)]
pub struct BinaryNode {
	pub op: BinaryOp,
	pub left: Box<SyntaxNode>,
	pub right: Box<SyntaxNode>,
	pub fragment: Fragment,
}

#[derive(Clone, Debug)]
pub struct ParenNode {
	pub inner: Box<SyntaxNode>,
	pub fragment: Fragment,
}

/// A call whose callee the type checker resolved to a built-in symbol.
#[derive(Clone, Debug)]
pub struct CallNode {
	pub symbol: FunctionSymbol,
	pub args: Vec<SyntaxNode>,
	pub result: TypeSymbol,
	pub fragment: Fragment,
}

/// `expr as Name` — the alias feeds the enclosing projection.
#[derive(Clone, Debug)]
pub struct NamedNode {
	pub name: String,
	pub expr: Box<SyntaxNode>,
	pub fragment: Fragment,
}

/// The operator-chaining primitive: the left side's result becomes the
/// right side's input.
#[derive(Clone, Debug)]
pub struct PipeNode {
	pub left: Box<SyntaxNode>,
	pub right: Box<SyntaxNode>,
	pub fragment: Fragment,
}

/// An inline table literal: a schema plus row-major values.
#[derive(Clone, Debug)]
pub struct DataTableNode {
	pub columns: Vec<ColumnDef>,
	pub values: Vec<Value>,
	pub fragment: Fragment,
}

#[derive(Clone, Debug)]
pub struct FilterNode {
	pub predicate: Box<SyntaxNode>,
	pub fragment: Fragment,
}

/// Output expressions in declaration order; `Named` children carry the
/// output alias, anything else is named after its own text.
#[derive(Clone, Debug)]
pub struct ProjectNode {
	pub expressions: Vec<SyntaxNode>,
	pub fragment: Fragment,
}

#[derive(Clone, Debug)]
pub struct SummarizeNode {
	pub by: Vec<SyntaxNode>,
	pub aggregates: Vec<SyntaxNode>,
	pub fragment: Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
	Inner,
	LeftOuter,
	RightOuter,
}

impl Display for JoinKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			JoinKind::Inner => f.write_str("inner"),
			JoinKind::LeftOuter => f.write_str("leftouter"),
			JoinKind::RightOuter => f.write_str("rightouter"),
		}
	}
}

/// An equi-join: one column reference on each side of the `on` clause.
#[derive(Clone, Debug)]
pub struct JoinNode {
	pub kind: JoinKind,
	pub right: Box<SyntaxNode>,
	pub on_left: NameNode,
	pub on_right: NameNode,
	pub fragment: Fragment,
}

impl Display for SyntaxNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SyntaxNode::Name(node) => f.write_str(&node.name),
			SyntaxNode::Literal(node) => Display::fmt(&node.value, f),
			SyntaxNode::Binary(node) => {
				write!(f, "{} {} {}", node.left, node.op, node.right)
			}
			SyntaxNode::Paren(node) => write!(f, "({})", node.inner),
			SyntaxNode::Call(node) => {
				write!(f, "{}(", node.symbol)?;
				for (i, arg) in node.args.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(arg, f)?;
				}
				f.write_str(")")
			}
			SyntaxNode::Named(node) => write!(f, "{} as {}", node.expr, node.name),
			SyntaxNode::Pipe(node) => write!(f, "{} | {}", node.left, node.right),
			SyntaxNode::DataTable(_) => f.write_str("datatable(...)"),
			SyntaxNode::Filter(node) => write!(f, "where {}", node.predicate),
			SyntaxNode::Project(node) => {
				f.write_str("project ")?;
				for (i, expr) in node.expressions.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(expr, f)?;
				}
				Ok(())
			}
			SyntaxNode::Summarize(_) => f.write_str("summarize"),
			SyntaxNode::Join(node) => write!(f, "join kind={} on {}", node.kind, node.on_left.name),
		}
	}
}
