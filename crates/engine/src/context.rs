// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{collections::HashMap, sync::Arc};

use tabulon_core::{TableSource, expression::SyntaxNode};
use tabulon_type::{Error, Result, Value};
use tracing::instrument;

use crate::evaluate::{BuildContext, EvalInput, EvalValue, Expr};

/// The evaluation session: named tables a query can reference.
pub struct QueryContext {
	tables: HashMap<String, Arc<dyn TableSource>>,
}

/// A query yields either a table or a single scalar.
pub enum QueryResult {
	Scalar(Value),
	Table(Arc<dyn TableSource>),
}

impl std::fmt::Debug for QueryResult {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
			Self::Table(table) => f.debug_tuple("Table").field(&table.schema()).finish(),
		}
	}
}

impl QueryContext {
	pub fn new() -> Self {
		Self {
			tables: HashMap::new(),
		}
	}

	/// Registers a table under a name. Names are unique; registering the
	/// same name twice is rejected rather than silently replaced.
	pub fn add_table(
		&mut self,
		name: impl Into<String>,
		table: Arc<dyn TableSource>,
	) -> Result<()> {
		let name = name.into();
		if self.tables.contains_key(&name) {
			return Err(Error::DuplicateTable { name });
		}
		self.tables.insert(name, table);
		Ok(())
	}

	pub fn table(&self, name: &str) -> Option<&Arc<dyn TableSource>> {
		self.tables.get(name)
	}

	/// Compiles and evaluates a query against the registered tables.
	/// Build-time errors (unknown names, unsupported operators, arity)
	/// surface here even before the result is consumed; data errors
	/// surface as the result's chunks are pulled.
	#[instrument(name = "query", level = "debug", skip_all)]
	pub fn evaluate(&self, query: &SyntaxNode) -> Result<QueryResult> {
		let expr = Expr::build(&BuildContext::new(&self.tables), query)?;
		match expr.evaluate(&EvalInput::None)? {
			EvalValue::Scalar(value) => Ok(QueryResult::Scalar(value)),
			EvalValue::Table(table) => Ok(QueryResult::Table(table)),
		}
	}
}

impl Default for QueryContext {
	fn default() -> Self {
		Self::new()
	}
}
