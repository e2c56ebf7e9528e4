// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use crate::{fragment::Fragment, value::Type};

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the engine can produce.
///
/// Build-time variants are surfaced while the expression tree is being
/// compiled, before any chunk is produced. Evaluation-time variants either
/// indicate a construction bug (`UnsupportedInputShape`, `Internal`) or a
/// data error attributable to a specific row (`Conversion`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unsupported expression kind `{kind}`")]
	UnsupportedExpression {
		kind: String,
		fragment: Fragment,
	},

	#[error("unknown function `{name}`")]
	UnknownFunction {
		name: String,
		fragment: Fragment,
	},

	#[error("`{name}` is an aggregate function and can only be used inside summarize")]
	AggregateOutsideSummarize {
		name: String,
		fragment: Fragment,
	},

	#[error("`{name}` cannot be used as an aggregate")]
	NotAnAggregate {
		name: String,
		fragment: Fragment,
	},

	#[error("operator `{op}` is not defined for {left} and {right}")]
	UnsupportedOperator {
		op: &'static str,
		left: Type,
		right: Type,
		fragment: Fragment,
	},

	#[error("unknown column `{name}`")]
	UnknownColumn {
		name: String,
		fragment: Fragment,
	},

	#[error("unknown table `{name}`")]
	UnknownTable {
		name: String,
		fragment: Fragment,
	},

	#[error("a table named `{name}` is already registered")]
	DuplicateTable {
		name: String,
	},

	#[error("duplicate column `{name}` in schema")]
	DuplicateColumn {
		name: String,
	},

	#[error("{node} cannot be evaluated against {shape} input")]
	UnsupportedInputShape {
		node: &'static str,
		shape: &'static str,
	},

	#[error("filter predicate must evaluate to bool, found {found}")]
	NonBooleanPredicate {
		found: Type,
		fragment: Fragment,
	},

	#[error("cannot convert `{value}` to {target}")]
	Conversion {
		value: String,
		target: Type,
		fragment: Fragment,
	},

	#[error("wrong number of arguments for `{name}`: expected {expected}, found {found}")]
	ArgumentCount {
		name: String,
		expected: usize,
		found: usize,
		fragment: Fragment,
	},

	#[error("internal invariant violated: {message}")]
	Internal {
		message: String,
	},
}

impl Error {
	pub fn internal(message: impl Into<String>) -> Self {
		Error::Internal {
			message: message.into(),
		}
	}
}
