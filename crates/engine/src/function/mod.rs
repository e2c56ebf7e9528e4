// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Built-in functions.
//!
//! Implementations are registered against the `FunctionSymbol` the type
//! checker resolved, never against a name string. A scalar function has up
//! to three calling conventions: `eval_scalar` over already-evaluated
//! arguments, `eval_columnar` over whole argument columns, and `eval_row`
//! which receives the unevaluated argument expressions together with the
//! current input. The columnar and row conventions have defaults that fall
//! back to `eval_scalar`; a function overrides them when it can do better.

mod aggregate;
mod conv;
mod math;
mod registry;
mod text;

pub use registry::{Functions, registry};

use tabulon_core::{ColumnData, TableChunk, expression::FunctionSymbol};
use tabulon_type::{Error, Fragment, Result, Type, Value};

use crate::evaluate::{EvalInput, Expr};

/// How many arguments a function accepts, checked at build time.
#[derive(Clone, Copy, Debug)]
pub enum Arity {
	Exact(usize),
	AtLeast(usize),
	Range(usize, usize),
}

impl Arity {
	pub fn check(&self, name: &str, found: usize, fragment: &Fragment) -> Result<()> {
		let ok = match *self {
			Arity::Exact(n) => found == n,
			Arity::AtLeast(n) => found >= n,
			Arity::Range(lo, hi) => found >= lo && found <= hi,
		};
		if ok {
			return Ok(());
		}
		let expected = match *self {
			Arity::Exact(n) => n,
			Arity::AtLeast(n) | Arity::Range(n, _) => n,
		};
		Err(Error::ArgumentCount {
			name: name.to_string(),
			expected,
			found,
			fragment: fragment.clone(),
		})
	}
}

pub trait ScalarFunction: Send + Sync {
	fn symbol(&self) -> FunctionSymbol;

	fn arity(&self) -> Arity;

	fn eval_scalar(&self, args: &[Value], fragment: &Fragment) -> Result<Value>;

	/// Vectorized convention: argument columns in, result column out.
	/// The default applies `eval_scalar` row by row.
	fn eval_columnar(
		&self,
		args: &[ColumnData],
		rows: usize,
		result: Type,
		fragment: &Fragment,
	) -> Result<ColumnData> {
		let mut out = ColumnData::with_capacity(result, rows);
		let mut scalars = Vec::with_capacity(args.len());
		for row in 0..rows {
			scalars.clear();
			scalars.extend(args.iter().map(|col| col.get(row)));
			out.push(self.eval_scalar(&scalars, fragment)?)?;
		}
		Ok(out)
	}

	/// Row convention: the function evaluates its own arguments against
	/// the current input. The default evaluates each argument to a scalar
	/// and delegates to `eval_scalar`.
	fn eval_row(&self, args: &[Expr], input: &EvalInput, fragment: &Fragment) -> Result<Value> {
		let mut scalars = Vec::with_capacity(args.len());
		for arg in args {
			scalars.push(arg.evaluate(input)?.into_scalar(arg.node_name())?);
		}
		self.eval_scalar(&scalars, fragment)
	}
}

/// An aggregate consumes the materialized rows of one group and produces
/// a single value. Argument expressions are evaluated columnar against the
/// group's chunk.
pub trait AggregateFunction: Send + Sync {
	fn symbol(&self) -> FunctionSymbol;

	fn arity(&self) -> Arity;

	fn eval_aggregate(
		&self,
		args: &[Expr],
		group: &TableChunk,
		fragment: &Fragment,
	) -> Result<Value>;
}
