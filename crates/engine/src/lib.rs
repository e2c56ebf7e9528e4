// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Query evaluation for tabulon: expression compilation, columnar
//! evaluation, built-in functions, and the tabular operators (filter,
//! project, summarize, join) over the data model in `tabulon-core`.

pub mod context;
pub mod evaluate;
pub mod execute;
pub mod function;
pub mod render;

pub use context::{QueryContext, QueryResult};
pub use evaluate::{BuildContext, EvalInput, EvalValue, Expr};
