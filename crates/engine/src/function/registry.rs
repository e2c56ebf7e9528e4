// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use tabulon_core::expression::FunctionSymbol;

use crate::function::{
	AggregateFunction, ScalarFunction,
	aggregate::{Avg, Count, Countif, Dcount, Max, Min, Sum},
	conv::{Iff, Isnull, Todouble, Toint, Tolong},
	math::{Abs, Round, Sqrt},
	text::{Isempty, Strcat, Strlen, Tolower, Tostring, Toupper},
};

pub struct Functions {
	scalars: HashMap<FunctionSymbol, Arc<dyn ScalarFunction>>,
	aggregates: HashMap<FunctionSymbol, Arc<dyn AggregateFunction>>,
}

impl Functions {
	pub fn new() -> Self {
		Self {
			scalars: HashMap::new(),
			aggregates: HashMap::new(),
		}
	}

	pub fn register_scalar(&mut self, func: impl ScalarFunction + 'static) {
		self.scalars.insert(func.symbol(), Arc::new(func));
	}

	pub fn register_aggregate(&mut self, func: impl AggregateFunction + 'static) {
		self.aggregates.insert(func.symbol(), Arc::new(func));
	}

	pub fn get_scalar(&self, symbol: FunctionSymbol) -> Option<Arc<dyn ScalarFunction>> {
		self.scalars.get(&symbol).cloned()
	}

	pub fn get_aggregate(&self, symbol: FunctionSymbol) -> Option<Arc<dyn AggregateFunction>> {
		self.aggregates.get(&symbol).cloned()
	}

	pub fn builtin() -> Self {
		let mut functions = Self::new();
		functions.register_scalar(Strlen);
		functions.register_scalar(Strcat);
		functions.register_scalar(Toupper);
		functions.register_scalar(Tolower);
		functions.register_scalar(Isempty);
		functions.register_scalar(Tostring);
		functions.register_scalar(Abs);
		functions.register_scalar(Sqrt);
		functions.register_scalar(Round);
		functions.register_scalar(Iff);
		functions.register_scalar(Isnull);
		functions.register_scalar(Toint);
		functions.register_scalar(Todouble);
		functions.register_scalar(Tolong);
		functions.register_aggregate(Count);
		functions.register_aggregate(Countif);
		functions.register_aggregate(Sum);
		functions.register_aggregate(Avg);
		functions.register_aggregate(Min);
		functions.register_aggregate(Max);
		functions.register_aggregate(Dcount);
		functions
	}
}

impl Default for Functions {
	fn default() -> Self {
		Self::new()
	}
}

/// The process-wide registry of built-ins.
pub fn registry() -> &'static Functions {
	static REGISTRY: Lazy<Functions> = Lazy::new(Functions::builtin);
	&REGISTRY
}
