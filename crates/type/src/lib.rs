// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Scalar values, the value-kind taxonomy and the shared error type of the
//! tabulon query engine.

pub mod error;
pub mod fragment;
pub mod value;

pub use error::{Error, Result};
pub use fragment::Fragment;
pub use value::{DateTime, Decimal, OrderedF64, Timespan, Type, Value};
