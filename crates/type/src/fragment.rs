// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A snippet of the original query text, carried through compilation so that
/// errors can point at the construct that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fragment {
	text: String,
	line: u32,
	column: u32,
}

impl Fragment {
	pub fn new(text: impl Into<String>, line: u32, column: u32) -> Self {
		Self {
			text: text.into(),
			line,
			column,
		}
	}

	/// A fragment for engine-generated constructs that have no position in
	/// the query text.
	pub fn internal(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			line: 0,
			column: 0,
		}
	}

	pub fn none() -> Self {
		Self::default()
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn line(&self) -> u32 {
		self.line
	}

	pub fn column(&self) -> u32 {
		self.column
	}
}

impl Display for Fragment {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.text)
	}
}

impl From<&str> for Fragment {
	fn from(text: &str) -> Self {
		Self::internal(text)
	}
}
