// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tabulon_type::{Error, Result, Type};

/// One named, typed column of a schema. Position within the schema is the
/// column's ordinal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
	name: String,
	kind: Type,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, kind: Type) -> Self {
		Self {
			name: name.into(),
			kind,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> Type {
		self.kind
	}
}

impl Display for ColumnDef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.name, self.kind)
	}
}

/// An ordered, immutable sequence of column definitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
	columns: Vec<ColumnDef>,
}

impl TableSchema {
	pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
		for (i, column) in columns.iter().enumerate() {
			if columns[..i].iter().any(|c| c.name == column.name) {
				return Err(Error::DuplicateColumn {
					name: column.name.clone(),
				});
			}
		}
		Ok(Self {
			columns,
		})
	}

	pub fn empty() -> Self {
		Self {
			columns: Vec::new(),
		}
	}

	pub fn columns(&self) -> &[ColumnDef] {
		&self.columns
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn column(&self, ordinal: usize) -> Option<&ColumnDef> {
		self.columns.get(ordinal)
	}

	pub fn ordinal_of(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name == name)
	}

	/// Two schemas are compatible only if ordinals, names and kinds all
	/// match.
	pub fn is_compatible(&self, other: &TableSchema) -> bool {
		self == other
	}
}

impl Display for TableSchema {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (i, column) in self.columns.iter().enumerate() {
			if i > 0 {
				f.write_str("; ")?;
			}
			Display::fmt(column, f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ordinal_lookup() {
		let schema = TableSchema::new(vec![
			ColumnDef::new("Name", Type::Utf8),
			ColumnDef::new("Count", Type::Long),
		])
		.unwrap();
		assert_eq!(schema.ordinal_of("Count"), Some(1));
		assert_eq!(schema.ordinal_of("count"), None);
	}

	#[test]
	fn test_duplicate_name_rejected() {
		let result = TableSchema::new(vec![
			ColumnDef::new("A", Type::Long),
			ColumnDef::new("A", Type::Utf8),
		]);
		assert!(matches!(result, Err(Error::DuplicateColumn { .. })));
	}

	#[test]
	fn test_compatibility_requires_order() {
		let a = TableSchema::new(vec![
			ColumnDef::new("A", Type::Long),
			ColumnDef::new("B", Type::Utf8),
		])
		.unwrap();
		let b = TableSchema::new(vec![
			ColumnDef::new("B", Type::Utf8),
			ColumnDef::new("A", Type::Long),
		])
		.unwrap();
		assert!(!a.is_compatible(&b));
		assert!(a.is_compatible(&a.clone()));
	}

	#[test]
	fn test_display() {
		let schema = TableSchema::new(vec![
			ColumnDef::new("Name", Type::Utf8),
			ColumnDef::new("Count", Type::Long),
		])
		.unwrap();
		assert_eq!(schema.to_string(), "Name:string; Count:long");
	}
}
