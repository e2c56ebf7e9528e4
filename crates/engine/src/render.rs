// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Plain-text rendering of a table source, for logs and examples.

use tabulon_core::TableSource;
use tabulon_type::Result;

/// Renders the schema header, a separator, and every row, one line each.
/// Fields are joined with `"; "`; null renders as `(null)`.
pub fn dump(table: &dyn TableSource) -> Result<String> {
	let header = table.schema().to_string();
	let mut out = String::with_capacity(header.len() * 2);
	out.push_str(&header);
	out.push('\n');
	out.extend(std::iter::repeat_n('-', header.chars().count()));
	out.push('\n');
	for row in table.collect_rows()? {
		let line = row.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
		out.push_str(&line);
		out.push('\n');
	}
	Ok(out)
}
