// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

//! Columnar data model of the tabulon query engine: columns, chunks,
//! schemas, table sources, and the typed syntax tree contract supplied by
//! the external parser/type-checker.

pub mod expression;
pub mod table;
pub mod util;
pub mod value;

pub use table::{ChunkIter, ColumnDef, MemTable, Row, TableChunk, TableSchema, TableSource};
pub use util::BitVec;
pub use value::column::ColumnData;
