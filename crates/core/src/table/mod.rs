// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

mod chunk;
mod mem;
mod row;
mod schema;
mod source;

pub use chunk::TableChunk;
pub use mem::MemTable;
pub use row::Row;
pub use schema::{ColumnDef, TableSchema};
pub use source::{ChunkIter, TableSource};
