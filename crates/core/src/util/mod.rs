// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

mod bitvec;

pub use bitvec::BitVec;
