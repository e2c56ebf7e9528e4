// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

const BLOCK_BITS: usize = 64;

/// A packed bitmap used for column validity and row selection masks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitVec {
	blocks: Vec<u64>,
	len: usize,
}

impl BitVec {
	pub fn new(len: usize, bit: bool) -> Self {
		let block = if bit {
			u64::MAX
		} else {
			0
		};
		let mut bv = Self {
			blocks: vec![block; len.div_ceil(BLOCK_BITS)],
			len,
		};
		bv.clear_tail();
		bv
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			blocks: Vec::with_capacity(capacity.div_ceil(BLOCK_BITS)),
			len: 0,
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn get(&self, index: usize) -> bool {
		debug_assert!(index < self.len);
		self.blocks[index / BLOCK_BITS] & (1u64 << (index % BLOCK_BITS)) != 0
	}

	pub fn set(&mut self, index: usize, bit: bool) {
		debug_assert!(index < self.len);
		let mask = 1u64 << (index % BLOCK_BITS);
		if bit {
			self.blocks[index / BLOCK_BITS] |= mask;
		} else {
			self.blocks[index / BLOCK_BITS] &= !mask;
		}
	}

	pub fn push(&mut self, bit: bool) {
		if self.len % BLOCK_BITS == 0 {
			self.blocks.push(0);
		}
		self.len += 1;
		if bit {
			self.set(self.len - 1, true);
		}
	}

	pub fn count_ones(&self) -> usize {
		self.blocks.iter().map(|b| b.count_ones() as usize).sum()
	}

	pub fn any(&self) -> bool {
		self.blocks.iter().any(|b| *b != 0)
	}

	pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
		(0..self.len).map(|i| self.get(i))
	}

	// Bits past `len` in the last block must stay zero so count_ones and
	// any stay truthful.
	fn clear_tail(&mut self) {
		let tail = self.len % BLOCK_BITS;
		if tail != 0 {
			if let Some(last) = self.blocks.last_mut() {
				*last &= (1u64 << tail) - 1;
			}
		}
	}
}

impl FromIterator<bool> for BitVec {
	fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
		let mut bv = BitVec::default();
		for bit in iter {
			bv.push(bit);
		}
		bv
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_all_set() {
		let bv = BitVec::new(70, true);
		assert_eq!(bv.len(), 70);
		assert_eq!(bv.count_ones(), 70);
		assert!(bv.get(69));
	}

	#[test]
	fn test_set_and_get() {
		let mut bv = BitVec::new(10, false);
		bv.set(3, true);
		bv.set(9, true);
		assert!(bv.get(3));
		assert!(!bv.get(4));
		assert_eq!(bv.count_ones(), 2);
	}

	#[test]
	fn test_push_across_blocks() {
		let mut bv = BitVec::default();
		for i in 0..130 {
			bv.push(i % 3 == 0);
		}
		assert_eq!(bv.len(), 130);
		assert_eq!(bv.count_ones(), (0..130).filter(|i| i % 3 == 0).count());
	}

	#[test]
	fn test_any() {
		assert!(!BitVec::new(100, false).any());
		let mut bv = BitVec::new(100, false);
		bv.set(99, true);
		assert!(bv.any());
	}
}
