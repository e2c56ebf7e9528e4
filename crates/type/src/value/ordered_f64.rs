// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An f64 with bitwise equality, total ordering and hashing, so that real
/// values can live inside `Value` and be used as map keys.
///
/// Semantic comparison (where NaN is never equal to itself) is handled by
/// `Value::semantic_eq`, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn new(value: f64) -> Self {
		Self(value)
	}

	pub fn value(&self) -> f64 {
		self.0
	}

	pub fn is_nan(&self) -> bool {
		self.0.is_nan()
	}

	pub fn zero() -> Self {
		Self(0.0)
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl From<f64> for OrderedF64 {
	fn from(value: f64) -> Self {
		Self(value)
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bitwise_equality() {
		assert_eq!(OrderedF64::new(1.5), OrderedF64::new(1.5));
		assert_ne!(OrderedF64::new(1.5), OrderedF64::new(-1.5));
		// bitwise: NaN equals itself here, semantic_eq says otherwise
		assert_eq!(OrderedF64::new(f64::NAN), OrderedF64::new(f64::NAN));
	}

	#[test]
	fn test_total_order() {
		let mut values = vec![OrderedF64::new(2.0), OrderedF64::new(-1.0), OrderedF64::new(0.5)];
		values.sort();
		assert_eq!(values[0].value(), -1.0);
		assert_eq!(values[2].value(), 2.0);
	}
}
