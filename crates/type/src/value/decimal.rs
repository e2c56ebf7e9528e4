// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	fmt::{Display, Formatter},
	ops::{Add, Div, Mul, Sub},
	str::FromStr,
};

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// An arbitrary-precision decimal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Decimal(BigDecimal);

impl Decimal {
	pub fn new(inner: BigDecimal) -> Self {
		Self(inner)
	}

	pub fn zero() -> Self {
		Self(BigDecimal::from(0))
	}

	pub fn from_i64(value: i64) -> Self {
		Self(BigDecimal::from(value))
	}

	pub fn parse(text: &str) -> Option<Self> {
		BigDecimal::from_str(text).ok().map(Self)
	}

	pub fn to_f64(&self) -> Option<f64> {
		self.0.to_f64()
	}

	pub fn inner(&self) -> &BigDecimal {
		&self.0
	}
}

impl Add for Decimal {
	type Output = Decimal;

	fn add(self, rhs: Decimal) -> Decimal {
		Decimal(self.0 + rhs.0)
	}
}

impl Sub for Decimal {
	type Output = Decimal;

	fn sub(self, rhs: Decimal) -> Decimal {
		Decimal(self.0 - rhs.0)
	}
}

impl Mul for Decimal {
	type Output = Decimal;

	fn mul(self, rhs: Decimal) -> Decimal {
		Decimal(self.0 * rhs.0)
	}
}

impl Div for Decimal {
	type Output = Decimal;

	fn div(self, rhs: Decimal) -> Decimal {
		Decimal(self.0 / rhs.0)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
