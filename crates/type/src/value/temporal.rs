// Copyright (c) tabulon.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	fmt::{Display, Formatter},
	ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// A point in time with nanosecond precision, always interpreted in UTC.
///
/// Internally stored as nanoseconds since the Unix epoch (1970-01-01T00:00:00Z).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTime {
	nanos_since_epoch: i64,
}

impl DateTime {
	pub fn from_nanos(nanos_since_epoch: i64) -> Self {
		Self {
			nanos_since_epoch,
		}
	}

	pub fn from_timestamp(seconds_since_epoch: i64) -> Self {
		Self {
			nanos_since_epoch: seconds_since_epoch * NANOS_PER_SECOND,
		}
	}

	pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
		let days = ymd_to_days_since_epoch(year, month, day)?;
		if hour > 23 || min > 59 || sec > 59 {
			return None;
		}
		let seconds = days as i64 * SECONDS_PER_DAY + hour as i64 * 3600 + min as i64 * 60 + sec as i64;
		Some(Self::from_timestamp(seconds))
	}

	pub fn nanos(&self) -> i64 {
		self.nanos_since_epoch
	}
}

impl Add<Timespan> for DateTime {
	type Output = DateTime;

	fn add(self, rhs: Timespan) -> DateTime {
		DateTime::from_nanos(self.nanos_since_epoch.wrapping_add(rhs.nanos))
	}
}

impl Sub<Timespan> for DateTime {
	type Output = DateTime;

	fn sub(self, rhs: Timespan) -> DateTime {
		DateTime::from_nanos(self.nanos_since_epoch.wrapping_sub(rhs.nanos))
	}
}

impl Sub<DateTime> for DateTime {
	type Output = Timespan;

	fn sub(self, rhs: DateTime) -> Timespan {
		Timespan::from_nanos(self.nanos_since_epoch.wrapping_sub(rhs.nanos_since_epoch))
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let seconds = self.nanos_since_epoch.div_euclid(NANOS_PER_SECOND);
		let subnanos = self.nanos_since_epoch.rem_euclid(NANOS_PER_SECOND);
		let days = seconds.div_euclid(SECONDS_PER_DAY);
		let secs_of_day = seconds.rem_euclid(SECONDS_PER_DAY);

		let (year, month, day) = days_since_epoch_to_ymd(days as i32);
		let hour = secs_of_day / 3600;
		let min = (secs_of_day % 3600) / 60;
		let sec = secs_of_day % 60;

		if subnanos == 0 {
			write!(f, "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z", year, month, day, hour, min, sec)
		} else {
			write!(
				f,
				"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
				year, month, day, hour, min, sec, subnanos
			)
		}
	}
}

/// A signed duration with nanosecond precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timespan {
	nanos: i64,
}

impl Timespan {
	pub fn from_nanos(nanos: i64) -> Self {
		Self {
			nanos,
		}
	}

	pub fn from_seconds(seconds: i64) -> Self {
		Self {
			nanos: seconds * NANOS_PER_SECOND,
		}
	}

	pub fn from_minutes(minutes: i64) -> Self {
		Self::from_seconds(minutes * 60)
	}

	pub fn from_hours(hours: i64) -> Self {
		Self::from_seconds(hours * 3600)
	}

	pub fn from_days(days: i64) -> Self {
		Self::from_seconds(days * SECONDS_PER_DAY)
	}

	pub fn nanos(&self) -> i64 {
		self.nanos
	}
}

impl Add for Timespan {
	type Output = Timespan;

	fn add(self, rhs: Timespan) -> Timespan {
		Timespan::from_nanos(self.nanos.wrapping_add(rhs.nanos))
	}
}

impl Sub for Timespan {
	type Output = Timespan;

	fn sub(self, rhs: Timespan) -> Timespan {
		Timespan::from_nanos(self.nanos.wrapping_sub(rhs.nanos))
	}
}

impl Display for Timespan {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut nanos = self.nanos;
		if nanos < 0 {
			f.write_str("-")?;
			nanos = -nanos;
		}
		let seconds = nanos / NANOS_PER_SECOND;
		let subnanos = nanos % NANOS_PER_SECOND;
		let days = seconds / SECONDS_PER_DAY;
		let secs_of_day = seconds % SECONDS_PER_DAY;
		let hour = secs_of_day / 3600;
		let min = (secs_of_day % 3600) / 60;
		let sec = secs_of_day % 60;

		if days > 0 {
			write!(f, "{}.", days)?;
		}
		write!(f, "{:02}:{:02}:{:02}", hour, min, sec)?;
		if subnanos != 0 {
			write!(f, ".{:09}", subnanos)?;
		}
		Ok(())
	}
}

fn is_leap_year(year: i32) -> bool {
	(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
	match month {
		1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
		4 | 6 | 9 | 11 => 30,
		2 => {
			if is_leap_year(year) {
				29
			} else {
				28
			}
		}
		_ => 0,
	}
}

// Howard Hinnant's civil-date algorithms.
fn ymd_to_days_since_epoch(year: i32, month: u32, day: u32) -> Option<i32> {
	if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
		return None;
	}

	let (y, m) = if month <= 2 {
		(year - 1, month as i32 + 9)
	} else {
		(year, month as i32 - 3)
	};

	let era = if y >= 0 {
		y
	} else {
		y - 399
	} / 400;
	let yoe = y - era * 400;
	let doy = (153 * m + 2) / 5 + day as i32 - 1;
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
	Some(era * 146097 + doe - 719468)
}

fn days_since_epoch_to_ymd(days: i32) -> (i32, u32, u32) {
	let z = days + 719468;
	let era = if z >= 0 {
		z
	} else {
		z - 146096
	} / 146097;
	let doe = z - era * 146097;
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let y = yoe + era * 400;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 {
		mp + 3
	} else {
		mp - 9
	};
	let year = if m <= 2 {
		y + 1
	} else {
		y
	};
	(year, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_epoch_display() {
		assert_eq!(DateTime::from_timestamp(0).to_string(), "1970-01-01T00:00:00Z");
	}

	#[test]
	fn test_ymd_round_trip() {
		let dt = DateTime::from_ymd_hms(2025, 7, 15, 9, 30, 45).unwrap();
		assert_eq!(dt.to_string(), "2025-07-15T09:30:45Z");
	}

	#[test]
	fn test_leap_day() {
		assert!(DateTime::from_ymd_hms(2024, 2, 29, 0, 0, 0).is_some());
		assert!(DateTime::from_ymd_hms(2025, 2, 29, 0, 0, 0).is_none());
	}

	#[test]
	fn test_datetime_timespan_arithmetic() {
		let dt = DateTime::from_ymd_hms(2025, 1, 1, 0, 0, 0).unwrap();
		let later = dt + Timespan::from_days(31);
		assert_eq!(later.to_string(), "2025-02-01T00:00:00Z");
		assert_eq!(later - dt, Timespan::from_days(31));
	}

	#[test]
	fn test_timespan_display() {
		assert_eq!(Timespan::from_hours(26).to_string(), "1.02:00:00");
		assert_eq!(Timespan::from_seconds(-90).to_string(), "-00:01:30");
	}
}
