/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Typed literals used both as coordinates of a [`Position`] and as
//! the payload of a [`Content`].
//!
//! [`Position`]: crate::Position
//! [`Content`]: crate::Content

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use enum_as_inner::EnumAsInner;
use serde::Deserialize;
use serde::Serialize;

/// Format used to render dates whose time component is midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used to render dates carrying a time of day.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed literal.
///
/// Values are totally ordered. Numbers come first and are compared
/// by magnitude across `Long` and `Double`; a `Long` sorts before a
/// `Double` of the same magnitude. Strings follow, then dates.
/// Doubles are compared with [`f64::total_cmp`], so every value (NaN
/// included) has a place in the order and equality agrees with it.
#[derive(Clone, Debug, Serialize, Deserialize, EnumAsInner)]
pub enum Value {
    /// A signed integer.
    Long(i64),
    /// A floating point number.
    Double(f64),
    /// A string.
    Str(String),
    /// A date, optionally with a time of day.
    Date(NaiveDateTime),
}

impl Value {
    fn variant_rank(&self) -> u8 {
        match self {
            Value::Long(_) => 0,
            Value::Double(_) => 1,
            Value::Str(_) => 2,
            Value::Date(_) => 3,
        }
    }

    /// The short-string rendering of this value. Dates at midnight
    /// render without their time component.
    pub fn to_short_string(&self) -> String {
        match self {
            Value::Long(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Str(v) => v.clone(),
            Value::Date(v) if v.time() == NaiveTime::MIN => v.format(DATE_FORMAT).to_string(),
            Value::Date(v) => v.format(DATE_TIME_FORMAT).to_string(),
        }
    }

    /// Numeric view of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Long(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of this value. Doubles convert only when they
    /// are integral and within the range of `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        // 2^63 is exact as a double; -2^63 is the only value at the
        // lower bound that fits.
        const BOUND: f64 = 9_223_372_036_854_775_808.0;
        match self {
            Value::Long(v) => Some(*v),
            Value::Double(v) if v.fract() == 0.0 && (-BOUND..BOUND).contains(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Stable 64-bit hash of the short string (FNV-1a). Unlike
    /// [`Hash`], this does not depend on the hasher or the process,
    /// so it can drive deterministic assignment of values to buckets.
    pub fn hash_code(&self) -> i64 {
        const OFFSET: u64 = 0xcbf29ce484222325;
        const PRIME: u64 = 0x100000001b3;
        self.to_short_string()
            .bytes()
            .fold(OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(PRIME)) as i64
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Long(a), Value::Double(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Value::Double(a), Value::Long(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant_rank().hash(state);
        match self {
            Value::Long(v) => v.hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Str(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_short_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Long(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Long(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v.and_time(NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Value {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().into()
    }

    #[test]
    fn test_short_strings() {
        assert_eq!(Value::from(42).to_short_string(), "42");
        assert_eq!(Value::from(1.5).to_short_string(), "1.5");
        assert_eq!(Value::from(2.0).to_short_string(), "2");
        assert_eq!(Value::from("abc").to_short_string(), "abc");
        assert_eq!(date(2020, 1, 1).to_short_string(), "2020-01-01");

        let noon = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(Value::from(noon).to_short_string(), "2020-01-01 12:30:00");
    }

    #[test]
    fn test_ordering_is_total() {
        let mut values = vec![
            date(2020, 1, 1),
            Value::from("b"),
            Value::from(f64::NAN),
            Value::from(3),
            Value::from("a"),
            Value::from(-1.0),
            Value::from(1),
        ];
        values.sort();
        assert_eq!(
            values[..6],
            [
                Value::from(-1.0),
                Value::from(1),
                Value::from(3),
                Value::from(f64::NAN),
                Value::from("a"),
                Value::from("b"),
            ]
        );
        assert!(values[6].is_date());
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
    }

    #[test]
    fn test_numbers_order_by_magnitude() {
        assert!(Value::from(2.5) < Value::from(3));
        assert!(Value::from(3) < Value::from(3.5));
        assert!(Value::from(3) < Value::from(3.0));
        assert_ne!(Value::from(3), Value::from(3.0));
        assert!(Value::from(i64::MAX) < Value::from("a"));
        assert!(Value::from(f64::INFINITY) < Value::from("a"));

        let mut values = vec![Value::from(2), Value::from(1.5), Value::from(0), Value::from(0.5)];
        values.sort();
        assert_eq!(
            values,
            vec![Value::from(0), Value::from(0.5), Value::from(1.5), Value::from(2)]
        );
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(3.0).as_i64(), Some(3));
        assert_eq!(Value::from(3.5).as_i64(), None);
        assert_eq!(Value::from(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
        assert_eq!(Value::from(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Value::from(1e300).as_i64(), None);
        assert_eq!(Value::from(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::from("3").as_f64(), None);
    }

    #[test]
    fn test_hash_code_is_stable() {
        assert_eq!(Value::from(1).hash_code(), Value::from(1).hash_code());
        assert_eq!(Value::from(1).hash_code(), Value::from("1").hash_code());
        assert_ne!(Value::from(1).hash_code(), Value::from(2).hash_code());
    }
}
