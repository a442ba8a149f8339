/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Schema-validated cell contents.
//!
//! A [`Content`] pairs a [`Schema`] with a [`Value`] the schema
//! accepts. Contents are only built through validation
//! ([`Content::new`], [`Schema::decode`]), so an invalid value has no
//! representation: a failed decode is `None`, never an error.
//!
//! Schemas are classified by [`Kind`], which forms a small
//! generalisation lattice:
//!
//! ```text
//!                     Mixed
//!           /           |         \
//!      Numerical   Categorical    Date
//!       /     \      /      \
//! Continuous Discrete Nominal Ordinal
//! ```

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::value::DATE_FORMAT;
use crate::value::Value;

/// The variable kind of a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Top of the lattice; the generalisation of unrelated kinds.
    Mixed,
    Numerical,
    Continuous,
    Discrete,
    Categorical,
    Nominal,
    Ordinal,
    Date,
}

impl Kind {
    /// The immediate generalisation of this kind.
    pub fn parent(self) -> Option<Kind> {
        match self {
            Kind::Continuous | Kind::Discrete => Some(Kind::Numerical),
            Kind::Nominal | Kind::Ordinal => Some(Kind::Categorical),
            Kind::Numerical | Kind::Categorical | Kind::Date => Some(Kind::Mixed),
            Kind::Mixed => None,
        }
    }

    /// Whether `self` equals `other` or lies below it in the lattice.
    pub fn is_specialisation_of(self, other: Kind) -> bool {
        std::iter::successors(Some(self), |kind| kind.parent()).any(|kind| kind == other)
    }

    /// The least common ancestor of `self` and `other`.
    pub fn generalise(self, other: Kind) -> Kind {
        std::iter::successors(Some(self), |kind| kind.parent())
            .find(|&kind| other.is_specialisation_of(kind))
            .unwrap_or(Kind::Mixed)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Mixed => "mixed",
            Kind::Numerical => "numerical",
            Kind::Continuous => "continuous",
            Kind::Discrete => "discrete",
            Kind::Categorical => "categorical",
            Kind::Nominal => "nominal",
            Kind::Ordinal => "ordinal",
            Kind::Date => "date",
        };
        write!(f, "{}", name)
    }
}

/// A schema: a variable kind plus the domain of values it accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Schema {
    /// Real values, optionally restricted to the closed range `[min, max]`.
    Continuous { range: Option<(f64, f64)> },
    /// Integer values, optionally restricted to the closed range `[min, max]`.
    Discrete { range: Option<(i64, i64)> },
    /// Unordered categories, optionally restricted to a domain.
    Nominal { domain: Option<BTreeSet<String>> },
    /// Ordered categories, optionally restricted to a domain.
    Ordinal { domain: Option<BTreeSet<String>> },
    /// Dates parsed with a `chrono` format string.
    Date { format: String },
}

impl Schema {
    pub fn continuous() -> Self {
        Schema::Continuous { range: None }
    }

    pub fn discrete() -> Self {
        Schema::Discrete { range: None }
    }

    pub fn nominal() -> Self {
        Schema::Nominal { domain: None }
    }

    /// A nominal schema accepting only `domain`.
    pub fn nominal_of<I, S>(domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Nominal {
            domain: Some(domain.into_iter().map(Into::into).collect()),
        }
    }

    pub fn ordinal() -> Self {
        Schema::Ordinal { domain: None }
    }

    /// A date schema using the `%Y-%m-%d` format.
    pub fn date() -> Self {
        Schema::Date {
            format: DATE_FORMAT.to_string(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Schema::Continuous { .. } => Kind::Continuous,
            Schema::Discrete { .. } => Kind::Discrete,
            Schema::Nominal { .. } => Kind::Nominal,
            Schema::Ordinal { .. } => Kind::Ordinal,
            Schema::Date { .. } => Kind::Date,
        }
    }

    /// Validate (and where lossless, coerce) `value` against this
    /// schema.
    pub fn validate(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (Schema::Continuous { range }, value) => {
                let v = value.as_f64()?;
                match range {
                    Some((min, max)) if v < *min || v > *max => None,
                    _ => Some(Value::Double(v)),
                }
            }
            (Schema::Discrete { range }, Value::Long(v)) => match range {
                Some((min, max)) if v < *min || v > *max => None,
                _ => Some(Value::Long(v)),
            },
            (Schema::Nominal { domain } | Schema::Ordinal { domain }, Value::Str(v)) => {
                match domain {
                    Some(domain) if !domain.contains(&v) => None,
                    _ => Some(Value::Str(v)),
                }
            }
            (Schema::Date { .. }, Value::Date(v)) => Some(Value::Date(v)),
            _ => None,
        }
    }

    /// Decode the short-string form of a value under this schema.
    pub fn decode(&self, s: &str) -> Option<Content> {
        let value = match self {
            Schema::Continuous { .. } => Value::Double(s.trim().parse().ok()?),
            Schema::Discrete { .. } => Value::Long(s.trim().parse().ok()?),
            Schema::Nominal { .. } | Schema::Ordinal { .. } => Value::Str(s.to_string()),
            Schema::Date { format } => Value::Date(parse_date(s.trim(), format)?),
        };
        Content::new(self.clone(), value)
    }
}

fn parse_date(s: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, format)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Continuous {
                range: Some((min, max)),
            } => write!(f, "continuous({}:{})", min, max),
            Schema::Discrete { range: Some((min, max)) } => write!(f, "discrete({}:{})", min, max),
            Schema::Nominal {
                domain: Some(domain),
            } => write!(f, "nominal({})", domain.iter().join(",")),
            Schema::Ordinal {
                domain: Some(domain),
            } => write!(f, "ordinal({})", domain.iter().join(",")),
            Schema::Date { format } => write!(f, "date({})", format),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// A validated value together with its schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    schema: Schema,
    value: Value,
}

impl Content {
    /// Build a content, returning `None` if `schema` rejects `value`.
    pub fn new(schema: Schema, value: Value) -> Option<Self> {
        let value = schema.validate(value)?;
        Some(Self { schema, value })
    }

    pub fn continuous(value: f64) -> Self {
        Self {
            schema: Schema::continuous(),
            value: Value::Double(value),
        }
    }

    pub fn discrete(value: i64) -> Self {
        Self {
            schema: Schema::discrete(),
            value: Value::Long(value),
        }
    }

    pub fn nominal(value: impl Into<String>) -> Self {
        Self {
            schema: Schema::nominal(),
            value: Value::Str(value.into()),
        }
    }

    pub fn date(value: NaiveDateTime) -> Self {
        Self {
            schema: Schema::date(),
            value: Value::Date(value),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> Kind {
        self.schema.kind()
    }

    pub fn to_short_string(&self) -> String {
        self.value.to_short_string()
    }

    /// Kind-qualified rendering; distinct contents of a schema family
    /// have distinct canonical strings.
    pub fn canonical_string(&self) -> String {
        format!("{}|{}", self.schema, self.value.to_short_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        self.value.as_date().copied()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
