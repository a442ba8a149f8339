/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::cell::Cell;
use crate::config;
use crate::content::Content;
use crate::deriver::Deriver;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A single-coordinate remainder as is, a composite one rendered with
/// the configured position separator.
fn remainder_label(remainder: &Position) -> Value {
    match remainder.coordinates() {
        [coordinate] => coordinate.clone(),
        coordinates => Value::Str(
            Position::new(coordinates.to_vec())
                .to_short_string(&config::global::get().position_separator),
        ),
    }
}

/// Distance from `from` to `to`: numeric difference, or days between
/// dates. Composite and mixed remainders have no distance.
fn distance(from: &Position, to: &Position) -> Option<f64> {
    match (from.coordinates(), to.coordinates()) {
        ([Value::Date(from)], [Value::Date(to)]) => {
            Some((*to - *from).num_seconds() as f64 / SECONDS_PER_DAY)
        }
        ([from], [to]) => Some(to.as_f64()? - from.as_f64()?),
        _ => None,
    }
}

/// The slope between consecutive cells: content delta over remainder
/// distance, with dates measured in days. Each slope is placed under
/// `from.to`, the two remainders joined by a dot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gradient;

impl<V: ?Sized> Deriver<V> for Gradient {
    /// The previous remainder and its content, if numeric.
    type State = (Position, Option<f64>);

    fn initialise(
        &self,
        _slice: &Slice,
        cell: &Cell,
        remainder: &Position,
        _value: &V,
    ) -> Self::State {
        (remainder.clone(), cell.content.as_f64())
    }

    fn present(
        &self,
        _slice: &Slice,
        cell: &Cell,
        remainder: &Position,
        (previous, last): Self::State,
        _value: &V,
    ) -> (Self::State, Vec<(Value, Content)>) {
        let current = cell.content.as_f64();
        let slope = match (last, current, distance(&previous, remainder)) {
            (Some(last), Some(current), Some(distance)) if distance != 0.0 => {
                Some((current - last) / distance)
            }
            _ => None,
        };
        let presented = slope
            .map(|slope| {
                let label = format!(
                    "{}.{}",
                    remainder_label(&previous).to_short_string(),
                    remainder_label(remainder).to_short_string()
                );
                (Value::Str(label), Content::continuous(slope))
            })
            .into_iter()
            .collect();
        ((remainder.clone(), current), presented)
    }
}

/// Running total of numeric contents, placed under each remainder
/// after the first. Non-numeric contents are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct CumulativeSum;

impl<V: ?Sized> Deriver<V> for CumulativeSum {
    type State = f64;

    fn initialise(
        &self,
        _slice: &Slice,
        cell: &Cell,
        _remainder: &Position,
        _value: &V,
    ) -> Self::State {
        cell.content.as_f64().unwrap_or(0.0)
    }

    fn present(
        &self,
        _slice: &Slice,
        cell: &Cell,
        remainder: &Position,
        total: Self::State,
        _value: &V,
    ) -> (Self::State, Vec<(Value, Content)>) {
        match cell.content.as_f64() {
            Some(value) => {
                let total = total + value;
                (
                    total,
                    vec![(remainder_label(remainder), Content::continuous(total))],
                )
            }
            None => (total, Vec::new()),
        }
    }
}
