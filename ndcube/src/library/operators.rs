/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::cell::Cell;
use crate::content::Content;
use crate::operator::Operator;
use crate::operator::pair_label;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

/// Binary arithmetic on numeric contents, placed under `(l<op>r)`.
/// Pairs with a non-numeric side, and divisions by zero, yield
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arithmetic {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Arithmetic {
    fn symbol(self) -> &'static str {
        match self {
            Arithmetic::Plus => "+",
            Arithmetic::Minus => "-",
            Arithmetic::Times => "*",
            Arithmetic::Divide => "/",
        }
    }

    fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Arithmetic::Plus => Some(left + right),
            Arithmetic::Minus => Some(left - right),
            Arithmetic::Times => Some(left * right),
            Arithmetic::Divide if right == 0.0 => None,
            Arithmetic::Divide => Some(left / right),
        }
    }
}

impl<V: ?Sized> Operator<V> for Arithmetic {
    fn compute(
        &self,
        slice: &Slice,
        left: &Cell,
        right: &Cell,
        _remainder: &Position,
        _value: &V,
    ) -> Vec<(Value, Content)> {
        let result = left
            .content
            .as_f64()
            .zip(right.content.as_f64())
            .and_then(|(l, r)| self.apply(l, r));
        result
            .map(|result| {
                (
                    pair_label(slice, left, right, self.symbol()),
                    Content::continuous(result),
                )
            })
            .into_iter()
            .collect()
    }
}

/// Join the short strings of both contents with `separator` into a
/// nominal content, placed under `(l<separator>r)`.
#[derive(Clone, Debug)]
pub struct Concatenate {
    separator: String,
}

impl Concatenate {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl<V: ?Sized> Operator<V> for Concatenate {
    fn compute(
        &self,
        slice: &Slice,
        left: &Cell,
        right: &Cell,
        _remainder: &Position,
        _value: &V,
    ) -> Vec<(Value, Content)> {
        let joined = format!(
            "{}{}{}",
            left.content.to_short_string(),
            self.separator,
            right.content.to_short_string()
        );
        vec![(
            pair_label(slice, left, right, &self.separator),
            Content::nominal(joined),
        )]
    }
}
