/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Pairwise operators.
//!
//! A pairwise computation pairs every two cells that share a
//! remainder and hands them to an [`Operator`]. Which pairs are
//! considered is decided by a [`Comparer`] on the selected keys of
//! the two cells, so an operator never sees pairs the caller did not
//! ask for (e.g. both orders of a symmetric computation).

use serde::Deserialize;
use serde::Serialize;

use crate::cell::Cell;
use crate::config;
use crate::content::Content;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

/// Compute contents from a pair of cells sharing `remainder`. Each
/// output content is placed under `remainder` prefixed with the
/// returned coordinate.
pub trait Operator<V: ?Sized = ()> {
    fn compute(
        &self,
        slice: &Slice,
        left: &Cell,
        right: &Cell,
        remainder: &Position,
        value: &V,
    ) -> Vec<(Value, Content)>;
}

/// Which `(left, right)` pairs of selected keys a pairwise
/// computation visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparer {
    /// Every pair.
    All,
    /// Only `left == right`.
    Diagonal,
    /// Only `left > right`.
    Upper,
    /// Only `left >= right`.
    UpperDiagonal,
    /// Only `left < right`.
    Lower,
    /// Only `left <= right`.
    LowerDiagonal,
}

impl Comparer {
    pub fn keep(self, left: &Position, right: &Position) -> bool {
        match self {
            Comparer::All => true,
            Comparer::Diagonal => left == right,
            Comparer::Upper => left > right,
            Comparer::UpperDiagonal => left >= right,
            Comparer::Lower => left < right,
            Comparer::LowerDiagonal => left <= right,
        }
    }
}

/// The coordinate naming a pair: `(left<symbol>right)`, where each
/// side is the selected key of its cell rendered with the configured
/// position separator.
pub fn pair_label(slice: &Slice, left: &Cell, right: &Cell, symbol: &str) -> Value {
    let separator = config::global::get().position_separator;
    Value::Str(format!(
        "({}{}{})",
        slice.selected(&left.position).to_short_string(&separator),
        symbol,
        slice.selected(&right.position).to_short_string(&separator)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Dimension;

    #[test]
    fn test_comparer() {
        let a = Position::from((1,));
        let b = Position::from((2,));
        assert!(Comparer::All.keep(&a, &b));
        assert!(Comparer::Diagonal.keep(&a, &a));
        assert!(!Comparer::Diagonal.keep(&a, &b));
        assert!(Comparer::Upper.keep(&b, &a));
        assert!(!Comparer::Upper.keep(&a, &a));
        assert!(Comparer::UpperDiagonal.keep(&a, &a));
        assert!(Comparer::Lower.keep(&a, &b));
        assert!(Comparer::LowerDiagonal.keep(&b, &b));
        assert!(!Comparer::LowerDiagonal.keep(&b, &a));
    }

    #[test]
    fn test_pair_label() {
        let slice = Slice::along(Dimension::THIRD, 3).unwrap();
        let left = Cell::new((1, "a", "x"), Content::discrete(1));
        let right = Cell::new((2, "b", "x"), Content::discrete(2));
        assert_eq!(
            pair_label(&slice, &left, &right, "-"),
            Value::from("(1|a-2|b)")
        );
    }
}
