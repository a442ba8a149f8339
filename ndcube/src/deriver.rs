/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Derivers compute ordered, windowed statistics.
//!
//! The cells of a group (same selected key) are visited in ascending
//! order of their remainder, one at a time, carrying a state. The
//! first cell only seeds the state through [`Deriver::initialise`];
//! every later cell goes through [`Deriver::present`], which may emit
//! output. A group with a single cell therefore produces nothing.
//!
//! Within a group the scan is strictly sequential. Different groups
//! are independent.

use crate::cell::Cell;
use crate::content::Content;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

pub trait Deriver<V: ?Sized = ()> {
    type State;

    /// Seed the state from the first cell of a group.
    fn initialise(
        &self,
        slice: &Slice,
        cell: &Cell,
        remainder: &Position,
        value: &V,
    ) -> Self::State;

    /// Advance the state with the next cell of a group. Each output
    /// content is placed under the group key extended with the
    /// returned coordinate.
    fn present(
        &self,
        slice: &Slice,
        cell: &Cell,
        remainder: &Position,
        state: Self::State,
        value: &V,
    ) -> (Self::State, Vec<(Value, Content)>);
}
