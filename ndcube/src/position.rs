/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::value::Value;

/// The type of error for coordinate algebra.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PositionError {
    #[error("{dim} out of range for {rank}-dimensional position")]
    InvalidDimension { dim: Dimension, rank: usize },

    #[error("{dim} used twice where distinct dimensions are required")]
    SameDimension { dim: Dimension },

    #[error("order {order:?} is not a permutation of {rank} dimensions")]
    InvalidPermutation { order: Vec<usize>, rank: usize },

    #[error("rank mismatch: expected {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },
}

/// A zero-based dimension index.
///
/// The first five dimensions have names; the type itself does not
/// bound dimensionality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dimension(usize);

impl Dimension {
    pub const FIRST: Dimension = Dimension(0);
    pub const SECOND: Dimension = Dimension(1);
    pub const THIRD: Dimension = Dimension(2);
    pub const FOURTH: Dimension = Dimension(3);
    pub const FIFTH: Dimension = Dimension(4);

    /// The dimension at zero-based `index`.
    pub fn at(index: usize) -> Self {
        Dimension(index)
    }

    /// The zero-based index of this dimension.
    pub fn index(self) -> usize {
        self.0
    }

    /// Validate this dimension against a positional rank, returning
    /// its index.
    pub fn check(self, rank: usize) -> Result<usize, PositionError> {
        if self.0 < rank {
            Ok(self.0)
        } else {
            Err(PositionError::InvalidDimension { dim: self, rank })
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "First"),
            1 => write!(f, "Second"),
            2 => write!(f, "Third"),
            3 => write!(f, "Fourth"),
            4 => write!(f, "Fifth"),
            n => write!(f, "Dimension{}", n + 1),
        }
    }
}

/// An ordered tuple of coordinates addressing one cell of a matrix.
///
/// The number of coordinates is the position's rank; dimension `i`
/// is the `i`-th coordinate. Equality and ordering are structural
/// (lexicographic over coordinates).
///
/// Operations that change dimensionality return new positions and
/// validate their dimension arguments:
/// ```
/// # use ndcube::Dimension;
/// # use ndcube::Position;
/// let p = Position::from((1, "a", "x"));
/// assert_eq!(p.remove(Dimension::SECOND).unwrap(), Position::from((1, "x")));
/// assert!(p.remove(Dimension::FOURTH).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    coordinates: Vec<Value>,
}

impl Position {
    pub fn new(coordinates: Vec<Value>) -> Self {
        Self { coordinates }
    }

    /// The rank 0 position.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rank(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> &[Value] {
        &self.coordinates
    }

    pub fn into_coordinates(self) -> Vec<Value> {
        self.coordinates
    }

    /// The coordinate at `dim`.
    pub fn get(&self, dim: Dimension) -> Result<&Value, PositionError> {
        let index = dim.check(self.rank())?;
        Ok(&self.coordinates[index])
    }

    /// Replace the coordinate at `dim`.
    pub fn update(&self, dim: Dimension, value: Value) -> Result<Self, PositionError> {
        let index = dim.check(self.rank())?;
        Ok(self.replace_at(index, value))
    }

    /// [`Position::update`] on a validated index.
    pub(crate) fn replace_at(&self, index: usize, value: Value) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates[index] = value;
        Self { coordinates }
    }

    /// Remove the coordinate at `dim`; the result has rank `N - 1`.
    pub fn remove(&self, dim: Dimension) -> Result<Self, PositionError> {
        let index = dim.check(self.rank())?;
        let mut coordinates = self.coordinates.clone();
        coordinates.remove(index);
        Ok(Self { coordinates })
    }

    /// Append a coordinate; the result has rank `N + 1`.
    pub fn append(&self, value: impl Into<Value>) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates.push(value.into());
        Self { coordinates }
    }

    /// Prepend a coordinate; the result has rank `N + 1`.
    pub fn prepend(&self, value: impl Into<Value>) -> Self {
        let mut coordinates = Vec::with_capacity(self.rank() + 1);
        coordinates.push(value.into());
        coordinates.extend(self.coordinates.iter().cloned());
        Self { coordinates }
    }

    /// Merge the coordinate at `dim` into the coordinate at `into`.
    ///
    /// The merged coordinate is the string
    /// `into.to_short_string() + separator + dim.to_short_string()`
    /// stored at the location of `into`; `dim` is removed, so the
    /// result has rank `N - 1`.
    pub fn melt(
        &self,
        dim: Dimension,
        into: Dimension,
        separator: &str,
    ) -> Result<Self, PositionError> {
        let (from, to) = check_melt(dim, into, self.rank())?;
        Ok(self.merge_at(from, to, separator))
    }

    /// [`Position::melt`] on validated indices.
    pub(crate) fn merge_at(&self, from: usize, to: usize, separator: &str) -> Self {
        let merged = format!(
            "{}{}{}",
            self.coordinates[to].to_short_string(),
            separator,
            self.coordinates[from].to_short_string()
        );
        let mut coordinates = self.coordinates.clone();
        coordinates[to] = Value::Str(merged);
        coordinates.remove(from);
        Self { coordinates }
    }

    /// Reorder coordinates: coordinate `i` of the result is
    /// coordinate `order[i]` of `self`. `order` must name every
    /// dimension exactly once.
    pub fn permute(&self, order: &[Dimension]) -> Result<Self, PositionError> {
        let indices = check_permutation(order, self.rank())?;
        Ok(self.pick(&indices))
    }

    /// The sub-position made of the coordinates at `dims`, in that
    /// order.
    pub fn select(&self, dims: &[Dimension]) -> Result<Self, PositionError> {
        let indices = dims
            .iter()
            .map(|dim| dim.check(self.rank()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.pick(&indices))
    }

    /// [`Position::select`] on validated indices.
    pub(crate) fn pick(&self, indices: &[usize]) -> Self {
        Self {
            coordinates: indices
                .iter()
                .map(|&index| self.coordinates[index].clone())
                .collect(),
        }
    }

    /// Render all coordinates as short strings joined by `separator`.
    pub fn to_short_string(&self, separator: &str) -> String {
        self.coordinates
            .iter()
            .map(Value::to_short_string)
            .join(separator)
    }
}

/// Validate the dimensions of a melt, returning `(from, to)`
/// indices.
pub(crate) fn check_melt(
    dim: Dimension,
    into: Dimension,
    rank: usize,
) -> Result<(usize, usize), PositionError> {
    let from = dim.check(rank)?;
    let to = into.check(rank)?;
    if from == to {
        return Err(PositionError::SameDimension { dim });
    }
    Ok((from, to))
}

/// Validate that `order` names each of `rank` dimensions exactly
/// once, returning it as indices.
pub(crate) fn check_permutation(
    order: &[Dimension],
    rank: usize,
) -> Result<Vec<usize>, PositionError> {
    let indices: Vec<usize> = order.iter().map(|dim| dim.index()).collect();
    let is_permutation =
        indices.len() == rank && indices.iter().sorted().enumerate().all(|(i, &index)| i == index);
    if !is_permutation {
        return Err(PositionError::InvalidPermutation {
            order: indices,
            rank,
        });
    }
    Ok(indices)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.to_short_string(", "))
    }
}

impl From<Vec<Value>> for Position {
    fn from(coordinates: Vec<Value>) -> Self {
        Self::new(coordinates)
    }
}

macro_rules! position_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> From<($($name,)+)> for Position {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self::new(vec![$($name.into()),+])
            }
        }
    };
}

position_from_tuple!(A);
position_from_tuple!(A, B);
position_from_tuple!(A, B, C);
position_from_tuple!(A, B, C, D);
position_from_tuple!(A, B, C, D, E);
