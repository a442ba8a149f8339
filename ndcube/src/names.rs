/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Dictionary encoding of positions.

use crate::collection::Collection;
use crate::position::Position;

/// A numbering of distinct positions.
///
/// Indices are unique within a registry. Unless the registry was
/// [renumbered](Names::renumber), they carry no order.
#[derive(Clone, Debug)]
pub struct Names {
    entries: Collection<(Position, u64)>,
}

impl Names {
    /// Number the distinct positions of `positions`.
    pub fn from_positions(positions: Collection<Position>) -> Self {
        Self {
            entries: positions.distinct().zip_with_index(),
        }
    }

    pub fn entries(&self) -> &Collection<(Position, u64)> {
        &self.entries
    }

    pub fn positions(&self) -> Collection<Position> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, position: &Position) -> Option<u64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == position)
            .map(|(_, index)| *index)
    }

    /// All entries, ordered by index.
    pub fn to_vec(&self) -> Vec<(Position, u64)> {
        let mut entries: Vec<_> = self.entries.iter().cloned().collect();
        entries.sort_by_key(|(_, index)| *index);
        entries
    }

    /// Renumber densely from zero, in position order.
    pub fn renumber(self) -> Self {
        Self {
            entries: self
                .entries
                .sort_by_key(|(position, _)| position.clone())
                .keys()
                .zip_with_index(),
        }
    }

    /// Give `position` index zero. Positions that preceded it move
    /// up by one; the rest keep their index. A registry without
    /// `position` is returned unchanged.
    pub fn move_to_front(self, position: &Position) -> Self {
        let Some(current) = self.index_of(position) else {
            return self;
        };
        tracing::debug!(%position, current, "moving name to front");
        Self {
            entries: self.entries.into_map(|(candidate, index)| {
                if &candidate == position {
                    (candidate, 0)
                } else if index < current {
                    (candidate, index + 1)
                } else {
                    (candidate, index)
                }
            }),
        }
    }

    /// Give `position` an index above every other index.
    ///
    /// The largest index `M` is computed over the whole registry
    /// first. `position` then takes `M + 1`, unless it already holds
    /// `M`. No other index changes, so indices stay unique. A
    /// registry without `position` is returned unchanged.
    pub fn move_to_back(self, position: &Position) -> Self {
        if self.index_of(position).is_none() {
            return self;
        }
        let max = self
            .entries
            .fold(0, |max, (_, index)| max.max(*index));
        tracing::debug!(%position, max, "moving name to back");
        Self {
            entries: self.entries.into_map(|(candidate, index)| {
                if &candidate == position && index != max {
                    (candidate, max + 1)
                } else {
                    (candidate, index)
                }
            }),
        }
    }

    /// Keep the entries whose position satisfies `predicate` (or, if
    /// `keep` is false, those that do not). Indices are kept as is.
    pub fn filter(self, predicate: impl Fn(&Position) -> bool, keep: bool) -> Self {
        Self {
            entries: self
                .entries
                .into_filter(|(position, _)| predicate(position) == keep),
        }
    }
}
