/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Labeled sub-matrices.

use std::hash::Hash;

use crate::cell::Cell;
use crate::collection::Collection;
use crate::matrix::Matrix;
use crate::matrix::MatrixError;
use crate::position::PositionError;

/// A multi-map from labels to the cells of sub-matrices of a single
/// rank. A cell may be filed under any number of labels.
#[derive(Clone, Debug)]
pub struct Partitions<L> {
    rank: usize,
    entries: Collection<(L, Cell)>,
}

impl<L> Partitions<L>
where
    L: Hash + Eq + Ord + Clone,
{
    /// An empty registry for sub-matrices of `rank`.
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            entries: Collection::empty(),
        }
    }

    pub(crate) fn from_entries(rank: usize, entries: Collection<(L, Cell)>) -> Self {
        Self { rank, entries }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn entries(&self) -> &Collection<(L, Cell)> {
        &self.entries
    }

    /// Number of `(label, cell)` entries.
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File every cell of `matrix` under `label`, next to whatever the
    /// label already holds.
    pub fn add(self, label: L, matrix: &Matrix) -> Result<Self, MatrixError> {
        self.check(matrix)?;
        let added = matrix.cells().map(|cell| (label.clone(), cell.clone()));
        Ok(Self {
            rank: self.rank,
            entries: self.entries.union(added),
        })
    }

    /// The sub-matrix filed under `label`.
    pub fn get(&self, label: &L) -> Matrix {
        let cells = self
            .entries
            .flat_map(|(candidate, cell)| (candidate == label).then(|| cell.clone()));
        Matrix::derived(self.rank, cells)
    }

    /// Distinct labels.
    pub fn labels(&self) -> Collection<L> {
        self.entries.keys().distinct()
    }

    /// Drop every entry filed under `label`.
    pub fn remove(self, label: &L) -> Self {
        Self {
            rank: self.rank,
            entries: self.entries.into_filter(|(candidate, _)| candidate != label),
        }
    }

    /// Apply `f` to the sub-matrix of each of `labels` and file the
    /// results under the same labels. All results must share a rank.
    pub fn for_all(
        &self,
        labels: &[L],
        f: impl Fn(&Matrix) -> Result<Matrix, MatrixError>,
    ) -> Result<Partitions<L>, MatrixError> {
        tracing::debug!(labels = labels.len(), rank = self.rank, "applying to partitions");
        let mut result: Option<Partitions<L>> = None;
        for label in labels {
            let matrix = f(&self.get(label))?;
            let partitions = match result.take() {
                Some(partitions) => partitions,
                None => Partitions::new(matrix.rank()),
            };
            result = Some(partitions.add(label.clone(), &matrix)?);
        }
        Ok(result.unwrap_or_else(|| Partitions::new(self.rank)))
    }

    fn check(&self, matrix: &Matrix) -> Result<(), MatrixError> {
        if matrix.rank() != self.rank {
            return Err(PositionError::RankMismatch {
                expected: self.rank,
                got: matrix.rank(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::library::reducers::Sum;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::matrix::testing::sales;
    use crate::position::Dimension;
    use crate::slice::Slice;

    #[test]
    fn test_add_get_remove() {
        let m = sales();
        let extra = Matrix::from_pairs(2, [(("east", "kiwi"), Content::discrete(1))]).unwrap();
        let partitions = Partitions::new(2)
            .add("all", &m)
            .unwrap()
            .add("all", &extra)
            .unwrap()
            .add("extra", &extra)
            .unwrap();
        assert_eq!(partitions.len(), 6);
        assert_eq!(partitions.get(&"all").len(), 5);

        let mut labels = partitions.labels().into_vec();
        labels.sort();
        assert_eq!(labels, vec!["all", "extra"]);

        let partitions = partitions.remove(&"all");
        assert_eq!(partitions.len(), 1);
        assert!(partitions.get(&"all").is_empty());

        let flat = Matrix::from_pairs(1, [(("x",), Content::discrete(1))]).unwrap();
        assert!(partitions.add("flat", &flat).is_err());
    }

    #[test]
    fn test_for_all() {
        let partitions = Partitions::new(2).add("sales", &sales()).unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let totals = partitions
            .for_all(&["sales"], |matrix| matrix.reduce(&over, &Sum))
            .unwrap();
        assert_eq!(totals.rank(), 1);
        assert_eq!(
            rendered(&totals.get(&"sales")),
            expect(&[("north", "30"), ("south", "35")])
        );
    }
}
