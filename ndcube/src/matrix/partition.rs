/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::hash::Hash;

use super::Matrix;
use super::MatrixError;
use crate::partitioner::Partitioner;
use crate::partitions::Partitions;
use crate::slice::Slice;

impl Matrix {
    /// File every cell under the labels `partitioner` assigns it.
    pub fn partition<P>(&self, partitioner: &P) -> Partitions<P::Label>
    where
        P: Partitioner,
        P::Label: Hash + Eq + Ord + Clone,
    {
        self.partition_with_value(partitioner, &())
    }

    /// [`Matrix::partition`] with a broadcast value.
    pub fn partition_with_value<V: ?Sized, P>(
        &self,
        partitioner: &P,
        value: &V,
    ) -> Partitions<P::Label>
    where
        P: Partitioner<V>,
        P::Label: Hash + Eq + Ord + Clone,
    {
        tracing::debug!(operation = "partition", rank = self.rank);
        let entries = self.cells.flat_map(|cell| {
            partitioner
                .assign(cell, value)
                .into_iter()
                .map(|label| (label, cell.clone()))
                .collect::<Vec<_>>()
        });
        Partitions::from_entries(self.rank, entries)
    }

    /// The cells of `self` and `that` whose selected key occurs in
    /// both matrices.
    pub fn join(&self, slice: &Slice, that: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        self.check_rank(that)?;
        tracing::debug!(operation = "join", rank = self.rank, %slice);
        let keys = |matrix: &Matrix| {
            matrix
                .cells
                .map(|cell| (slice.selected(&cell.position), ()))
                .distinct()
        };
        let common = keys(self)
            .join(keys(that))
            .into_map(|(key, _)| (key, ()));
        let restrict = |matrix: &Matrix| {
            matrix
                .keyed_by(slice)
                .join(common.clone())
                .into_map(|(_, (cell, ()))| cell)
        };
        Ok(Matrix::derived(self.rank, restrict(self).union(restrict(that))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::library::partitioners::BinaryHashSplit;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::matrix::testing::sales;
    use crate::position::Dimension;

    #[test]
    fn test_join() {
        let m = sales();
        let other = Matrix::from_pairs(
            2,
            [
                (("south", "kiwi"), Content::discrete(2)),
                (("east", "kiwi"), Content::discrete(3)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.join(&over, &other).unwrap()),
            expect(&[
                ("south|apple", "30"),
                ("south|fig", "5"),
                ("south|kiwi", "2"),
            ])
        );
    }

    #[test]
    fn test_partition_covers_every_cell_once() {
        let m = sales();
        let split = BinaryHashSplit::new(Dimension::SECOND, 50, "train", "test", 100).unwrap();
        let partitions = m.partition(&split);
        assert_eq!(partitions.len(), m.len());
        assert_eq!(
            partitions.get(&"train").len() + partitions.get(&"test").len(),
            m.len()
        );
    }
}
