/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use super::Matrix;
use super::MatrixError;
use crate::cell::Cell;
use crate::collection::Collection;
use crate::content::Content;
use crate::content::Kind;
use crate::names::Names;
use crate::position::Dimension;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

impl Matrix {
    /// Number the distinct selected keys of the matrix. The
    /// numbering has no defined order.
    pub fn names(&self, slice: &Slice) -> Result<Names, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "names", rank = self.rank, %slice);
        Ok(Names::from_positions(
            self.cells.map(|cell| slice.selected(&cell.position)),
        ))
    }

    /// The variable kind of each selected key.
    ///
    /// Kinds of a key merge pairwise: equal kinds are kept, different
    /// kinds generalise to their closest common ancestor. When
    /// `specific` is set any difference yields [`Kind::Mixed`]
    /// instead. The result is a nominal content naming the kind.
    pub fn types(&self, slice: &Slice, specific: bool) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "types", rank = self.rank, %slice, specific);
        let cells = self
            .cells
            .map(|cell| (slice.selected(&cell.position), cell.content.kind()))
            .reduce_by_key(move |left, right| match (left, right) {
                (left, right) if left == right => left,
                _ if specific => Kind::Mixed,
                (left, right) => left.generalise(right),
            })
            .into_map(|(key, kind)| Cell::new(key, Content::nominal(kind.to_string())));
        Ok(Matrix::derived(slice.selected_rank(), cells))
    }

    /// Number of coordinates along `dim`, as a single cell named
    /// after the dimension. Coordinates are deduplicated unless the
    /// caller asserts they are already `distinct`.
    pub fn size(&self, dim: Dimension, distinct: bool) -> Result<Matrix, MatrixError> {
        let index = dim.check(self.rank)?;
        tracing::debug!(operation = "size", rank = self.rank, %dim, distinct);
        let coordinates = self
            .cells
            .map(|cell| cell.position.coordinates()[index].clone());
        let count = if distinct {
            coordinates.count()
        } else {
            coordinates.distinct().count()
        };
        Matrix::from_pairs(1, [((dim.to_string(),), Content::discrete(count as i64))])
    }

    /// Number of distinct coordinates along every dimension, one cell
    /// per dimension.
    pub fn shape(&self) -> Matrix {
        tracing::debug!(operation = "shape", rank = self.rank);
        let cells = (0..self.rank)
            .map(|index| {
                let count = self
                    .cells
                    .map(|cell| cell.position.coordinates()[index].clone())
                    .distinct()
                    .count();
                Cell::new(
                    (Dimension::at(index).to_string(),),
                    Content::discrete(count as i64),
                )
            })
            .collect();
        Matrix::derived(1, Collection::new(cells))
    }

    /// Every position of the dense matrix spanned by the observed
    /// coordinates: the cartesian product, over all dimensions, of
    /// the distinct coordinates along that dimension.
    pub fn domain(&self) -> Collection<Position> {
        tracing::debug!(operation = "domain", rank = self.rank);
        if self.cells.is_empty() {
            return Collection::empty();
        }
        (0..self.rank).fold(Collection::new(vec![Position::empty()]), |domain, index| {
            let coordinates: Collection<Value> = self
                .cells
                .map(|cell| cell.position.coordinates()[index].clone())
                .distinct();
            domain
                .cross(&coordinates)
                .into_map(|(position, coordinate)| position.append(coordinate))
        })
    }

    /// Distinct contents, compared by canonical string.
    pub fn unique(&self) -> Collection<Content> {
        tracing::debug!(operation = "unique", rank = self.rank);
        self.cells
            .map(|cell| cell.content.clone())
            .distinct_by(Content::canonical_string)
    }

    /// Distinct `(selected key, content)` pairs, contents compared by
    /// canonical string.
    pub fn unique_by_slice(
        &self,
        slice: &Slice,
    ) -> Result<Collection<(Position, Content)>, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "unique_by_slice", rank = self.rank, %slice);
        Ok(self
            .cells
            .map(|cell| (slice.selected(&cell.position), cell.content.clone()))
            .distinct_by(|(key, content)| (key.clone(), content.canonical_string())))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::matrix::testing::sales;

    #[test]
    fn test_names() {
        let m = sales();
        let names = m.names(&Slice::over(Dimension::SECOND, 2).unwrap()).unwrap();
        let positions: BTreeSet<_> = names.positions().into_vec().into_iter().collect();
        assert_eq!(
            positions,
            ["apple", "fig", "pear"]
                .into_iter()
                .map(|p| Position::from((p,)))
                .collect()
        );
        assert!(m.names(&Slice::over(Dimension::FIRST, 3).unwrap()).is_err());
    }

    #[test]
    fn test_types() {
        let m = Matrix::from_pairs(
            2,
            [
                ((1, "a"), Content::discrete(1)),
                ((1, "b"), Content::continuous(2.0)),
                ((2, "a"), Content::nominal("x")),
                ((2, "b"), Content::nominal("y")),
                ((3, "a"), Content::discrete(4)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();

        assert_eq!(
            rendered(&m.types(&over, false).unwrap()),
            expect(&[("1", "numerical"), ("2", "nominal"), ("3", "discrete")])
        );
        assert_eq!(
            rendered(&m.types(&over, true).unwrap()),
            expect(&[("1", "mixed"), ("2", "nominal"), ("3", "discrete")])
        );
    }

    #[test]
    fn test_size_and_shape() {
        let m = sales();
        assert_eq!(
            rendered(&m.size(Dimension::SECOND, false).unwrap()),
            expect(&[("Second", "3")])
        );
        // Asserting distinctness counts every coordinate.
        assert_eq!(
            rendered(&m.size(Dimension::SECOND, true).unwrap()),
            expect(&[("Second", "4")])
        );
        assert!(m.size(Dimension::THIRD, false).is_err());
        assert_eq!(
            rendered(&m.shape()),
            expect(&[("First", "2"), ("Second", "3")])
        );
    }

    #[test]
    fn test_domain() {
        let mut domain = sales().domain().into_vec();
        domain.sort();
        assert_eq!(domain.len(), 6);
        assert_eq!(domain[0], Position::from(("north", "apple")));
        assert_eq!(domain[5], Position::from(("south", "pear")));
    }

    #[test]
    fn test_unique() {
        let m = Matrix::from_pairs(
            2,
            [
                ((1, "a"), Content::discrete(1)),
                ((1, "b"), Content::discrete(1)),
                ((2, "a"), Content::continuous(1.0)),
            ],
        )
        .unwrap();
        assert_eq!(m.unique().count(), 2);

        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let mut by_slice: Vec<_> = m
            .unique_by_slice(&over)
            .unwrap()
            .into_vec()
            .into_iter()
            .map(|(key, content)| (key.to_short_string("|"), content.canonical_string()))
            .collect();
        by_slice.sort();
        assert_eq!(
            by_slice,
            vec![
                ("1".to_string(), "discrete|1".to_string()),
                ("2".to_string(), "continuous|1".to_string()),
            ]
        );
    }
}
