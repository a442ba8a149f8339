/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Partitioned bulk collections.
//!
//! [`Collection`] is the seam between the matrix operators and the
//! engine that executes them. Operators are written exclusively in
//! terms of the declarative primitives defined here (map, filter,
//! distinct, group-by-key, reduce-by-key, joins, cross product,
//! sorted grouping, fold), so they make no assumption about where
//! elements live or in which order partitions are processed.
//!
//! Elements are spread over a fixed number of partitions. Keyed
//! primitives first *shuffle* their input: each `(key, value)` pair
//! moves to the partition selected by hashing its key, after which
//! every key is local to exactly one partition. Nothing here dedups
//! implicitly; multiplicity is preserved unless an operation
//! (`distinct`, `reduce_by_key`) says otherwise.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use crate::config;

/// A non-empty sequence of values, as produced by grouping. A group
/// exists only because at least one value carried its key.
#[derive(Clone, Debug, PartialEq)]
pub struct NonEmpty<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmpty<T> {
    pub fn new(head: T) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    pub fn first(&self) -> &T {
        &self.head
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Split into the first value and the rest.
    pub fn split(self) -> (T, Vec<T>) {
        (self.head, self.tail)
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        values.push(self.head);
        values.extend(self.tail);
        values
    }

    /// Stable sort by `key`.
    pub fn sort_by_key<K: Ord>(mut self, key: impl Fn(&T) -> K) -> Self {
        self.tail.sort_by_key(|value| key(value));
        let head_key = key(&self.head);
        let at = self.tail.partition_point(|value| key(value) < head_key);
        if at > 0 {
            let head = std::mem::replace(&mut self.head, self.tail.remove(0));
            self.tail.insert(at - 1, head);
        }
        self
    }

    /// Fold the values with `f`; no identity element is needed.
    pub fn reduce(self, f: impl Fn(T, T) -> T) -> T {
        self.tail.into_iter().fold(self.head, f)
    }
}

/// A partitioned bulk collection.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    partitions: Vec<Vec<T>>,
}

fn partition_of<K: Hash>(key: &K, partitions: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % partitions as u64) as usize
}

impl<T> Collection<T> {
    /// Spread `items` over the globally configured number of
    /// partitions.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_partitions(items, config::global::get().partitions)
    }

    /// Spread `items` round-robin over `partitions` partitions.
    pub fn with_partitions(items: Vec<T>, partitions: usize) -> Self {
        let partitions = partitions.max(1);
        let mut result: Vec<Vec<T>> = (0..partitions).map(|_| Vec::new()).collect();
        for (i, item) in items.into_iter().enumerate() {
            result[i % partitions].push(item);
        }
        Self { partitions: result }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn count(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.partitions.iter().flatten()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.partitions.into_iter().flatten().collect()
    }

    fn from_partitions(partitions: Vec<Vec<T>>) -> Self {
        Self { partitions }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Collection<U> {
        Collection::from_partitions(
            self.partitions
                .iter()
                .map(|partition| partition.iter().map(&f).collect())
                .collect(),
        )
    }

    pub fn flat_map<U, I>(&self, f: impl Fn(&T) -> I) -> Collection<U>
    where
        I: IntoIterator<Item = U>,
    {
        Collection::from_partitions(
            self.partitions
                .iter()
                .map(|partition| partition.iter().flat_map(&f).collect())
                .collect(),
        )
    }

    /// Consuming variant of [`Collection::map`].
    pub fn into_map<U>(self, f: impl Fn(T) -> U) -> Collection<U> {
        Collection::from_partitions(
            self.partitions
                .into_iter()
                .map(|partition| partition.into_iter().map(&f).collect())
                .collect(),
        )
    }

    /// Consuming variant of [`Collection::flat_map`].
    pub fn into_flat_map<U, I>(self, f: impl Fn(T) -> I) -> Collection<U>
    where
        I: IntoIterator<Item = U>,
    {
        Collection::from_partitions(
            self.partitions
                .into_iter()
                .map(|partition| partition.into_iter().flat_map(&f).collect())
                .collect(),
        )
    }

    pub fn into_filter(self, f: impl Fn(&T) -> bool) -> Self {
        Self::from_partitions(
            self.partitions
                .into_iter()
                .map(|partition| partition.into_iter().filter(|item| f(item)).collect())
                .collect(),
        )
    }

    pub fn filter(&self, f: impl Fn(&T) -> bool) -> Self
    where
        T: Clone,
    {
        self.flat_map(|item| f(item).then(|| item.clone()))
    }

    /// Concatenate two collections; multiplicity is preserved.
    pub fn union(self, other: Collection<T>) -> Self {
        let mut partitions = self.partitions;
        for (i, partition) in other.partitions.into_iter().enumerate() {
            match partitions.get_mut(i) {
                Some(existing) => existing.extend(partition),
                None => partitions.push(partition),
            }
        }
        Self::from_partitions(partitions)
    }

    /// Fold every element into an accumulator. Partitions are folded
    /// in order, so `f` sees the whole collection.
    pub fn fold<A>(&self, init: A, f: impl Fn(A, &T) -> A) -> A {
        self.iter().fold(init, f)
    }

    /// Pair every element of `self` with every element of `other`.
    pub fn cross<U: Clone>(&self, other: &Collection<U>) -> Collection<(T, U)>
    where
        T: Clone,
    {
        let right: Vec<U> = other.iter().cloned().collect();
        self.flat_map(|left| {
            right
                .iter()
                .map(|right| (left.clone(), right.clone()))
                .collect::<Vec<_>>()
        })
    }

    /// Number every element with a unique, dense index. Indices follow
    /// partition order and carry no other meaning.
    pub fn zip_with_index(self) -> Collection<(T, u64)> {
        let mut next = 0u64;
        let partitions = self
            .partitions
            .into_iter()
            .map(|partition| {
                partition
                    .into_iter()
                    .map(|item| {
                        let index = next;
                        next += 1;
                        (item, index)
                    })
                    .collect()
            })
            .collect();
        Collection::from_partitions(partitions)
    }

    /// Remove duplicate elements.
    pub fn distinct(self) -> Self
    where
        T: Hash + Eq + Ord + Clone,
    {
        let n = self.num_partitions();
        self.into_map(|item| (item, ()))
            .shuffle(n)
            .into_map_partitions(|partition| {
                let mut seen = HashSet::new();
                partition
                    .into_iter()
                    .filter_map(|(item, ())| seen.insert(item.clone()).then_some(item))
                    .collect()
            })
    }

    /// Remove elements with duplicate `key`s, keeping the first
    /// element to arrive for each key. The key defines identity, so it
    /// must be injective over the elements meant to be distinct.
    pub fn distinct_by<K>(self, key: impl Fn(&T) -> K) -> Self
    where
        K: Ord + Hash + Clone,
    {
        let n = self.num_partitions();
        self.into_map(|item| (key(&item), item))
            .shuffle(n)
            .into_map_partitions(|partition| {
                let mut seen = BTreeMap::new();
                for (k, item) in partition {
                    seen.entry(k).or_insert(item);
                }
                seen.into_values().collect()
            })
    }

    /// Order the whole collection by `key` (stable). The ordered
    /// sequence is laid out over the same number of partitions in
    /// contiguous runs, so partition order follows key order.
    pub fn sort_by_key<K: Ord>(self, key: impl Fn(&T) -> K) -> Self {
        let n = self.num_partitions();
        let mut items = self.into_vec();
        items.sort_by_key(|item| key(item));
        let run = items.len().div_ceil(n).max(1);
        let mut partitions: Vec<Vec<T>> = (0..n).map(|_| Vec::new()).collect();
        for (i, item) in items.into_iter().enumerate() {
            partitions[i / run].push(item);
        }
        Self::from_partitions(partitions)
    }

    fn into_map_partitions<U>(self, f: impl Fn(Vec<T>) -> Vec<U>) -> Collection<U> {
        Collection::from_partitions(self.partitions.into_iter().map(f).collect())
    }
}

impl<K, V> Collection<(K, V)>
where
    K: Hash + Eq + Ord + Clone,
{
    /// Move every pair to the partition owning its key.
    fn shuffle(self, partitions: usize) -> Self {
        let partitions = partitions.max(1);
        let mut result: Vec<Vec<(K, V)>> = (0..partitions).map(|_| Vec::new()).collect();
        for (key, value) in self.partitions.into_iter().flatten() {
            result[partition_of(&key, partitions)].push((key, value));
        }
        tracing::trace!(partitions, "shuffled keyed collection");
        Self::from_partitions(result)
    }

    pub fn keys(&self) -> Collection<K> {
        self.map(|(key, _)| key.clone())
    }

    pub fn values(self) -> Collection<V> {
        self.into_map(|(_, value)| value)
    }

    /// Group values by key. Values of a group keep their arrival
    /// order; there is no order across groups.
    pub fn group_by_key(self) -> Collection<(K, NonEmpty<V>)> {
        let n = self.num_partitions();
        self.shuffle(n).into_map_partitions(|partition| {
            let mut groups: BTreeMap<K, NonEmpty<V>> = BTreeMap::new();
            for (key, value) in partition {
                match groups.get_mut(&key) {
                    Some(group) => group.push(value),
                    None => {
                        groups.insert(key, NonEmpty::new(value));
                    }
                }
            }
            groups.into_iter().collect()
        })
    }

    /// Group values by key and sort each group by `order` (stable).
    pub fn group_sorted_by<O: Ord>(self, order: impl Fn(&V) -> O) -> Collection<(K, NonEmpty<V>)> {
        self.group_by_key()
            .into_map(|(key, group)| (key, group.sort_by_key(&order)))
    }

    /// Combine all values of a key with `f`. Values are combined
    /// within each partition before the shuffle and again after, so
    /// `f` is applied in an unspecified order and grouping; it must
    /// be associative and commutative for the result to be defined.
    pub fn reduce_by_key(self, f: impl Fn(V, V) -> V) -> Collection<(K, V)> {
        let n = self.num_partitions();
        let combine = |partition: Vec<(K, V)>| {
            let mut acc: HashMap<K, V> = HashMap::new();
            for (key, value) in partition {
                let value = match acc.remove(&key) {
                    Some(existing) => f(existing, value),
                    None => value,
                };
                acc.insert(key, value);
            }
            acc.into_iter().collect::<Vec<_>>()
        };
        self.into_map_partitions(combine)
            .shuffle(n)
            .into_map_partitions(combine)
    }

    /// Inner equi-join. Every matching pair is emitted, so the output
    /// multiplicity of a key is the product of its input multiplicities.
    pub fn join<W: Clone>(self, other: Collection<(K, W)>) -> Collection<(K, (V, W))>
    where
        V: Clone,
    {
        self.left_join(other)
            .into_flat_map(|(key, (left, right))| right.map(|right| (key, (left, right))))
    }

    /// Left outer equi-join. Left pairs without a match are emitted
    /// once with `None`.
    pub fn left_join<W: Clone>(self, other: Collection<(K, W)>) -> Collection<(K, (V, Option<W>))>
    where
        V: Clone,
    {
        let n = self.num_partitions().max(other.num_partitions());
        let left = self.shuffle(n);
        let right = other.shuffle(n);
        let partitions = left
            .partitions
            .into_iter()
            .zip(right.partitions)
            .map(|(left, right)| {
                let mut index: HashMap<K, Vec<W>> = HashMap::new();
                for (key, value) in right {
                    index.entry(key).or_default().push(value);
                }
                let mut out = Vec::new();
                for (key, value) in left {
                    match index.get(&key) {
                        Some(matches) => {
                            for right in matches {
                                out.push((key.clone(), (value.clone(), Some(right.clone()))));
                            }
                        }
                        None => out.push((key, (value, None))),
                    }
                }
                out
            })
            .collect();
        Collection::from_partitions(partitions)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
