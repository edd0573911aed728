/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Disjoint set forest over dense integer labels

/// Array backed union-find
///
/// Label `0` is created on construction and is reserved for background by
/// the labeling code. Roots are always the smallest label of their set.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>
}

impl Default for UnionFind {
    fn default() -> Self {
        UnionFind { parent: vec![0] }
    }
}

impl UnionFind {
    #[must_use]
    pub fn new() -> UnionFind {
        UnionFind::default()
    }

    /// Create a new singleton set and return its label
    pub fn make_set(&mut self) -> usize {
        let label = self.parent.len();
        self.parent.push(label);
        label
    }

    /// Number of labels created, including the reserved one
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `label`'s set, compressing the path walked
    ///
    /// # Panics
    /// If `label` was never created
    pub fn find(&mut self, label: usize) -> usize {
        let mut root = label;

        while self.parent[root] != root {
            root = self.parent[root];
        }
        // point everything on the path straight at the root
        let mut current = label;

        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`, returning the new representative
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);

        let (low, high) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[high] = low;
        low
    }
}

#[cfg(test)]
mod tests {
    use crate::detect::union_find::UnionFind;

    #[test]
    fn test_chain_resolves_to_smallest() {
        let mut sets = UnionFind::new();
        let labels: Vec<usize> = (0..6).map(|_| sets.make_set()).collect();

        assert_eq!(labels, vec![1, 2, 3, 4, 5, 6]);

        sets.union(5, 6);
        sets.union(4, 5);
        sets.union(3, 4);
        sets.union(2, 3);

        for label in 2..=6 {
            assert_eq!(sets.find(label), 2);
        }
        assert_eq!(sets.find(1), 1);
    }

    #[test]
    fn test_path_is_compressed() {
        let mut sets = UnionFind::new();
        for _ in 0..4 {
            sets.make_set();
        }
        sets.union(3, 4);
        sets.union(2, 3);
        sets.union(1, 2);

        assert_eq!(sets.find(4), 1);
        // after one find every node on the path points at the root
        assert_eq!(sets.parent[4], 1);
        assert_eq!(sets.parent[3], 1);
    }
}
