//! Disjoint-set forest used to count connected components.
//!
//! Slots are the storage indices of [`crate::GraphStore`] nodes. Unions are by
//! rank with full path compression on lookup.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    pub(super) fn find(&mut self, mut slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[slot] != slot {
            let parent = self.parent[slot];
            self.parent[slot] = root;
            slot = parent;
        }

        root
    }

    /// Merges the sets holding `left` and `right`. Returns `false` when they
    /// already shared a set.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }

    /// Number of disjoint sets remaining.
    pub(super) fn components(&self) -> usize {
        self.components
    }
}
