use std::ops::{Bound, RangeBounds};

use crate::policy::MergePolicy;

/// Segment tree over a fixed-length sequence with lazily propagated range
/// updates.
///
/// The tree is stored flat: node `r` owns `[node_lo, node_hi]` and its
/// children sit at `2r + 1` / `2r + 2`, covering the two halves. A pending
/// slot per node defers range updates, so `query` and `update` both visit
/// O(log n) nodes. Queries take `&mut self` because a full-overlap read folds
/// the pending value into the node aggregate on the way through.
///
/// A range update folds the new value into the affected range with the
/// policy's `merge`; with `RangeMax` it raises every element in the range to
/// at least the given value. See [`MergePolicy`] for the contract.
pub struct LazySegmentTree<P: MergePolicy> {
    len: usize,
    tree: Vec<P::Value>,
    lazy: Vec<P::Value>,
}

impl<P: MergePolicy> LazySegmentTree<P> {
    /// Creates a tree of `len` slots, all holding the policy's sentinel.
    /// Callers are expected to seed real data through updates before
    /// querying.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "segment tree length must be positive");
        Self {
            len,
            tree: vec![P::absent(); 4 * len],
            lazy: vec![P::absent(); 4 * len],
        }
    }

    /// Builds a tree seeded from `values`. The slice is only read during
    /// construction.
    pub fn from_slice(values: &[P::Value]) -> Self {
        let mut this = Self::new(values.len());
        this.build(0, 0, values.len() - 1, values);
        this
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value currently in effect at `index`.
    pub fn get(&mut self, index: usize) -> P::Value {
        assert!(
            index < self.len,
            "index {index} out of bounds for length {}",
            self.len
        );
        self.query_range(0, 0, self.len - 1, index, index)
    }

    /// Returns the merge of all values in `range`; the policy's sentinel for
    /// an empty range.
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> P::Value {
        let (start, end) = self.normalize_range(range);
        if start == end {
            return P::absent();
        }
        self.query_range(0, 0, self.len - 1, start, end - 1)
    }

    /// Folds `value` into every slot in `range` with the policy's `merge`.
    pub fn update<R: RangeBounds<usize>>(&mut self, range: R, value: P::Value) {
        let (start, end) = self.normalize_range(range);
        if start == end {
            return;
        }
        self.update_range(0, 0, self.len - 1, start, end - 1, &value);
    }

    /// Single-index form of [`update`](Self::update).
    pub fn update_at(&mut self, index: usize, value: P::Value) {
        assert!(
            index < self.len,
            "index {index} out of bounds for length {}",
            self.len
        );
        self.update_range(0, 0, self.len - 1, index, index, &value);
    }

    fn normalize_range<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        assert!(
            start <= end && end <= self.len,
            "range {start}..{end} out of bounds for length {}",
            self.len
        );
        (start, end)
    }

    fn build(&mut self, node: usize, node_lo: usize, node_hi: usize, values: &[P::Value]) {
        if node_lo == node_hi {
            self.tree[node] = values[node_lo].clone();
            return;
        }
        let mid = node_lo + (node_hi - node_lo) / 2;
        self.build(2 * node + 1, node_lo, mid, values);
        self.build(2 * node + 2, mid + 1, node_hi, values);
        let merged = P::merge(&self.tree[2 * node + 1], &self.tree[2 * node + 2]);
        self.tree[node] = merged;
    }

    /// Hands this node's pending value to both children before a traversal
    /// descends into them. A child that already has something pending keeps
    /// it, folded together with the new value.
    fn push_down(&mut self, node: usize) {
        if self.lazy[node] == P::absent() {
            return;
        }
        let pending = std::mem::replace(&mut self.lazy[node], P::absent());
        let left = 2 * node + 1;
        let right = 2 * node + 2;
        self.lazy[left] = P::merge(&self.lazy[left], &pending);
        self.lazy[right] = P::merge(&self.lazy[right], &pending);
    }

    fn query_range(
        &mut self,
        node: usize,
        node_lo: usize,
        node_hi: usize,
        lo: usize,
        hi: usize,
    ) -> P::Value {
        if lo > node_hi || hi < node_lo {
            return P::absent();
        }
        if lo <= node_lo && node_hi <= hi {
            if self.lazy[node] != P::absent() {
                // The pending value is the answer for this whole node; fold
                // it into the aggregate while it is at hand.
                self.tree[node] = self.lazy[node].clone();
            }
            return self.tree[node].clone();
        }
        self.push_down(node);
        let mid = node_lo + (node_hi - node_lo) / 2;
        let left = self.query_range(2 * node + 1, node_lo, mid, lo, hi);
        let right = self.query_range(2 * node + 2, mid + 1, node_hi, lo, hi);
        P::merge(&left, &right)
    }

    fn update_range(
        &mut self,
        node: usize,
        node_lo: usize,
        node_hi: usize,
        lo: usize,
        hi: usize,
        value: &P::Value,
    ) {
        if lo > node_hi || hi < node_lo {
            return;
        }
        if node_lo == node_hi {
            // A leaf holds exactly one element; the update assigns it
            // outright.
            self.tree[node] = value.clone();
            return;
        }
        if lo <= node_lo && node_hi <= hi {
            let folded = P::merge(&self.lazy[node], value);
            self.tree[node] = folded.clone();
            self.lazy[node] = folded;
            return;
        }
        self.push_down(node);
        let mid = node_lo + (node_hi - node_lo) / 2;
        self.update_range(2 * node + 1, node_lo, mid, lo, hi, value);
        self.update_range(2 * node + 2, mid + 1, node_hi, lo, hi, value);
        let merged = P::merge(&self.tree[2 * node + 1], &self.tree[2 * node + 2]);
        self.tree[node] = merged;
    }
}

impl<P: MergePolicy> Clone for LazySegmentTree<P> {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            tree: self.tree.clone(),
            lazy: self.lazy.clone(),
        }
    }
}
