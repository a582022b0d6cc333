//! O(log n) cumulative row heights via a Fenwick tree.
//!
//! Backs the windowing math: the total content extent is a prefix sum
//! over all row heights, a row's vertical offset is the prefix sum before
//! it, and mapping a scroll offset back to a row index is a binary search
//! over prefix sums.
//!
//! Raw heights are mirrored in a plain vector. The mirror makes single
//! lookups O(1), and growing past capacity rebuilds the tree from it —
//! a zero-filled extension would leave new parent nodes without the
//! earlier updates they are supposed to cover.
//!
//! # Complexity
//!
//! - `push` (amortized) / `set`: O(log n)
//! - `offset_of` / `total`: O(log n)
//! - `index_at`: O(log² n)
//! - `get` / `len` / `clear`: O(1)

/// Fenwick tree over per-row heights (0-indexed API).
#[derive(Debug, Clone)]
pub struct HeightIndex {
    /// Fenwick nodes; `fenwick` operates on the full slice.
    tree: Vec<isize>,
    /// Raw heights, index-aligned with the logical rows.
    heights: Vec<usize>,
}

impl HeightIndex {
    /// Create an empty index with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Append a row with the given height.
    pub fn push(&mut self, height: usize) {
        let index = self.heights.len();
        self.heights.push(height);
        if self.heights.len() > self.tree.len() {
            self.rebuild();
        } else {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }

    /// Replace the height at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: usize) {
        let delta = height as isize - self.heights[index] as isize;
        self.heights[index] = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> usize {
        self.heights[index]
    }

    /// Cumulative height of all rows strictly before `index` — the
    /// vertical offset at which row `index` starts.
    ///
    /// `offset_of(len())` is permitted and equals [`total`](Self::total).
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// ```
    /// # use vgrid::view_state::height_index::HeightIndex;
    /// let mut heights = HeightIndex::with_capacity(4);
    /// heights.push(10);
    /// heights.push(20);
    /// assert_eq!(heights.offset_of(0), 0);
    /// assert_eq!(heights.offset_of(1), 10);
    /// assert_eq!(heights.offset_of(2), 30);
    /// ```
    pub fn offset_of(&self, index: usize) -> usize {
        assert!(
            index <= self.heights.len(),
            "index {index} out of bounds (len {})",
            self.heights.len()
        );
        if index == 0 {
            return 0;
        }
        fenwick::array::prefix_sum(&self.tree, index - 1).max(0) as usize
    }

    /// Total height of all rows.
    pub fn total(&self) -> usize {
        self.offset_of(self.heights.len())
    }

    /// Index of the row whose vertical span contains `offset`.
    ///
    /// Row `i` spans `[offset_of(i), offset_of(i + 1))`. Returns `None`
    /// when `offset >= total()` (including the empty index).
    ///
    /// ```
    /// # use vgrid::view_state::height_index::HeightIndex;
    /// let mut heights = HeightIndex::with_capacity(4);
    /// heights.push(10); // [0..10)
    /// heights.push(20); // [10..30)
    /// assert_eq!(heights.index_at(0), Some(0));
    /// assert_eq!(heights.index_at(9), Some(0));
    /// assert_eq!(heights.index_at(10), Some(1));
    /// assert_eq!(heights.index_at(29), Some(1));
    /// assert_eq!(heights.index_at(30), None);
    /// ```
    pub fn index_at(&self, offset: usize) -> Option<usize> {
        let len = self.heights.len();
        if len == 0 || offset >= self.total() {
            return None;
        }
        // First index whose inclusive prefix sum exceeds the offset.
        let mut low = 0;
        let mut high = len;
        while low < high {
            let mid = low + (high - low) / 2;
            let through = fenwick::array::prefix_sum(&self.tree, mid).max(0) as usize;
            if through > offset {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        (low < len).then_some(low)
    }

    /// Remove all rows, retaining allocated capacity.
    pub fn clear(&mut self) {
        self.tree.fill(0);
        self.heights.clear();
    }

    /// Re-derive every Fenwick node from the height mirror, growing the
    /// node storage to match.
    fn rebuild(&mut self) {
        self.tree.clear();
        self.tree.resize(self.heights.len().max(1) * 2, 0);
        for (index, &height) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }
}
