//! Sorted per-attribute index.
//!
//! An [`AttributeIndex`] holds an ascending copy of one catalog column together
//! with the permutation from sorted rank to original event index and its
//! inverse. It is built once and never changes; the cursors of a brush only
//! ever search it.

#[derive(Debug)]
pub struct AttributeIndex {
    sorted: Vec<f64>,
    rank_to_original: Vec<u32>,
    original_to_rank: Vec<u32>,
}

impl AttributeIndex {
    /// Builds the index from a column. The brush hands over a private copy of
    /// the catalog column, which is consumed here.
    ///
    /// # Panics
    /// If the column holds more than `u32::MAX` values or the permutation and
    /// its inverse disagree.
    pub fn new(values: Vec<f64>) -> Self {
        let n = values.len();
        assert!(n <= u32::MAX as usize, "column of {} values can not be indexed", n);
        let mut rank_to_original: Vec<u32> = (0..n as u32).collect();
        // stable, so equal values keep their catalog order
        rank_to_original.sort_by(|&a, &b| values[a as usize].total_cmp(&values[b as usize]));
        let sorted: Vec<f64> = rank_to_original.iter().map(|&e| values[e as usize]).collect();
        let mut original_to_rank = vec![0u32; n];
        for (rank, &e) in rank_to_original.iter().enumerate() {
            original_to_rank[e as usize] = rank as u32;
        }
        let index = Self {
            sorted,
            rank_to_original,
            original_to_rank,
        };
        index.check_permutation();
        index
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
    pub fn value(&self, rank: usize) -> f64 {
        self.sorted[rank]
    }
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }
    pub fn original(&self, rank: usize) -> u32 {
        self.rank_to_original[rank]
    }
    pub fn rank(&self, original: u32) -> usize {
        self.original_to_rank[original as usize] as usize
    }

    /// Smallest rank `r` in `[lo, hi)` with `sorted[r] >= target`, or `hi` if
    /// there is none.
    pub fn lower_bound(&self, lo: usize, hi: usize, target: f64) -> usize {
        lo + self.sorted[lo..hi].partition_point(|&v| v < target)
    }

    fn check_permutation(&self) {
        for (rank, &e) in self.rank_to_original.iter().enumerate() {
            assert_eq!(
                self.original_to_rank[e as usize] as usize, rank,
                "rank permutation and its inverse disagree at rank {}",
                rank
            );
        }
        debug_assert!(self.sorted.windows(2).all(|w| w[0] <= w[1]));
    }
}
