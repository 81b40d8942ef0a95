//! Builds the BST that minimizes the expected cost of a search, given how
//! likely each key is to be searched for and how likely each search is to
//! miss and land between two keys (or before the first or after the last).
//!
//! This is the classic interval dynamic program. For every range of keys
//! `[i, j]` we record
//!
//! - `T[i][j]`, the total probability of the keys `i..=j` and of the gaps
//!   `i..=j + 1` around them,
//! - `C[i][j]`, the lowest cost of any tree over those keys, and
//! - `root[i][j]`, the key at the root of that cheapest tree.
//!
//! Putting a subtree under a new root pushes everything in it down a level,
//! which adds the subtree's total probability to its cost. So the cost of
//! rooting `[i, j]` at `r` is `C[i][r - 1] + T[i][j] + C[r + 1][j]`, where an
//! empty side costs its one miss probability. Ranges are solved shortest
//! first so both sides are always known. This takes `O(n^3)` time and
//! `O(n^2)` space.
//!
//! # Examples
//!
//! ```
//! use optbst::optimal;
//!
//! // "b" is searched for far more often than anything else so it ends up at
//! // the root.
//! let tree = optimal::build(
//!     vec!["a", "b", "c"],
//!     vec![1, 2, 3],
//!     &[0.05, 0.8, 0.05],
//!     &[0.025, 0.025, 0.025, 0.025],
//! )
//! .unwrap();
//!
//! assert_eq!(tree.root(), Some((&"b", &2)));
//! assert_eq!(tree.find(&"c"), Some(&3));
//! assert_eq!(tree.find(&"d"), None);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace, trace_span};

use crate::error::InvalidInput;
use crate::tree::{Node, Tree};
use crate::validate::{check_lengths, check_probs};

/// Everything needed to build an optimal tree, bundled together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawData<K, V> {
    /// The keys, sorted ascending with no duplicates.
    pub keys: Vec<K>,
    /// `values[i]` is stored with `keys[i]`.
    pub values: Vec<V>,
    /// `key_probs[i]` is the probability of searching for `keys[i]`.
    pub key_probs: Vec<f64>,
    /// `miss_probs[i]` is the probability of searching for something between
    /// `keys[i - 1]` and `keys[i]`. `miss_probs[0]` covers everything before
    /// the first key and the last entry everything after the last key.
    pub miss_probs: Vec<f64>,
}

/// Builds an optimal tree from bundled raw data. See [`build`].
pub fn build_from<K, V>(data: RawData<K, V>) -> Result<Tree<K, V>, InvalidInput>
where
    K: Ord,
{
    build(data.keys, data.values, &data.key_probs, &data.miss_probs)
}

/// Builds the BST over `keys` with the lowest expected search cost.
///
/// `keys` must already be sorted with no duplicates. There must be one value
/// and one key probability per key, and one more miss probability than there
/// are keys. All of the probabilities together must total 1.
///
/// When more than one shape is optimal, the one whose root has the smallest
/// key wins, all the way down the tree.
pub fn build<K, V>(
    keys: Vec<K>,
    values: Vec<V>,
    key_probs: &[f64],
    miss_probs: &[f64],
) -> Result<Tree<K, V>, InvalidInput>
where
    K: Ord,
{
    build_with_cost(keys, values, key_probs, miss_probs).map(|(tree, _cost)| tree)
}

/// Like [`build`] but also returns the expected number of comparisons a
/// search in the built tree takes (see [`Tree::weighted_path_length`]).
///
/// # Examples
///
/// ```
/// use optbst::optimal;
///
/// let (tree, cost) =
///     optimal::build_with_cost(vec![1], vec!["one"], &[0.5], &[0.25, 0.25]).unwrap();
///
/// // The key is found after one comparison and misses take two.
/// assert_eq!(cost, 0.5 + 2.0 * 0.25 + 2.0 * 0.25);
/// assert_eq!(tree.height(), 1);
/// ```
pub fn build_with_cost<K, V>(
    keys: Vec<K>,
    values: Vec<V>,
    key_probs: &[f64],
    miss_probs: &[f64],
) -> Result<(Tree<K, V>, f64), InvalidInput>
where
    K: Ord,
{
    check_lengths(&keys, &values, key_probs, miss_probs)?;
    check_probs(key_probs, miss_probs)?;
    debug_assert!(
        keys.windows(2).all(|w| w[0] < w[1]),
        "keys must be sorted ascending with no duplicates"
    );

    let n = keys.len();
    debug!(keys = n, "building optimal BST");
    if n == 0 {
        // Every search misses after a single comparison.
        return Ok((Tree::Leaf, miss_probs[0]));
    }

    let tables = Tables::solve(key_probs, miss_probs);
    let cost = tables.cost[0][n - 1];
    let mut entries = keys.into_iter().zip(values);
    let tree = tables.assemble(0, n, &mut entries);

    debug!(cost, height = tree.height(), "built optimal BST");
    Ok((tree, cost))
}

/// The solution for a single key range.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    total: f64,
    cost: f64,
    root: usize,
}

/// The dynamic programming tables. Only the cells with `i <= j` are used.
struct Tables<'a> {
    key_probs: &'a [f64],
    miss_probs: &'a [f64],
    /// `total[i][j]` is `T[i][j]` from the module docs.
    total: Vec<Vec<f64>>,
    /// `cost[i][j]` is `C[i][j]` from the module docs.
    cost: Vec<Vec<f64>>,
    /// `root[i][j]` is the index of the key at the root of the cheapest tree
    /// over keys `i..=j`.
    root: Vec<Vec<usize>>,
}

impl<'a> Tables<'a> {
    /// Fills in every table for at least one key. The probabilities must have
    /// been validated already.
    fn solve(key_probs: &'a [f64], miss_probs: &'a [f64]) -> Self {
        let n = key_probs.len();
        let _span = trace_span!("solve_tables", keys = n).entered();

        let mut tables = Self {
            key_probs,
            miss_probs,
            total: vec![vec![0.0; n]; n],
            cost: vec![vec![0.0; n]; n],
            root: vec![vec![0; n]; n],
        };

        // A single key sits at the root with a miss on either side of it.
        for i in 0..n {
            tables.total[i][i] = miss_probs[i] + key_probs[i] + miss_probs[i + 1];
            tables.cost[i][i] = (2.0 * miss_probs[i]) + key_probs[i] + (2.0 * miss_probs[i + 1]);
            tables.root[i][i] = i;
        }

        for len in 1..n {
            let cells = tables.solve_length(len);
            for (i, cell) in cells.into_iter().enumerate() {
                let j = i + len;
                tables.total[i][j] = cell.total;
                tables.cost[i][j] = cell.cost;
                tables.root[i][j] = cell.root;
            }
            trace!(length = len + 1, ranges = n - len, "solved key ranges");
        }

        tables
    }

    /// Solves every range `[i, i + len]`. The ranges are independent of each
    /// other, only needing shorter ranges which are already solved.
    #[cfg(not(feature = "parallel"))]
    fn solve_length(&self, len: usize) -> Vec<Cell> {
        let n = self.key_probs.len();
        (0..n - len).map(|i| self.solve_range(i, i + len)).collect()
    }

    /// Solves every range `[i, i + len]`. The ranges are independent of each
    /// other, only needing shorter ranges which are already solved.
    #[cfg(feature = "parallel")]
    fn solve_length(&self, len: usize) -> Vec<Cell> {
        let n = self.key_probs.len();
        (0..n - len)
            .into_par_iter()
            .map(|i| self.solve_range(i, i + len))
            .collect()
    }

    /// Finds the cheapest root for keys `i..=j`, where `i < j`.
    ///
    /// Candidate roots are tried from `i` up to `j` and only a strictly
    /// cheaper candidate replaces the current best, so ties go to the smallest
    /// root.
    fn solve_range(&self, i: usize, j: usize) -> Cell {
        let p = self.key_probs;
        let q = self.miss_probs;

        // Every tree over the range has the same total probability.
        let total = q[i] + p[i] + self.total[i + 1][j];

        // `i` at the root leaves nothing but a miss on the left.
        let mut best = Cell {
            total,
            cost: q[i] + total + self.cost[i + 1][j],
            root: i,
        };

        for r in i + 1..j {
            let cost = self.cost[i][r - 1] + total + self.cost[r + 1][j];
            if cost < best.cost {
                best.cost = cost;
                best.root = r;
            }
        }

        // `j` at the root leaves nothing but a miss on the right.
        let cost = total + self.cost[i][j - 1] + q[j + 1];
        if cost < best.cost {
            best.cost = cost;
            best.root = j;
        }

        best
    }

    /// Builds the cheapest tree over keys `lo..hi`, moving the keys and values
    /// out of `entries`. `entries` must be positioned at key `lo`.
    fn assemble<K, V>(
        &self,
        lo: usize,
        hi: usize,
        entries: &mut impl Iterator<Item = (K, V)>,
    ) -> Tree<K, V> {
        if lo == hi {
            return Tree::Leaf;
        }

        let r = self.root[lo][hi - 1];
        let left = self.assemble(lo, r, entries);
        // The left subtree consumed exactly `lo..r`, leaving us at `r`.
        let (key, value) = entries
            .next()
            .expect("check_lengths ensures one key and value per table row");
        let right = self.assemble(r + 1, hi, entries);

        Tree::Node(Node::new(left, key, value, right))
    }
}
