//! The immutable BST produced by [`optimal::build`][crate::optimal::build].
//!
//! The tree's shape is fixed when it's built, so there is no `insert` or
//! `delete`. It supports finding values, checking for keys, and in-order
//! iteration.
//!
//! # Examples
//!
//! ```
//! use optbst::optimal;
//!
//! let tree = optimal::build(
//!     vec!["a", "b"],
//!     vec![1, 2],
//!     &[0.25, 0.25],
//!     &[0.25, 0.0, 0.25],
//! )
//! .unwrap();
//!
//! assert_eq!(tree.find(&"b"), Some(&2));
//! assert!(!tree.contains_key(&"c"));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![(&"a", &1), (&"b", &2)]);
//! ```

use std::cmp;
use std::iter::FusedIterator;

use crate::error::InvalidInput;

/// A Binary Search Tree whose shape was chosen up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree<K, V> {
    /// A marker for the empty subtree at the bottom of the tree. Reaching one
    /// during a search means the key isn't present.
    Leaf,
    /// A `Node` that has a key, value, and two children (which are
    /// both `Tree`s). This enum trivially wraps the [`Node`] struct.
    Node(Node<K, V>),
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Leaf
    }

    /// Potentially finds the value associated with the given key
    /// in this tree. If no node has the corresponding key, `None`
    /// is returned.
    pub fn find(&self, k: &K) -> Option<&V>
    where
        K: cmp::Ord,
    {
        let mut tree = self;
        while let Self::Node(n) = tree {
            tree = match k.cmp(&n.key) {
                cmp::Ordering::Less => n.left.as_ref(),
                cmp::Ordering::Equal => return Some(&n.value),
                cmp::Ordering::Greater => n.right.as_ref(),
            };
        }

        None
    }

    /// Whether some node in the tree has the given key.
    pub fn contains_key(&self, k: &K) -> bool
    where
        K: cmp::Ord,
    {
        self.find(k).is_some()
    }

    /// The key and value at the root of the tree, if there is one.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.node().map(|n| (&n.key, &n.value))
    }

    /// The root `Node`, unless the tree is empty.
    pub fn node(&self) -> Option<&Node<K, V>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(n),
        }
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    /// Gets the height of this tree. An empty tree has height 0 and a
    /// tree with just a root has height 1.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(n) => n.height,
        }
    }

    /// Returns an in-order iterator over the keys and values in the tree.
    /// Each call starts over from the smallest key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// The expected number of comparisons to search this tree, given the
    /// probability of searching for each key and for each gap between keys.
    ///
    /// Keys count one comparison per level, with the root on level 1. A miss
    /// costs one more comparison than the node it fell off of.
    ///
    /// # Examples
    ///
    /// ```
    /// use optbst::optimal;
    ///
    /// let (tree, cost) =
    ///     optimal::build_with_cost(vec!['a'], vec![1], &[0.5], &[0.25, 0.25]).unwrap();
    ///
    /// assert_eq!(tree.weighted_path_length(&[0.5], &[0.25, 0.25]), Ok(1.5));
    /// assert_eq!(cost, 1.5);
    /// ```
    pub fn weighted_path_length(
        &self,
        key_probs: &[f64],
        miss_probs: &[f64],
    ) -> Result<f64, InvalidInput> {
        let n = self.len();
        if key_probs.len() != n || miss_probs.len() != n + 1 {
            return Err(InvalidInput::LengthMismatch {
                keys: n,
                values: n,
                key_probs: key_probs.len(),
                miss_probs: miss_probs.len(),
            });
        }

        let mut keys = key_probs.iter();
        let mut gaps = miss_probs.iter();
        Ok(self.path_length_from(1.0, &mut keys, &mut gaps))
    }

    /// Recursive helper for [`Tree::weighted_path_length`]. Walks the tree in
    /// order so the `n`th node visited pairs with the `n`th key probability
    /// and the `n`th leaf visited pairs with the `n`th miss probability.
    fn path_length_from<'a>(
        &self,
        depth: f64,
        keys: &mut impl Iterator<Item = &'a f64>,
        gaps: &mut impl Iterator<Item = &'a f64>,
    ) -> f64 {
        match self {
            Self::Leaf => gaps.next().map_or(0.0, |p| p * depth),
            Self::Node(n) => {
                let left = n.left.path_length_from(depth + 1.0, keys, gaps);
                let here = keys.next().map_or(0.0, |p| p * depth);
                let right = n.right.path_length_from(depth + 1.0, keys, gaps);
                left + here + right
            }
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A `Node` has a key that is used for searching/sorting and a value
/// that is associated with that key. It always has two children although
/// those children may be [`Leaf`][Tree::Leaf]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Box<Tree<K, V>>,
    right: Box<Tree<K, V>>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K, V> Node<K, V> {
    /// Construct a new `Node` over the given subtrees. Every key in `left` must
    /// be less than `key` and every key in `right` greater.
    pub(crate) fn new(left: Tree<K, V>, key: K, value: V, right: Tree<K, V>) -> Self {
        Self {
            height: left.height().max(right.height()) + 1,
            key,
            left: Box::new(left),
            right: Box::new(right),
            value,
        }
    }

    /// This node's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored with this node's key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The subtree holding every key smaller than this node's.
    pub fn left(&self) -> &Tree<K, V> {
        &self.left
    }

    /// The subtree holding every key larger than this node's.
    pub fn right(&self) -> &Tree<K, V> {
        &self.right
    }
}

/// In-order iterator over a [`Tree`], created by [`Tree::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, K, V> {
    /// Nodes whose key hasn't been yielded yet. The top of the stack is the
    /// next one out; its left subtree has already been exhausted.
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a Tree<K, V>) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(tree.height()),
            remaining: count_nodes(tree),
        };
        iter.push_left_spine(tree);
        iter
    }

    fn push_left_spine(&mut self, mut tree: &'a Tree<K, V>) {
        while let Tree::Node(n) = tree {
            self.stack.push(n);
            tree = n.left.as_ref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Counts nodes without recursing so degenerate (list-like) trees don't blow the stack.
fn count_nodes<K, V>(tree: &Tree<K, V>) -> usize {
    let mut count = 0;
    let mut pending = vec![tree];
    while let Some(tree) = pending.pop() {
        if let Tree::Node(n) = tree {
            count += 1;
            pending.push(&n.left);
            pending.push(&n.right);
        }
    }

    count
}
