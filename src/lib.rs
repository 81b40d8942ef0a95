//! This crate builds optimal Binary Search Trees (BSTs): given a fixed set of
//! keys and how likely each search is, it picks the tree shape that makes
//! searches cheapest on average.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to find
//! stored records by key. BSTs are typically defined recursively using the
//! notion of a `Node`. A `Node` will typically store some sort of key (and a
//! value associated with it) and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! ## Optimal Binary Search Tree
//!
//! Many differently shaped BSTs hold the same keys. A search costs one
//! comparison per level it descends, so how much a shape costs depends on
//! which keys are searched for most. A search can also miss, looking for a
//! key that falls between two stored keys (or before the first or after the
//! last). A miss costs one comparison more than the node it falls off of.
//!
//! Given the probability of searching for each key and of each kind of miss,
//! [`optimal::build`] finds the shape with the lowest expected cost. Keys that
//! are searched for often end up near the root.
//!
//! ```
//! use optbst::optimal;
//!
//! let tree = optimal::build(
//!     vec!["apple", "banana", "cherry"],
//!     vec![1, 2, 3],
//!     &[0.6, 0.1, 0.1],
//!     &[0.05, 0.05, 0.05, 0.05],
//! )
//! .unwrap();
//!
//! assert_eq!(tree.root(), Some((&"apple", &1)));
//! assert_eq!(tree.find(&"cherry"), Some(&3));
//! assert_eq!(tree.find(&"durian"), None);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod optimal;
pub mod tree;
pub mod validate;

pub use error::InvalidInput;
pub use optimal::{build, build_from, build_with_cost, RawData};
pub use tree::Tree;
