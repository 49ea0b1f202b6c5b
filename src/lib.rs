//! This crate exposes an AVL tree, a self-balancing Binary Search Tree (BST), mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Inserting keys in sorted order into a
//! plain BST builds a linked list with a height of `N`.
//!
//! ## AVL Tree
//!
//! An AVL tree adds one more invariant: for every `Node`, the heights of its two subtrees
//! differ by at most one. Each insertion and deletion restores this on the way back up to the
//! root with at most a couple of "rotations" per `Node`, which keeps the height under
//! `1.44 * lg(N + 2)`.
//!
//! Besides insertion and deletion the [`Tree`] answers two queries: which keys fall in a
//! closed range ([`Tree::keys_in_range`]) and how far a key sits from the root
//! ([`Tree::depth_of`]). [`Tree::nodes`] lists every node and its parent for anyone who
//! wants to draw the tree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
pub mod observer;
pub mod view;


pub use avl::Tree;
pub use error::DuplicateKeyError;
pub use observer::{Imbalance, Observer};
pub use view::{NodeView, Shape};
