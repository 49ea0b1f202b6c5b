//! Hooks for watching the tree rebalance itself.
//!
//! Every time a node is found out of balance the tree reports which of the four AVL shapes it
//! saw and the key of that node, then rotates. Nothing in the tree depends on what the observer
//! does with the event.
//!
//! # Examples
//!
//! ```
//! use avl::{Imbalance, Tree};
//!
//! let mut tree: Tree<i32, Vec<(Imbalance, i32)>> = Tree::with_observer(Vec::new());
//! for key in [10, 30, 20] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.observer(), &vec![(Imbalance::RightLeft, 10)]);
//! ```

use std::fmt;

/// The four shapes a subtree can be in when its root's balance factor leaves `{-1, 0, 1}`. See
/// [the Wikipedia page][wiki] for pictures.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Imbalance {
    /// The left child's left subtree is too tall. Fixed with a single right rotation.
    LeftLeft,
    /// The left child's right subtree is too tall. Fixed by rotating the left child left and
    /// then the node right.
    LeftRight,
    /// The right child's right subtree is too tall. Fixed with a single left rotation.
    RightRight,
    /// The right child's left subtree is too tall. Fixed by rotating the right child right and
    /// then the node left.
    RightLeft,
}

impl Imbalance {
    /// Whether fixing this shape takes two rotations.
    pub fn is_double(self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LeftLeft => "left-left",
            Self::LeftRight => "left-right",
            Self::RightRight => "right-right",
            Self::RightLeft => "right-left",
        };
        f.write_str(name)
    }
}

/// Notified once per rebalance, before the rotation(s) are applied. `pivot` is the key of the
/// node whose balance factor was out of range.
pub trait Observer<K> {
    /// Called with the shape found and the key of the unbalanced node.
    fn rebalanced(&mut self, case: Imbalance, pivot: &K);
}

/// The default: ignore every event.
impl<K> Observer<K> for () {
    fn rebalanced(&mut self, _case: Imbalance, _pivot: &K) {}
}

/// Records every event in order.
impl<K: Clone> Observer<K> for Vec<(Imbalance, K)> {
    fn rebalanced(&mut self, case: Imbalance, pivot: &K) {
        self.push((case, pivot.clone()));
    }
}
