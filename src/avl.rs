//! A self-balancing Binary Search Tree of keys (specifically, an AVL tree). Every node owns its
//! children outright and the tree is restructured by rewriting those owning links in place on
//! the way back up from each insertion or deletion.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.depth_of(&1), None);
//!
//! for key in [9, 5, 10, 0, 6, 11, -1, 1, 2] {
//!     tree.insert(key).unwrap();
//! }
//!
//! // Keys are unique.
//! assert!(tree.insert(5).is_err());
//!
//! // Deleting returns the key, deleting it again does nothing.
//! assert_eq!(tree.delete(&10), Some(10));
//! assert_eq!(tree.delete(&10), None);
//!
//! assert_eq!(tree.keys_in_range(&1, &9), vec![&1, &2, &5, &6, &9]);
//! assert_eq!(tree.depth_of(&1), Some(0));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::DuplicateKeyError;
use crate::observer::{Imbalance, Observer};
use crate::view::{NodeView, Shape};

/// An AVL tree holding unique keys. This can be used for inserting and deleting keys and for
/// asking which keys fall in a range or how deep a key sits.
///
/// `O` is notified every time the tree rebalances. It defaults to `()` which ignores the
/// events. See [`Observer`].
#[derive(Clone, Debug)]
pub struct Tree<K, O = ()> {
    root: Link<K>,
    len: usize,
    observer: O,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_observer(())
    }
}

impl<K, O> Tree<K, O> {
    /// Generates a new, empty `Tree` which reports each rebalance to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            root: Link(None),
            len: 0,
            observer,
        }
    }

    /// The observer given to [`Tree::with_observer`].
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the tree, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many levels are in the tree. An empty tree has a height of 0 and a tree with only a
    /// root has a height of 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Whether the tree holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.depth_of(key).is_some()
    }

    /// How many edges lie between the root and the node holding `key`. The root is at depth 0.
    /// Returns `None` if the key isn't in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.depth_of(&20), Some(0));
    /// assert_eq!(tree.depth_of(&30), Some(1));
    /// assert_eq!(tree.depth_of(&40), None);
    /// ```
    pub fn depth_of(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut link = &self.root;
        let mut depth = 0;
        while let Some(node) = link.node() {
            link = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Equal => return Some(depth),
                Ordering::Greater => &node.right,
            };
            depth += 1;
        }

        None
    }

    /// Every key `k` with `low <= k <= high`. Subtrees that can't hold such a key aren't
    /// visited. The keys currently come out in ascending order but callers should only rely on
    /// which keys are returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..10 {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.keys_in_range(&3, &5), vec![&3, &4, &5]);
    /// assert!(tree.keys_in_range(&5, &3).is_empty());
    /// ```
    pub fn keys_in_range(&self, low: &K, high: &K) -> Vec<&K>
    where
        K: Ord,
    {
        let mut keys = Vec::new();
        self.root.collect_range(low, high, &mut keys);
        keys
    }

    /// All keys in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.root.collect_in_order(&mut keys);
        keys
    }

    /// Every node with its parent's key, visited in pre-order (node, left subtree, right
    /// subtree). This is enough to draw the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Shape, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let edges: Vec<_> = tree.nodes().iter().filter_map(|view| view.edge()).collect();
    /// assert_eq!(edges, vec![(&20, &10), (&20, &30)]);
    /// assert_eq!(tree.nodes()[0].shape, Shape::Internal);
    /// ```
    pub fn nodes(&self) -> Vec<NodeView<'_, K>> {
        let mut views = Vec::with_capacity(self.len);
        self.root.collect_nodes(None, 0, &mut views);
        views
    }
}

impl<K, O> Tree<K, O>
where
    O: Observer<K>,
{
    /// Inserts `key` into the tree. If the key is already present the tree is left untouched
    /// and the key is handed back inside the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1).is_ok());
    /// let error = tree.insert(1).unwrap_err();
    /// assert_eq!(error.into_key(), 1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKeyError<K>>
    where
        K: Ord + fmt::Debug,
    {
        match self.root.insert(key, &mut self.observer) {
            Ok(_) => {
                self.len += 1;
                trace!(len = self.len, height = self.height(), "inserted key");
                Ok(())
            }
            Err(key) => {
                trace!("rejected duplicate key");
                Err(DuplicateKeyError::new(key))
            }
        }
    }

    /// Deletes `key` from the tree and returns it. If the tree does not contain the key,
    /// nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.delete(&1), Some(1));
    /// assert_eq!(tree.delete(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let removed = self.root.delete(key, &mut self.observer);
        if removed.is_some() {
            self.len -= 1;
        }
        trace!(found = removed.is_some(), len = self.len, "deleted key");
        removed
    }
}

/// Which child a descent went into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// An owning pointer to a subtree, or nothing. All restructuring happens through `&mut Link` so
/// that a parent's child pointer is rewritten in place when its subtree gets a new root.
#[derive(Clone, Debug)]
struct Link<K>(Option<Box<Node<K>>>);

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: Link(None),
            right: Link(None),
            height: 1,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1. Must run
    /// after any change to the children and before `balance_factor` is trusted.
    fn update_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The difference in height between the left and right subtrees. Positive means the left
    /// side is taller.
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }

    fn shape(&self) -> Shape {
        if self.left.is_empty() && self.right.is_empty() {
            Shape::Leaf
        } else {
            Shape::Internal
        }
    }
}

impl<K> Link<K> {
    fn node(&self) -> Option<&Node<K>> {
        self.0.as_deref()
    }

    fn node_mut(&mut self) -> Option<&mut Node<K>> {
        self.0.as_deref_mut()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    fn balance_factor(&self) -> isize {
        self.node().map_or(0, Node::balance_factor)
    }

    /// Rotate self to the right. This moves the left child up vertically and self down
    /// vertically. Used to rebalance the tree when the left child is too tall. Without a left
    /// child there is nothing to rotate and the subtree is left alone.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       old_root               new_root
    ///        /     \               /      \
    ///   new_root    z   rotate ->  x     old_root
    ///    /   \                            /   \
    ///   x     y                          y     z
    /// ```
    fn rotate_right(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.left.0.take() else {
            self.0 = Some(old_root);
            return;
        };

        // The old root is now below the new root so its height has to be fixed first.
        old_root.left = new_root.right.take();
        old_root.update_height();

        new_root.right = Link(Some(old_root));
        new_root.update_height();
        self.0 = Some(new_root);
    }

    /// Mirror image of [`Link::rotate_right`].
    fn rotate_left(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.right.0.take() else {
            self.0 = Some(old_root);
            return;
        };

        old_root.right = new_root.left.take();
        old_root.update_height();

        new_root.left = Link(Some(old_root));
        new_root.update_height();
        self.0 = Some(new_root);
    }

    fn rotate_left_right(&mut self) {
        if let Some(root) = self.node_mut() {
            root.left.rotate_left();
        }
        self.rotate_right();
    }

    fn rotate_right_left(&mut self) {
        if let Some(root) = self.node_mut() {
            root.right.rotate_right();
        }
        self.rotate_left();
    }

    /// Tells the observer about `case` and applies the matching rotation(s).
    fn rebalance<O>(&mut self, case: Imbalance, observer: &mut O)
    where
        O: Observer<K>,
    {
        if let Some(pivot) = self.node() {
            observer.rebalanced(case, &pivot.key);
        }

        match case {
            Imbalance::LeftLeft => self.rotate_right(),
            Imbalance::LeftRight => self.rotate_left_right(),
            Imbalance::RightRight => self.rotate_left(),
            Imbalance::RightLeft => self.rotate_right_left(),
        }
        debug!(%case, height = self.height(), "rebalanced subtree");

        if cfg!(debug_assertions) {
            if let Some(root) = self.node() {
                assert_eq!(
                    root.height,
                    root.left.height().max(root.right.height()) + 1
                );
                assert!(root.balance_factor().abs() <= 1);
            }
        }
    }

    /// Inserts `key` below this link. On success returns which way the key went at this node
    /// (`None` if this link was empty and now holds the new leaf). On a duplicate, returns the
    /// key without having changed anything.
    fn insert<O>(&mut self, key: K, observer: &mut O) -> Result<Option<Side>, K>
    where
        K: Ord,
        O: Observer<K>,
    {
        let (side, below) = match self.node_mut() {
            None => {
                self.0 = Some(Node::leaf(key));
                return Ok(None);
            }
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => (Side::Left, node.left.insert(key, observer)?),
                Ordering::Equal => return Err(key),
                Ordering::Greater => (Side::Right, node.right.insert(key, observer)?),
            },
        };

        self.rebalance_after_insert(below, observer);
        Ok(Some(side))
    }

    /// `below` is the side the new key took at the child we descended into. When this node is
    /// out of balance that child is the taller one, so `below` says whether the new key sorted
    /// before or after the taller child's key, which picks single vs. double rotation.
    fn rebalance_after_insert<O>(&mut self, below: Option<Side>, observer: &mut O)
    where
        O: Observer<K>,
    {
        let Some(node) = self.node_mut() else {
            return;
        };
        node.update_height();

        let case = match (node.balance_factor(), below) {
            (balance, Some(Side::Left)) if balance > 1 => Imbalance::LeftLeft,
            (balance, Some(Side::Right)) if balance > 1 => Imbalance::LeftRight,
            (balance, Some(Side::Right)) if balance < -1 => Imbalance::RightRight,
            (balance, Some(Side::Left)) if balance < -1 => Imbalance::RightLeft,
            _ => return,
        };
        self.rebalance(case, observer);
    }

    /// Deletes `key` from below this link, returning it. Every node left on the path back up is
    /// rebalanced.
    fn delete<O>(&mut self, key: &K, observer: &mut O) -> Option<K>
    where
        K: Ord,
        O: Observer<K>,
    {
        let node = self.node_mut()?;
        let removed = match key.cmp(&node.key) {
            Ordering::Less => node.left.delete(key, observer)?,
            Ordering::Equal => return self.unlink(observer),
            Ordering::Greater => node.right.delete(key, observer)?,
        };

        self.rebalance_after_delete(observer);
        Some(removed)
    }

    /// Removes the node at this link and returns its key.
    fn unlink<O>(&mut self, observer: &mut O) -> Option<K>
    where
        O: Observer<K>,
    {
        let mut node = self.0.take()?;

        // No children or only a right child: the right child (possibly nothing) takes our place.
        if node.left.is_empty() {
            *self = node.right.take();
            return Some(node.key);
        }

        match node.right.take_min(observer) {
            // Only a left child.
            None => {
                *self = node.left.take();
                Some(node.key)
            }
            // Two children: the in-order successor's key moves up into this node.
            Some(successor) => {
                let removed = mem::replace(&mut node.key, successor);
                self.0 = Some(node);
                self.rebalance_after_delete(observer);
                Some(removed)
            }
        }
    }

    /// Detaches the smallest node below this link and returns its key, rebalancing the path to
    /// it the same way a deletion would.
    fn take_min<O>(&mut self, observer: &mut O) -> Option<K>
    where
        O: Observer<K>,
    {
        let node = self.node_mut()?;
        if node.left.is_empty() {
            let mut min = self.0.take()?;
            *self = min.right.take();
            return Some(min.key);
        }

        let min = node.left.take_min(observer);
        self.rebalance_after_delete(observer);
        min
    }

    /// The deleted key is gone by now so the children's balance factors pick the rotation.
    fn rebalance_after_delete<O>(&mut self, observer: &mut O)
    where
        O: Observer<K>,
    {
        let Some(node) = self.node_mut() else {
            return;
        };
        node.update_height();

        let balance = node.balance_factor();
        let case = if balance > 1 {
            if node.left.balance_factor() >= 0 {
                Imbalance::LeftLeft
            } else {
                Imbalance::LeftRight
            }
        } else if balance < -1 {
            if node.right.balance_factor() <= 0 {
                Imbalance::RightRight
            } else {
                Imbalance::RightLeft
            }
        } else {
            return;
        };
        self.rebalance(case, observer);
    }

    fn collect_range<'a>(&'a self, low: &K, high: &K, keys: &mut Vec<&'a K>)
    where
        K: Ord,
    {
        let Some(node) = self.node() else {
            return;
        };

        if low < &node.key {
            node.left.collect_range(low, high, keys);
        }
        if low <= &node.key && &node.key <= high {
            keys.push(&node.key);
        }
        if high > &node.key {
            node.right.collect_range(low, high, keys);
        }
    }

    fn collect_in_order<'a>(&'a self, keys: &mut Vec<&'a K>) {
        if let Some(node) = self.node() {
            node.left.collect_in_order(keys);
            keys.push(&node.key);
            node.right.collect_in_order(keys);
        }
    }

    fn collect_nodes<'a>(
        &'a self,
        parent: Option<&'a K>,
        depth: usize,
        views: &mut Vec<NodeView<'a, K>>,
    ) {
        let Some(node) = self.node() else {
            return;
        };

        views.push(NodeView {
            key: &node.key,
            parent,
            depth,
            height: node.height,
            balance_factor: node.balance_factor(),
            shape: node.shape(),
        });
        node.left.collect_nodes(Some(&node.key), depth + 1, views);
        node.right.collect_nodes(Some(&node.key), depth + 1, views);
    }
}
