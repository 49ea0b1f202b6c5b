//! A read-only picture of the tree's nodes and edges for anything that wants to draw it.

/// Whether a node has any children. Renderers typically draw these differently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// No children.
    Leaf,
    /// At least one child.
    Internal,
}

/// One node of the tree as seen during a pre-order walk. The `parent` key together with `key`
/// describes the edge leading into this node.
#[derive(Debug, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// The node's key.
    pub key: &'a K,
    /// The parent's key, or `None` for the root.
    pub parent: Option<&'a K>,
    /// Distance from the root. The root is at depth 0.
    pub depth: usize,
    /// Height of the subtree rooted at this node. A leaf has a height of 1.
    pub height: usize,
    /// `height(left) - height(right)`.
    pub balance_factor: isize,
    /// Leaf or internal node.
    pub shape: Shape,
}

// Manual impls so views stay `Copy` without requiring `K: Copy`.
impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeView<'_, K> {}

impl<'a, K> NodeView<'a, K> {
    /// The `(parent, child)` edge into this node, if it has a parent.
    pub fn edge(&self) -> Option<(&'a K, &'a K)> {
        self.parent.map(|parent| (parent, self.key))
    }
}
