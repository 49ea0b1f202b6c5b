//! Property tests over the public API of the AVL tree.

use avl::Tree;
use quickcheck::{Arbitrary, Gen};

mod avl_tree;

/// An enum for the various kinds of "things" to do to an AVL tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Remove the K from the tree
    Remove(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) || bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}

/// Checks the AVL invariants using only what the tree shows through [`Tree::nodes`]:
/// each reported height agrees with the children's, every balance factor is in range and the
/// in-order listing is strictly ascending.
pub(crate) fn is_avl<K: Ord, O>(tree: &Tree<K, O>) -> bool {
    let views = tree.nodes();
    let child_height = |parent: &K, left: bool| {
        views
            .iter()
            .find(|child| child.parent == Some(parent) && (child.key < parent) == left)
            .map_or(0, |child| child.height)
    };

    let heights_ok = views.iter().all(|view| {
        let left = child_height(view.key, true);
        let right = child_height(view.key, false);
        view.height == left.max(right) + 1
            && view.balance_factor == left as isize - right as isize
            && (-1..=1).contains(&view.balance_factor)
    });

    let keys = tree.in_order();
    heights_ok && keys.windows(2).all(|pair| pair[0] < pair[1]) && keys.len() == tree.len()
}
