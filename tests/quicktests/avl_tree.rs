use avl::Tree;
use quickcheck::{Arbitrary, Gen};

use std::collections::{BTreeSet, HashMap};

use crate::{is_avl, Op};

/// Applies a set of operations to a tree and a set, checking the invariants after each one.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops(ops: &[Op<i16>], tree: &mut Tree<i16>, set: &mut BTreeSet<i16>) -> bool {
    ops.iter().all(|op| {
        match op {
            Op::Insert(k) => {
                if tree.insert(*k).is_ok() != set.insert(*k) {
                    return false;
                }
            }
            Op::Remove(k) => {
                if tree.delete(k) != set.take(k) {
                    return false;
                }
            }
        }
        is_avl(tree)
    })
}

/// Counts the hops from `key` up to the root by following parent links.
fn path_length(tree: &Tree<i16>, key: &i16) -> Option<usize> {
    let parents: HashMap<_, _> = tree
        .nodes()
        .into_iter()
        .map(|view| (*view.key, view.parent.copied()))
        .collect();

    let mut current = parents.get(key)?;
    let mut hops = 0;
    while let Some(parent) = current {
        hops += 1;
        current = parents.get(parent)?;
    }
    Some(hops)
}

quickcheck::quickcheck! {
    fn invariants_hold_after_every_operation(ops: Vec<Op<i16>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set) && tree.in_order().into_iter().eq(set.iter())
    }

    fn insert_then_delete_round_trips(xs: Vec<i16>, x: i16) -> bool {
        let mut tree = Tree::new();
        for k in xs.iter().filter(|k| **k != x) {
            let _ = tree.insert(*k);
        }
        let len = tree.len();

        tree.insert(x).is_ok()
            && tree.delete(&x) == Some(x)
            && tree.len() == len
            && !tree.contains(&x)
            && is_avl(&tree)
    }

    fn deleting_absent_key_changes_nothing(xs: Vec<i16>, x: i16) -> bool {
        let mut tree = Tree::new();
        for k in xs.iter().filter(|k| **k != x) {
            let _ = tree.insert(*k);
        }
        let before: Vec<_> = tree.nodes().iter().map(|v| (*v.key, v.height)).collect();

        let deleted = tree.delete(&x);
        let after: Vec<_> = tree.nodes().iter().map(|v| (*v.key, v.height)).collect();

        deleted.is_none() && before == after
    }

    fn duplicates_are_rejected(xs: Vec<i16>) -> bool {
        let mut tree = Tree::new();
        for k in &xs {
            let _ = tree.insert(*k);
        }
        let before: Vec<i16> = tree.in_order().into_iter().copied().collect();

        xs.iter().all(|k| tree.insert(*k).map_err(|e| e.into_key()) == Err(*k))
            && tree.in_order().into_iter().copied().eq(before)
    }

    fn range_matches_brute_force(xs: Vec<i16>, low: i16, high: i16) -> bool {
        let mut tree = Tree::new();
        for k in &xs {
            let _ = tree.insert(*k);
        }

        let mut found: Vec<i16> = tree.keys_in_range(&low, &high).into_iter().copied().collect();
        found.sort_unstable();
        let expected: Vec<i16> = tree
            .in_order()
            .into_iter()
            .copied()
            .filter(|k| low <= *k && *k <= high)
            .collect();

        found == expected
    }

    fn depth_matches_path_length(xs: Vec<i16>, absent: i16) -> bool {
        let mut tree = Tree::new();
        for k in xs.iter().filter(|k| **k != absent) {
            let _ = tree.insert(*k);
        }

        xs.iter()
            .filter(|k| **k != absent)
            .all(|k| tree.depth_of(k) == path_length(&tree, k))
            && tree.depth_of(&absent).is_none()
    }
}

#[test]
fn height_stays_within_avl_bound() {
    let mut g = Gen::new(1 << 20);
    let mut tree = Tree::new();

    while tree.len() < 1000 {
        if tree.insert(i32::arbitrary(&mut g)).is_err() {
            continue;
        }
        let n = tree.len() as f64;
        let bound = 1.4405 * (n + 2.0).log2() - 0.3277;
        assert!(
            tree.height() as f64 <= bound,
            "height {} exceeds {bound} with {n} keys",
            tree.height()
        );
    }
    assert!(is_avl(&tree));
}

#[test]
fn sorted_inserts_stay_balanced() {
    let mut tree = Tree::new();
    for k in 0..1023 {
        tree.insert(k).unwrap();
    }

    // A perfect tree of 1023 keys.
    assert_eq!(tree.height(), 10);
    assert!(is_avl(&tree));

    for k in (0..1023).step_by(2) {
        assert_eq!(tree.delete(&k), Some(k));
    }
    assert_eq!(tree.len(), 511);
    assert!(is_avl(&tree));
}
