use cartographer::layout::{apply, export, PositionStore};
use cartographer::tree::preorder;
use cartographer::TopologyNode;
use proptest::prelude::*;
use std::collections::HashMap;

/// Build a tree with unique ids from a parent-index list: node i+1 hangs under
/// `parents[i] % (i + 1)`.
fn build_tree(parents: &[usize], fixed: &[Option<(i32, i32)>]) -> TopologyNode {
    let count = parents.len() + 1;
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (i, parent) in parents.iter().enumerate() {
        children_of[parent % (i + 1)].push(i + 1);
    }

    fn build(
        index: usize,
        children_of: &[Vec<usize>],
        fixed: &[Option<(i32, i32)>],
    ) -> TopologyNode {
        let mut node = TopologyNode::new(format!("n{}", index), format!("Node {}", index));
        if let Some(Some((x, y))) = fixed.get(index) {
            node = node.with_fixed(*x as f64, *y as f64);
        }
        if !children_of[index].is_empty() {
            node = node.with_children(
                children_of[index]
                    .iter()
                    .map(|child| build(*child, children_of, fixed))
                    .collect(),
            );
        }
        node
    }

    build(0, &children_of, fixed)
}

fn strip_fixed(root: &TopologyNode) -> TopologyNode {
    let mut copy = root.clone();
    cartographer::tree::preorder_mut(&mut copy, |node| node.clear_fixed());
    copy
}

type Case = (Vec<usize>, Vec<Option<(i32, i32)>>, Vec<(usize, i32, i32)>);

fn arb_case() -> impl Strategy<Value = Case> {
    (0usize..24).prop_flat_map(|n| {
        (
            proptest::collection::vec(any::<usize>(), n),
            proptest::collection::vec(proptest::option::of((-500i32..500, -500i32..500)), n + 1),
            proptest::collection::vec((0usize..=n, -500i32..500, -500i32..500), 0..8),
        )
    })
}

proptest! {
    #[test]
    fn export_then_apply_round_trips(case in arb_case()) {
        let (parents, fixed, moves) = case;
        let tree = build_tree(&parents, &fixed);
        let mut store = PositionStore::new();
        for (index, x, y) in &moves {
            store.set(format!("n{}", index), *x as f64, *y as f64);
        }

        let doc = export(&tree, &store);

        let mut fresh = strip_fixed(&tree);
        let before: HashMap<String, (Option<f64>, Option<f64>)> = preorder(&fresh)
            .map(|n| (n.id.clone(), (n.fx, n.fy)))
            .collect();
        let mut fresh_store = PositionStore::new();
        apply(&mut fresh, Some(&doc), &mut fresh_store);

        for node in preorder(&fresh) {
            match doc.position(&node.id) {
                Some(pos) => {
                    prop_assert_eq!(node.fixed_position(), Some(pos));
                    prop_assert_eq!(fresh_store.get(&node.id), Some(pos));
                }
                None => {
                    prop_assert_eq!((node.fx, node.fy), before[&node.id]);
                    prop_assert_eq!(fresh_store.get(&node.id), None);
                }
            }
        }
    }

    #[test]
    fn export_prefers_store_and_omits_unpositioned(case in arb_case()) {
        let (parents, fixed, moves) = case;
        let tree = build_tree(&parents, &fixed);
        let mut store = PositionStore::new();
        for (index, x, y) in &moves {
            store.set(format!("n{}", index), *x as f64, *y as f64);
        }

        let doc = export(&tree, &store);

        for node in preorder(&tree) {
            let expected = store.get(&node.id).or_else(|| node.fixed_position());
            prop_assert_eq!(doc.position(&node.id), expected);
        }
        prop_assert!(doc.positions.keys().all(|id| preorder(&tree).any(|n| &n.id == id)));
    }

    #[test]
    fn apply_without_document_changes_nothing(case in arb_case()) {
        let (parents, fixed, moves) = case;
        let mut tree = build_tree(&parents, &fixed);
        let mut store = PositionStore::new();
        for (index, x, y) in &moves {
            store.set(format!("n{}", index), *x as f64, *y as f64);
        }
        let tree_before = tree.clone();
        let store_before = store.clone();

        apply(&mut tree, None, &mut store);

        prop_assert_eq!(tree, tree_before);
        prop_assert_eq!(store, store_before);
    }
}
