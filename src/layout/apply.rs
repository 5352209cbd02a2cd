//! Apply a saved layout onto a freshly loaded topology tree.

use crate::layout::document::LayoutDocument;
use crate::layout::store::PositionStore;
use crate::tree::{preorder_mut, TopologyNode};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of an apply pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Tree nodes visited
    pub visited: usize,
    /// Tree nodes that received a saved position
    pub applied: usize,
    /// Document ids with no matching tree node, sorted
    pub unmatched: Vec<String>,
}

/// Hydrate `root` from `document`.
///
/// Every node whose id has a saved position gets its fixed coordinates set, and the same
/// position is written to `store`. Nodes without a saved position keep whatever fixed
/// coordinates they already had. Document ids that match no node are ignored. A missing
/// document leaves both the tree and the store untouched.
pub fn apply(
    root: &mut TopologyNode,
    document: Option<&LayoutDocument>,
    store: &mut PositionStore,
) -> ApplyReport {
    let Some(document) = document else {
        return ApplyReport::default();
    };

    let mut report = ApplyReport::default();
    let mut matched: HashSet<String> = HashSet::new();

    preorder_mut(root, |node| {
        report.visited += 1;
        if let Some(position) = document.position(&node.id) {
            node.set_fixed(position);
            store.set(node.id.clone(), position.x, position.y);
            matched.insert(node.id.clone());
            report.applied += 1;
        }
    });

    report.unmatched = document
        .positions
        .keys()
        .filter(|id| !matched.contains(id.as_str()))
        .cloned()
        .collect();

    debug!(
        visited = report.visited,
        applied = report.applied,
        unmatched = report.unmatched.len(),
        "Applied saved layout"
    );
    report
}
