//! Pre-order traversal over topology trees.
//!
//! Traversal uses an explicit stack so tree depth is bounded by heap, not by the call
//! stack. Children are pushed in reverse so they pop in their original order.

use crate::error::LayoutError;
use crate::tree::node::TopologyNode;
use std::collections::HashSet;

/// Pre-order iterator: node before children, siblings in sequence order
pub struct Preorder<'a> {
    stack: Vec<&'a TopologyNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TopologyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Iterate every node reachable from `root` in pre-order
pub fn preorder(root: &TopologyNode) -> Preorder<'_> {
    Preorder { stack: vec![root] }
}

/// Visit every node mutably in pre-order.
///
/// `visit` may change node fields but must not restructure `children`; the children of a
/// node are collected after its visit returns.
pub fn preorder_mut<F>(root: &mut TopologyNode, mut visit: F)
where
    F: FnMut(&mut TopologyNode),
{
    let mut stack: Vec<&mut TopologyNode> = vec![root];
    while let Some(node) = stack.pop() {
        visit(&mut *node);
        if let Some(children) = node.children.as_deref_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}

/// Total number of nodes in the tree
pub fn node_count(root: &TopologyNode) -> usize {
    preorder(root).count()
}

/// Find the first node with `id` in pre-order
pub fn find<'a>(root: &'a TopologyNode, id: &str) -> Option<&'a TopologyNode> {
    preorder(root).find(|node| node.id == id)
}

/// Fail with `DuplicateNodeId` on the first id seen twice in pre-order
pub fn ensure_unique_ids(root: &TopologyNode) -> Result<(), LayoutError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for node in preorder(root) {
        if !seen.insert(node.id.as_str()) {
            return Err(LayoutError::DuplicateNodeId(node.id.clone()));
        }
    }
    Ok(())
}
