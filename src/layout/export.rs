//! Export the current map state into a layout document.

use crate::layout::document::{LayoutDocument, LAYOUT_VERSION};
use crate::layout::store::PositionStore;
use crate::tree::{preorder, TopologyNode};
use crate::types::Position;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Export using the current UTC time as the document timestamp
pub fn export(root: &TopologyNode, store: &PositionStore) -> LayoutDocument {
    export_at(root, store, Utc::now())
}

/// Export with an explicit timestamp.
///
/// A node's position is its store entry if there is one, else its fixed coordinates when
/// both are set. Nodes with neither are left out of `positions`. The returned `root` is
/// a copy of the tree as it is now.
pub fn export_at(
    root: &TopologyNode,
    store: &PositionStore,
    timestamp: DateTime<Utc>,
) -> LayoutDocument {
    let mut positions: BTreeMap<String, Position> = BTreeMap::new();
    let mut from_store = 0usize;

    for node in preorder(root) {
        let resolved = match store.get(&node.id) {
            Some(position) => {
                from_store += 1;
                Some(position)
            }
            None => node.fixed_position(),
        };
        if let Some(position) = resolved {
            positions.insert(node.id.clone(), position);
        }
    }

    debug!(
        positions = positions.len(),
        from_store,
        "Exported layout"
    );

    LayoutDocument {
        version: LAYOUT_VERSION,
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        positions,
        root: Some(root.clone()),
    }
}
