//! Position Store
//!
//! Session-scoped mapping from node id to canvas position. Authoritative over a node's
//! own fixed coordinates during export. The store knows nothing about trees: setting a
//! position never touches a node.

use crate::types::{NodeId, Position};
use std::collections::HashMap;

/// Live node positions: NodeId -> Position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionStore {
    pub(crate) positions: HashMap<NodeId, Position>,
}

impl PositionStore {
    pub fn new() -> Self {
        PositionStore {
            positions: HashMap::new(),
        }
    }

    /// Record a position for `id`, replacing any previous one
    pub fn set(&mut self, id: impl Into<NodeId>, x: f64, y: f64) {
        self.positions.insert(id.into(), Position { x, y });
    }

    pub fn get(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Drop every stored position
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> + '_ {
        self.positions.iter().map(|(id, pos)| (id.as_str(), *pos))
    }
}
