//! Topology node types

use crate::types::{NodeId, Position};
use serde::{Deserialize, Serialize};

/// Device classification assigned during discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceRole {
    #[serde(rename = "gateway/router")]
    GatewayRouter,
    #[serde(rename = "switch/ap")]
    SwitchAp,
    #[serde(rename = "firewall")]
    Firewall,
    #[serde(rename = "server")]
    Server,
    #[serde(rename = "service")]
    Service,
    #[serde(rename = "nas")]
    Nas,
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "unknown")]
    Unknown,
    /// Synthetic grouping node, not a real device
    #[serde(rename = "group")]
    Group,
}

/// Topology tree node
///
/// `fx`/`fy` are the fixed coordinates pinning the node on the canvas. `None` means the
/// renderer decides where the node goes. Both `children: None` and `children: Some(vec![])`
/// are kept distinct so a tree serializes back to the shape it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<DeviceRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TopologyNode>>,
    #[serde(default, alias = "x", skip_serializing_if = "Option::is_none")]
    pub fx: Option<f64>,
    #[serde(default, alias = "y", skip_serializing_if = "Option::is_none")]
    pub fy: Option<f64>,
}

impl TopologyNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        TopologyNode {
            id: id.into(),
            name: name.into(),
            role: None,
            ip: None,
            hostname: None,
            children: None,
            fx: None,
            fy: None,
        }
    }

    pub fn with_role(mut self, role: DeviceRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_children(mut self, children: Vec<TopologyNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_fixed(mut self, x: f64, y: f64) -> Self {
        self.fx = Some(x);
        self.fy = Some(y);
        self
    }

    /// Append a child, creating the children list if the node was a leaf
    pub fn push_child(&mut self, child: TopologyNode) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Children in order; empty for leaves
    pub fn children(&self) -> &[TopologyNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Fixed position, only when both coordinates are set
    pub fn fixed_position(&self) -> Option<Position> {
        match (self.fx, self.fy) {
            (Some(x), Some(y)) => Some(Position { x, y }),
            _ => None,
        }
    }

    pub fn set_fixed(&mut self, position: Position) {
        self.fx = Some(position.x);
        self.fy = Some(position.y);
    }

    pub fn clear_fixed(&mut self) {
        self.fx = None;
        self.fy = None;
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}
