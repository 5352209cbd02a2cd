//! Topology Tree
//!
//! The hierarchical representation of discovered network devices and groups, rooted at
//! one node, plus the traversal used by layout apply and export.

pub mod node;
pub mod walk;

pub use node::{DeviceRole, TopologyNode};
pub use walk::{ensure_unique_ids, find, node_count, preorder, preorder_mut, Preorder};
