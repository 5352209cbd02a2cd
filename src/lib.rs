//! Cartographer: Network Map Layouts
//!
//! Keeps manually placed node positions of a network topology map across sessions: a
//! live position store, applying a saved layout onto a freshly discovered tree, and
//! exporting the current layout as a portable document.

pub mod access;
pub mod codec;
pub mod config;
pub mod directory;
pub mod error;
pub mod layout;
pub mod logging;
pub mod session;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, LayoutError, StorageError};
pub use layout::{apply, export, parse, ApplyReport, LayoutDocument, PositionStore};
pub use session::LayoutSession;
pub use tree::{DeviceRole, TopologyNode};
pub use types::{NodeId, Position};
