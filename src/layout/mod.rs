//! Map Layout
//!
//! Position management for the network map: the live position store, applying a saved
//! layout onto a tree, exporting the current layout, and parsing saved documents.

pub mod apply;
pub mod document;
pub mod export;
pub mod store;

pub use apply::{apply, ApplyReport};
pub use document::{parse, LayoutDocument, LAYOUT_VERSION};
pub use export::{export, export_at};
pub use store::PositionStore;
