//! Core types shared by the layout engine.

use serde::{Deserialize, Serialize};

/// NodeId: identifier of a topology node, typically an IP address or a synthetic group id
pub type NodeId = String;

/// A point on the map canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position { x, y }
    }
}
