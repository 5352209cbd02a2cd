//! Layout documents: the versioned, portable form of a map layout.
//!
//! Decoding is loose. Only syntactically broken input (or input that is not
//! a JSON object at all) is rejected; everything inside the object is taken as found,
//! and position entries that are not coordinate pairs are skipped.

use crate::codec;
use crate::error::LayoutError;
use crate::tree::TopologyNode;
use crate::types::{NodeId, Position};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Current layout document format tag
pub const LAYOUT_VERSION: u32 = 1;

/// Saved layout: positions by node id plus a snapshot of the tree they were taken from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDocument {
    pub version: u32,
    pub timestamp: String,
    pub positions: BTreeMap<NodeId, Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<TopologyNode>,
}

impl LayoutDocument {
    /// Parse a document from its JSON text.
    ///
    /// Well-formed JSON whose top-level value is not an object (`42`, `[1,2]`, `"x"`,
    /// `null`) is rejected with `MalformedDocument`, the same as broken syntax. Nesting
    /// depth is not limited, so layouts of arbitrarily deep trees read back.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let value: Value =
            codec::from_str(text).map_err(|e| LayoutError::MalformedDocument(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a document from an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, LayoutError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(LayoutError::MalformedDocument(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let version = fields
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0);
        let timestamp = fields
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();

        let positions = match fields.remove("positions") {
            Some(Value::Object(entries)) => decode_positions(entries),
            None | Some(Value::Null) => BTreeMap::new(),
            Some(other) => {
                warn!(
                    "Layout document positions is {}, not an object; ignoring it",
                    json_kind(&other)
                );
                BTreeMap::new()
            }
        };

        let root = match fields.remove("root") {
            None | Some(Value::Null) => None,
            Some(value) => match codec::from_value::<TopologyNode>(value) {
                Ok(root) => Some(root),
                Err(e) => {
                    warn!("Layout document root is not a topology tree: {}", e);
                    None
                }
            },
        };

        Ok(LayoutDocument {
            version,
            timestamp,
            positions,
            root,
        })
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'de> Deserialize<'de> for LayoutDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        LayoutDocument::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Parse layout document text.
///
/// Fails with `MalformedDocument` on broken JSON and on JSON that is not an object at the
/// top level. See [`LayoutDocument::parse`].
pub fn parse(text: &str) -> Result<LayoutDocument, LayoutError> {
    LayoutDocument::parse(text)
}

fn decode_positions(entries: Map<String, Value>) -> BTreeMap<NodeId, Position> {
    let mut positions = BTreeMap::new();
    for (id, entry) in entries {
        let x = entry.get("x").and_then(Value::as_f64);
        let y = entry.get("y").and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => {
                positions.insert(id, Position { x, y });
            }
            _ => warn!("Skipping layout position for {}: not an x/y pair", id),
        }
    }
    positions
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
