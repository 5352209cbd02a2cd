//! JSON decoding for topology trees and layout documents.
//!
//! Each tree level nests two JSON levels (the node object and its `children` array), so
//! serde_json's default limit of 128 stops at 64 tree levels. These decoders lift that
//! limit and grow the stack on demand instead.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Decode `text` with no nesting limit
pub fn from_str<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Decode `bytes` with no nesting limit
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Convert an already parsed value, growing the stack for deep trees
pub fn from_value<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}
