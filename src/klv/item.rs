//! Decoded KLV item.

use crate::FourCC;

use super::{header::KlvHeader, value::Value};

/// A single decoded KLV item: 8-byte header plus decoded payload.
///
/// Items are plain values. They own their decoded payload
/// and are never mutated after decoding; nested sequences
/// hold owned child items.
#[derive(Debug, Clone, PartialEq)]
pub struct KlvItem {
    /// Header
    pub header: KlvHeader,
    /// Decoded payload
    pub value: Value,
}

impl KlvItem {
    pub fn fourcc(&self) -> &FourCC {
        &self.header.fourcc
    }

    /// Convenience check for nested sequences.
    pub fn is_container(&self) -> bool {
        matches!(self.value, Value::Nested(_))
    }
}
