// src/core/serializer.rs
//! Pluggable value ↔ bytes codecs
//!
//! Both sides of a sealed value must agree on the codec; decoding with the
//! other one fails with `Deserialization` (or `CorruptData` further up when
//! the bytes never decrypted).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::enums::CodecKind;
use crate::error::{Result, ToolkitError};

pub trait ValueCodec {
    fn kind(&self) -> CodecKind;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// JSON text, UTF-8 encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredTextCodec;

impl ValueCodec for StructuredTextCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::StructuredText
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| ToolkitError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| ToolkitError::Deserialization(e.to_string()))
    }
}

/// Compact binary form (bincode, fixed-width little-endian integers)
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBinaryCodec;

impl ValueCodec for RawBinaryCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::RawBinary
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| ToolkitError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| ToolkitError::Deserialization(e.to_string()))
    }
}

impl ValueCodec for CodecKind {
    fn kind(&self) -> CodecKind {
        *self
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            CodecKind::StructuredText => StructuredTextCodec.encode(value),
            CodecKind::RawBinary => RawBinaryCodec.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            CodecKind::StructuredText => StructuredTextCodec.decode(bytes),
            CodecKind::RawBinary => RawBinaryCodec.decode(bytes),
        }
    }
}
