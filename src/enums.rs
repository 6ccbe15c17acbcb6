// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for all #[derive(...)] enums that represent
//! user-visible choices: hash functions, cipher modes, codecs, etc.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolkitError};

/// PRF used by PBKDF2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    /// HMAC-SHA1, what the legacy Rfc2898 derivation used. Read-compat only.
    Sha1Legacy,
    #[default]
    Sha256,
    Sha512,
}

/// Block cipher mode. CBC is the only one shipped; it is still passed around
/// explicitly so every sealed artifact records how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum CipherMode {
    #[default]
    AesCbcPkcs7,
    // Future:
    // AesGcm,
}

/// AES variant, selected by key length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    pub const fn key_len(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(ToolkitError::invalid(format!(
                "AES key must be 16, 24 or 32 bytes, got {other}"
            ))),
        }
    }
}

/// Which bytes the façade digests for tamper detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DigestTarget {
    /// Serialized value, before compression and encryption
    #[default]
    Plaintext,
    /// Sealed bytes; checked before anything is decrypted
    Ciphertext,
    None,
}

/// Serializer used to turn a value into plaintext bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CodecKind {
    /// UTF-8 JSON
    #[default]
    StructuredText,
    /// bincode
    RawBinary,
}
