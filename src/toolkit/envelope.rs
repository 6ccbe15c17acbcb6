// src/toolkit/envelope.rs
//! Records that travel with sealed data
//!
//! Salt and IV are not secret but opening is impossible without them, so they
//! are kept together with the ciphertext and the parameters that produced it.
//! Serialized as a small JSON record: byte fields in dashed hex, ciphertext in
//! base64url without padding.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{ENVELOPE_VERSION, IV_LEN};
use crate::core::codec::{base64url, dashed_hex};
use crate::core::hash::{as_digest, Digest};
use crate::core::key_material::KdfParams;
use crate::enums::{CipherMode, CodecKind, DigestTarget};
use crate::error::{Result, ToolkitError};

/// Output of `protect`: salt, IV, sealed bytes and optional digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedEnvelope {
    pub version: u8,
    pub mode: CipherMode,
    pub codec: CodecKind,
    pub compressed: bool,
    pub kdf: KdfParams,
    #[serde(with = "dashed_hex")]
    pub salt: Vec<u8>,
    #[serde(with = "dashed_hex")]
    pub iv: Vec<u8>,
    #[serde(with = "base64url")]
    pub sealed: Vec<u8>,
    pub digest_target: DigestTarget,
    #[serde(
        with = "dashed_hex::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub digest: Option<Vec<u8>>,
    pub sealed_at: DateTime<Utc>,
}

impl SealedEnvelope {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ToolkitError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_str(json)
            .map_err(|e| ToolkitError::Deserialization(e.to_string()))?;
        envelope.check()?;
        Ok(envelope)
    }

    /// Structural checks; nothing here needs the password
    pub(crate) fn check(&self) -> Result<()> {
        check_header(self.version, self.mode, &self.iv)?;
        self.kdf.validate()?;
        self.expected_digest()?;
        Ok(())
    }

    pub(crate) fn expected_digest(&self) -> Result<Option<&Digest>> {
        if self.digest_target == DigestTarget::None {
            return Ok(None);
        }
        self.digest.as_deref().map(as_digest).transpose()
    }
}

/// Output of `seal_file`: everything needed to reopen the file except the
/// password. The SHA-256 covers the plaintext file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSeal {
    pub version: u8,
    pub mode: CipherMode,
    pub kdf: KdfParams,
    #[serde(with = "dashed_hex")]
    pub salt: Vec<u8>,
    #[serde(with = "dashed_hex")]
    pub iv: Vec<u8>,
    #[serde(with = "dashed_hex")]
    pub plaintext_digest: Vec<u8>,
    pub plaintext_len: u64,
    pub sealed_at: DateTime<Utc>,
}

impl FileSeal {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ToolkitError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seal: Self = serde_json::from_str(json)
            .map_err(|e| ToolkitError::Deserialization(e.to_string()))?;
        seal.check()?;
        Ok(seal)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub(crate) fn check(&self) -> Result<()> {
        check_header(self.version, self.mode, &self.iv)?;
        self.kdf.validate()?;
        as_digest(&self.plaintext_digest)?;
        Ok(())
    }
}

fn check_header(version: u8, mode: CipherMode, iv: &[u8]) -> Result<()> {
    if version != ENVELOPE_VERSION {
        return Err(ToolkitError::invalid(format!(
            "unsupported envelope version {version}"
        )));
    }
    match mode {
        CipherMode::AesCbcPkcs7 => {}
    }
    if iv.len() != IV_LEN {
        return Err(ToolkitError::invalid(format!(
            "IV must be {IV_LEN} bytes, got {}",
            iv.len()
        )));
    }
    Ok(())
}
