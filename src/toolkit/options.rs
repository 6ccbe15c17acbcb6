// src/toolkit/options.rs
use crate::config::Config;
use crate::consts::{BLOCK_LEN, DEFAULT_CHUNK_SIZE, DEFAULT_COMPRESSION_LEVEL, DEFAULT_SALT_LEN};
use crate::core::crypto::StreamOptions;
use crate::core::key_material::KdfParams;
use crate::enums::{CipherMode, CodecKind, DigestTarget};
use crate::error::{Result, ToolkitError};

/// Everything `protect`/`seal_file` need besides the value and password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectOptions {
    pub kdf: KdfParams,
    pub salt_len: usize,
    pub mode: CipherMode,
    pub codec: CodecKind,
    pub compress: bool,
    pub compression_level: u32,
    pub digest: DigestTarget,
    /// Used by `seal_file` only
    pub chunk_size: usize,
}

impl Default for ProtectOptions {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            salt_len: DEFAULT_SALT_LEN,
            mode: CipherMode::AesCbcPkcs7,
            codec: CodecKind::StructuredText,
            compress: true,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            digest: DigestTarget::Plaintext,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl From<&Config> for ProtectOptions {
    fn from(conf: &Config) -> Self {
        Self {
            kdf: KdfParams {
                hash: conf.kdf.hash,
                iterations: conf.kdf.iterations,
                key_len: conf.kdf.key_len,
            },
            salt_len: conf.kdf.salt_len,
            mode: CipherMode::AesCbcPkcs7,
            codec: conf.pipeline.codec,
            compress: conf.pipeline.compress,
            compression_level: conf.pipeline.compression_level,
            digest: conf.pipeline.digest,
            chunk_size: conf.stream.chunk_size,
        }
    }
}

impl ProtectOptions {
    /// Options from the global config (file, env, or built-in defaults)
    pub fn from_config() -> Self {
        Self::from(crate::config::load())
    }

    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_digest(mut self, digest: DigestTarget) -> Self {
        self.digest = digest;
        self
    }

    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.kdf.validate()?;
        if self.salt_len == 0 {
            return Err(ToolkitError::invalid("salt length must be positive"));
        }
        if self.compression_level > 9 {
            return Err(ToolkitError::invalid(format!(
                "compression level must be 0..=9, got {}",
                self.compression_level
            )));
        }
        if self.chunk_size == 0 || self.chunk_size % BLOCK_LEN != 0 {
            return Err(ToolkitError::invalid(format!(
                "chunk size must be a positive multiple of {BLOCK_LEN}, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }

    pub(crate) fn stream_options(&self) -> StreamOptions {
        StreamOptions::with_chunk_size(self.chunk_size)
    }
}
