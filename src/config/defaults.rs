// src/config/defaults.rs
use crate::config::app::{KdfSection, PipelineSection, StreamSection};
use crate::consts::{
    DEFAULT_CHUNK_SIZE, DEFAULT_COMPRESSION_LEVEL, DEFAULT_KDF_ITERATIONS, DEFAULT_SALT_LEN,
};
use crate::enums::{CodecKind, DigestTarget, HashAlgorithm, KeySize};

/// File name looked up under the platform config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_DIR_NAME: &str = "encrypted-data-toolkit";

/// Env var pointing at an explicit config file
pub const CONFIG_ENV: &str = "EDT_CONFIG";
/// Env var forcing the minimum KDF iteration count (tests, CI)
pub const FAST_KDF_ENV: &str = "EDT_FAST_KDF";

pub fn default_kdf() -> KdfSection {
    KdfSection {
        hash: HashAlgorithm::Sha256,
        iterations: DEFAULT_KDF_ITERATIONS,
        key_len: KeySize::Aes256.key_len(),
        salt_len: DEFAULT_SALT_LEN,
    }
}

pub fn default_pipeline() -> PipelineSection {
    PipelineSection {
        codec: CodecKind::StructuredText,
        compress: true,
        compression_level: DEFAULT_COMPRESSION_LEVEL,
        digest: DigestTarget::Plaintext,
    }
}

pub fn default_stream() -> StreamSection {
    StreamSection {
        chunk_size: DEFAULT_CHUNK_SIZE,
    }
}
