// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::consts::{BLOCK_LEN, MIN_KDF_ITERATIONS};
use crate::enums::{CodecKind, DigestTarget, HashAlgorithm, KeySize};
use crate::error::{Result, ToolkitError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kdf: KdfSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub stream: StreamSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KdfSection {
    pub hash: HashAlgorithm,
    pub iterations: u32,
    pub key_len: usize,
    pub salt_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub codec: CodecKind,
    pub compress: bool,
    pub compression_level: u32,
    pub digest: DigestTarget,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamSection {
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kdf: default_kdf(),
            pipeline: default_pipeline(),
            stream: default_stream(),
        }
    }
}

impl Default for KdfSection {
    fn default() -> Self {
        default_kdf()
    }
}

impl Default for PipelineSection {
    fn default() -> Self {
        default_pipeline()
    }
}

impl Default for StreamSection {
    fn default() -> Self {
        default_stream()
    }
}

impl Config {
    /// Reject values the pipeline would fail on later anyway
    pub fn validate(&self) -> Result<()> {
        KeySize::from_key_len(self.kdf.key_len)
            .map_err(|e| ToolkitError::Config(format!("kdf.key_len: {e}")))?;
        if self.kdf.iterations < MIN_KDF_ITERATIONS {
            return Err(ToolkitError::Config(format!(
                "kdf.iterations must be at least {MIN_KDF_ITERATIONS}"
            )));
        }
        if self.kdf.salt_len == 0 {
            return Err(ToolkitError::Config("kdf.salt_len must be positive".into()));
        }
        if self.pipeline.compression_level > 9 {
            return Err(ToolkitError::Config(
                "pipeline.compression_level must be 0..=9".into(),
            ));
        }
        if self.stream.chunk_size == 0 || self.stream.chunk_size % BLOCK_LEN != 0 {
            return Err(ToolkitError::Config(format!(
                "stream.chunk_size must be a positive multiple of {BLOCK_LEN}"
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if std::env::var_os(FAST_KDF_ENV).is_some() {
            self.kdf.iterations = MIN_KDF_ITERATIONS;
        }
    }
}

/// Parse and validate a TOML config file. Missing sections take defaults.
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mut conf: Config = toml::from_str(&content)?;
    conf.apply_env_overrides();
    conf.validate()?;
    Ok(conf)
}

fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once; falls back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let loaded = match config_path() {
            Some(path) if path.exists() => match load_from(&path) {
                Ok(conf) => Some(conf),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file, using built-in defaults");
                    None
                }
            },
            _ => None,
        };

        loaded.unwrap_or_else(|| {
            let mut conf = Config::default();
            conf.apply_env_overrides();
            conf
        })
    })
}
