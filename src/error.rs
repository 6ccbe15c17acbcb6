// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Bad lengths, sizes, iteration counts or malformed hex.
    /// Always raised before any cryptographic work starts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bad padding, truncated ciphertext or a broken compressed stream.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Data decrypted cleanly but does not match its recorded digest.
    #[error("integrity check failed: digest mismatch")]
    Integrity,

    #[error("operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ToolkitError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ToolkitError::InvalidArgument(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        ToolkitError::CorruptData(msg.into())
    }
}

impl From<toml::de::Error> for ToolkitError {
    fn from(err: toml::de::Error) -> Self {
        ToolkitError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
