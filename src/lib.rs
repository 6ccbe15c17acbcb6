// src/lib.rs
//! encrypted-data-toolkit: password-sealed values and files
//!
//! Features:
//! - PBKDF2 key derivation (SHA-1 legacy, SHA-256, SHA-512)
//! - AES-128/192/256 in CBC mode with PKCS#7, in memory or streamed
//! - gzip compression ahead of encryption
//! - SHA-256 integrity digests
//! - Pluggable JSON / bincode value codecs
//! - Full secure-gate integration for keys and plaintext buffers
//!
//! Security posture: CBC is malleable and, without a MAC, exposes a padding
//! oracle to anyone who can submit ciphertexts and observe failures. Never
//! reuse an IV under the same key. The façade's digest detects tampering
//! after decryption; it is not a MAC.

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod toolkit;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{CipherKey, Password, PlainText};
pub use config::load as load_config;
pub use crate::core::{
    compress, decompress, decrypt, decrypt_file, decrypt_stream, decrypt_value, derive_key,
    digest, encrypt, encrypt_file, encrypt_stream, encrypt_value, from_hex, random_bytes, to_hex,
    verify, CancelFlag, Digest, Iv, KdfParams, RawBinaryCodec, StreamOptions, StreamStats,
    StructuredTextCodec, ValueCodec,
};
pub use enums::{CipherMode, CodecKind, DigestTarget, HashAlgorithm, KeySize};
pub use error::{Result, ToolkitError};
pub use toolkit::{open, open_file, protect, seal_file, FileSeal, ProtectOptions, SealedEnvelope};
