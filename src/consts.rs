// src/consts.rs
//! Shared constants: security parameters and defaults

/// AES block size, and therefore the IV length, in bytes
pub const BLOCK_LEN: usize = 16;

/// IV length for AES-CBC
pub const IV_LEN: usize = BLOCK_LEN;

/// SHA-256 output length
pub const DIGEST_LEN: usize = 32;

/// Floor for PBKDF2 iterations: the legacy Rfc2898 default
pub const MIN_KDF_ITERATIONS: u32 = 1_000;

/// Default PBKDF2 iterations for newly sealed data
// 600_000 ≈ 0.5-1 second on a typical CPU
pub const DEFAULT_KDF_ITERATIONS: u32 = 600_000;

/// Default salt length in bytes
pub const DEFAULT_SALT_LEN: usize = 16;

/// Default chunk size for streaming encryption (64 KiB, block aligned)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default gzip compression level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Envelope format version written by `protect`
pub const ENVELOPE_VERSION: u8 = 1;

/// gzip magic bytes
pub const GZIP_MAGIC: &[u8; 2] = b"\x1f\x8b";
