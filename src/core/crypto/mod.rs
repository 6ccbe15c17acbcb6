// src/core/crypto/mod.rs
//! Symmetric encryption: AES in CBC mode with PKCS#7 padding
//!
//! Buffer functions work on in-memory slices; stream functions move data
//! through a fixed-size buffer. Both validate key (16/24/32 bytes) and IV
//! (16 bytes) before touching any data.
mod buffer;
mod cipher;
mod stream;

pub use buffer::{decrypt, decrypt_value, encrypt, encrypt_value};
pub use cipher::validate_key_iv;
pub use stream::{
    decrypt_stream, decrypt_stream_with, encrypt_stream, encrypt_stream_with, CancelFlag,
    StreamOptions, StreamStats,
};
