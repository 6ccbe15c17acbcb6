// src/core/crypto/buffer.rs
//! In-memory AES-CBC: raw bytes and serialized values

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::aliases::PlainText;
use crate::core::serializer::ValueCodec;
use crate::error::Result;

use super::cipher::{CbcDecryptor, CbcEncryptor};

/// Encrypt `plaintext` with AES-CBC/PKCS#7 under `key` (16/24/32 bytes) and a
/// 16-byte `iv`.
///
/// Reusing an IV under the same key leaks which messages share a prefix;
/// callers must generate a fresh IV per message.
pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = CbcEncryptor::new(key, iv)?;
    let ciphertext = cipher.encrypt_vec(plaintext);
    tracing::trace!(plaintext = plaintext.len(), ciphertext = ciphertext.len(), "encrypted buffer");
    Ok(ciphertext)
}

/// Inverse of [`encrypt`]. A wrong key or IV almost always surfaces as
/// `CorruptData` (bad padding).
pub fn decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let cipher = CbcDecryptor::new(key, iv)?;
    cipher.decrypt_vec(ciphertext)
}

/// Serialize `value` with `codec`, then encrypt
pub fn encrypt_value<T, C>(value: &T, key: &[u8], iv: &[u8], codec: &C) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
    C: ValueCodec,
{
    let cipher = CbcEncryptor::new(key, iv)?;
    let plaintext = PlainText::new(codec.encode(value)?);
    Ok(cipher.encrypt_vec(plaintext.expose_secret()))
}

/// Decrypt, then deserialize with `codec`. The codec must match the one used
/// to seal the value.
pub fn decrypt_value<T, C>(blob: &[u8], key: &[u8], iv: &[u8], codec: &C) -> Result<T>
where
    T: DeserializeOwned,
    C: ValueCodec,
{
    let cipher = CbcDecryptor::new(key, iv)?;
    let plaintext = PlainText::new(cipher.decrypt_vec(blob)?);
    codec.decode(plaintext.expose_secret())
}
