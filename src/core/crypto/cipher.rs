// src/core/crypto/cipher.rs
//! AES-CBC cipher state, dispatched over the three AES key sizes
//!
//! Finalization (`finish`) consumes the state, so the padded block can be
//! produced or stripped exactly once.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::consts::{BLOCK_LEN, IV_LEN};
use crate::enums::KeySize;
use crate::error::{Result, ToolkitError};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Reject bad key/IV lengths before any cipher state exists
pub fn validate_key_iv(key: &[u8], iv: &[u8]) -> Result<KeySize> {
    let size = KeySize::from_key_len(key.len())?;
    if iv.len() != IV_LEN {
        return Err(ToolkitError::invalid(format!(
            "IV must be {IV_LEN} bytes, got {}",
            iv.len()
        )));
    }
    Ok(size)
}

// Lengths are validated first, so this only fires on a library bug.
fn init_err(e: cbc::cipher::InvalidLength) -> ToolkitError {
    ToolkitError::invalid(format!("cipher init: {e}"))
}

fn encrypt_blocks<C: BlockEncryptMut>(cipher: &mut C, buf: &mut [u8]) {
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }
}

fn decrypt_blocks<C: BlockDecryptMut>(cipher: &mut C, buf: &mut [u8]) {
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }
}

pub(crate) enum CbcEncryptor {
    Aes128(Aes128CbcEnc),
    Aes192(Aes192CbcEnc),
    Aes256(Aes256CbcEnc),
}

impl CbcEncryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        Ok(match validate_key_iv(key, iv)? {
            KeySize::Aes128 => Self::Aes128(Aes128CbcEnc::new_from_slices(key, iv).map_err(init_err)?),
            KeySize::Aes192 => Self::Aes192(Aes192CbcEnc::new_from_slices(key, iv).map_err(init_err)?),
            KeySize::Aes256 => Self::Aes256(Aes256CbcEnc::new_from_slices(key, iv).map_err(init_err)?),
        })
    }

    /// Encrypt whole blocks in place. `buf.len()` must be block aligned.
    pub fn encrypt_blocks(&mut self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0);
        match self {
            Self::Aes128(c) => encrypt_blocks(c, buf),
            Self::Aes192(c) => encrypt_blocks(c, buf),
            Self::Aes256(c) => encrypt_blocks(c, buf),
        }
    }

    /// Pad the first `msg_len` bytes of `buf` and encrypt them.
    /// `buf` needs room for up to one extra block.
    pub fn finish(self, buf: &mut [u8], msg_len: usize) -> Result<&[u8]> {
        let out = match self {
            Self::Aes128(c) => c.encrypt_padded_mut::<Pkcs7>(buf, msg_len),
            Self::Aes192(c) => c.encrypt_padded_mut::<Pkcs7>(buf, msg_len),
            Self::Aes256(c) => c.encrypt_padded_mut::<Pkcs7>(buf, msg_len),
        };
        out.map_err(|_| ToolkitError::invalid("no room for the final padding block"))
    }

    /// One-shot encryption of a whole buffer
    pub fn encrypt_vec(self, plaintext: &[u8]) -> Vec<u8> {
        match self {
            Self::Aes128(c) => c.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            Self::Aes192(c) => c.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            Self::Aes256(c) => c.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        }
    }
}

pub(crate) enum CbcDecryptor {
    Aes128(Aes128CbcDec),
    Aes192(Aes192CbcDec),
    Aes256(Aes256CbcDec),
}

impl CbcDecryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        Ok(match validate_key_iv(key, iv)? {
            KeySize::Aes128 => Self::Aes128(Aes128CbcDec::new_from_slices(key, iv).map_err(init_err)?),
            KeySize::Aes192 => Self::Aes192(Aes192CbcDec::new_from_slices(key, iv).map_err(init_err)?),
            KeySize::Aes256 => Self::Aes256(Aes256CbcDec::new_from_slices(key, iv).map_err(init_err)?),
        })
    }

    pub fn decrypt_blocks(&mut self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0);
        match self {
            Self::Aes128(c) => decrypt_blocks(c, buf),
            Self::Aes192(c) => decrypt_blocks(c, buf),
            Self::Aes256(c) => decrypt_blocks(c, buf),
        }
    }

    /// Decrypt the final block(s) in `buf` and strip PKCS#7 padding.
    ///
    /// Padding failures are not timing-hardened; CBC without a MAC is a
    /// padding-oracle surface and callers exposed to one need a digest or MAC
    /// on top.
    pub fn finish(self, buf: &mut [u8]) -> Result<&[u8]> {
        check_ciphertext_len(buf.len())?;
        let out = match self {
            Self::Aes128(c) => c.decrypt_padded_mut::<Pkcs7>(buf),
            Self::Aes192(c) => c.decrypt_padded_mut::<Pkcs7>(buf),
            Self::Aes256(c) => c.decrypt_padded_mut::<Pkcs7>(buf),
        };
        out.map_err(|_| ToolkitError::corrupt("invalid padding"))
    }

    pub fn decrypt_vec(self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_ciphertext_len(ciphertext.len())?;
        let out = match self {
            Self::Aes128(c) => c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            Self::Aes192(c) => c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            Self::Aes256(c) => c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };
        out.map_err(|_| ToolkitError::corrupt("invalid padding"))
    }
}

pub(crate) fn check_ciphertext_len(len: usize) -> Result<()> {
    if len == 0 || len % BLOCK_LEN != 0 {
        return Err(ToolkitError::corrupt(format!(
            "ciphertext length {len} is not a positive multiple of {BLOCK_LEN}"
        )));
    }
    Ok(())
}
