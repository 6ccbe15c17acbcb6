// src/core/key_material.rs
//! Random byte generation and password-based key derivation
//!
//! Everything random comes from `rand::rng()`, a ChaCha12 CSPRNG reseeded
//! from the operating system. Derivation is PBKDF2-HMAC and therefore
//! deterministic: the same password, salt and parameters always give the same
//! key, which is what makes later decryption possible.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::aliases::CipherKey;
use crate::consts::{DEFAULT_KDF_ITERATIONS, IV_LEN, MIN_KDF_ITERATIONS};
use crate::enums::{HashAlgorithm, KeySize};
use crate::error::{Result, ToolkitError};

/// AES-CBC initialization vector
pub type Iv = [u8; IV_LEN];

/// PBKDF2 parameters stored next to the salt they were used with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub hash: HashAlgorithm,
    pub iterations: u32,
    pub key_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::Sha256,
            iterations: DEFAULT_KDF_ITERATIONS,
            key_len: KeySize::Aes256.key_len(),
        }
    }
}

impl KdfParams {
    /// Rfc2898 defaults of the tool this crate replaces: HMAC-SHA1, 1000
    /// rounds. Only for opening data sealed by it.
    pub fn legacy(key_len: usize) -> Self {
        Self {
            hash: HashAlgorithm::Sha1Legacy,
            iterations: MIN_KDF_ITERATIONS,
            key_len,
        }
    }

    /// Reject parameters no cipher can use. Cheap; run it before `derive`.
    pub fn validate(&self) -> Result<()> {
        KeySize::from_key_len(self.key_len)?;
        check_iterations(self.iterations)
    }

    pub fn derive(&self, password: &str, salt: &[u8]) -> Result<CipherKey> {
        derive_key(password, salt, self.key_len, self.iterations, self.hash)
    }
}

fn check_iterations(iterations: u32) -> Result<()> {
    if iterations < MIN_KDF_ITERATIONS {
        return Err(ToolkitError::invalid(format!(
            "iterations must be at least {MIN_KDF_ITERATIONS}, got {iterations}"
        )));
    }
    Ok(())
}

/// Fill a fresh buffer of `size` bytes from the CSPRNG
pub fn random_bytes(size: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; size];
    rand::rng().fill_bytes(&mut out);
    Ok(out)
}

/// Fresh random IV
pub fn generate_iv() -> Iv {
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);
    iv
}

pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    if len == 0 {
        return Err(ToolkitError::invalid("salt length must be positive"));
    }
    random_bytes(len)
}

/// Generate a new random AES key of the given size
#[inline]
pub fn generate_key(size: KeySize) -> CipherKey {
    let mut key = vec![0u8; size.key_len()];
    rand::rng().fill_bytes(&mut key);
    CipherKey::new(key)
}

/// PBKDF2-HMAC(`hash`) over `password` and `salt`
pub fn derive_key(
    password: &str,
    salt: &[u8],
    output_len: usize,
    iterations: u32,
    hash: HashAlgorithm,
) -> Result<CipherKey> {
    if salt.is_empty() {
        return Err(ToolkitError::invalid("salt must not be empty"));
    }
    if output_len == 0 {
        return Err(ToolkitError::invalid("derived length must be positive"));
    }
    check_iterations(iterations)?;

    tracing::debug!(?hash, iterations, output_len, "deriving key");

    let mut out = vec![0u8; output_len];
    let pw = password.as_bytes();
    match hash {
        HashAlgorithm::Sha1Legacy => pbkdf2_hmac::<Sha1>(pw, salt, iterations, &mut out),
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(pw, salt, iterations, &mut out),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(pw, salt, iterations, &mut out),
    }
    Ok(CipherKey::new(out))
}
