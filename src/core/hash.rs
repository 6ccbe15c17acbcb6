// src/core/hash.rs
//! SHA-256 integrity digests
//!
//! `verify` always compares all 32 bytes and does so without an early exit.

use std::io::{self, Read, Write};

use sha2::{Digest as _, Sha256};

use crate::consts::DIGEST_LEN;
use crate::error::{Result, ToolkitError};

pub type Digest = [u8; DIGEST_LEN];

pub fn digest(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Recompute the digest of `data` and compare it with `expected`.
///
/// Returns `Ok(false)` on mismatch. Only a wrongly sized `expected` is an error.
pub fn verify(data: &[u8], expected: &[u8]) -> Result<bool> {
    let expected = as_digest(expected)?;
    Ok(digests_match(&digest(data), expected))
}

pub(crate) fn as_digest(bytes: &[u8]) -> Result<&Digest> {
    bytes.try_into().map_err(|_| {
        ToolkitError::invalid(format!(
            "digest must be {DIGEST_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

pub(crate) fn digests_match(a: &Digest, b: &Digest) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Reader adapter hashing every byte that passes through it
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    pub fn finalize(self) -> Digest {
        self.hasher.finalize().into()
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Writer adapter hashing every byte the inner writer accepted
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    pub fn finalize(self) -> (W, Digest) {
        (self.inner, self.hasher.finalize().into())
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
