// src/core/crypto/stream.rs
//! Bounded-memory AES-CBC over `Read`/`Write`
//!
//! Memory use is one buffer of `chunk_size + 16` bytes no matter how large the
//! input is. On decrypt the last ciphertext block is always held back until
//! EOF so padding is only stripped from the true final block.
//!
//! A failed or cancelled call may already have written part of its output.
//! That output is never valid; `core::file` stages it in a temp file for
//! exactly this reason.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::consts::{BLOCK_LEN, DEFAULT_CHUNK_SIZE};
use crate::error::{Result, ToolkitError};

use super::cipher::{validate_key_iv, CbcDecryptor, CbcEncryptor};

/// Cooperative cancellation signal, checked between chunks
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Bytes processed per iteration. Must be a positive multiple of 16.
    pub chunk_size: usize,
    pub cancel: Option<CancelFlag>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            cancel: None,
        }
    }
}

impl StreamOptions {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            cancel: None,
        }
    }

    pub fn cancellable(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn validated_chunk_size(&self) -> Result<usize> {
        if self.chunk_size == 0 || self.chunk_size % BLOCK_LEN != 0 {
            return Err(ToolkitError::invalid(format!(
                "chunk size must be a positive multiple of {BLOCK_LEN}, got {}",
                self.chunk_size
            )));
        }
        Ok(self.chunk_size)
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.is_cancelled() => Err(ToolkitError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Counters for one stream transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub chunks: u64,
    /// Largest single write; bounded by `chunk_size + 16`
    pub largest_chunk: usize,
}

impl StreamStats {
    fn record_write(&mut self, len: usize) {
        self.bytes_written += len as u64;
        self.chunks += 1;
        self.largest_chunk = self.largest_chunk.max(len);
    }
}

/// Read until `buf` is full or the reader is exhausted.
/// Returns the byte count and whether EOF was hit.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<(usize, bool)> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok((filled, true)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok((filled, false))
}

pub fn encrypt_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    key: &[u8],
    iv: &[u8],
) -> Result<StreamStats> {
    encrypt_stream_with(reader, writer, key, iv, &StreamOptions::default())
}

pub fn encrypt_stream_with<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    let chunk_size = options.validated_chunk_size()?;
    let mut cipher = CbcEncryptor::new(key, iv)?;

    let mut buf = Zeroizing::new(vec![0u8; chunk_size + BLOCK_LEN]);
    let mut stats = StreamStats::default();

    let tail_len = loop {
        options.check_cancelled()?;
        let (n, eof) = read_full(&mut reader, &mut buf[..chunk_size])?;
        stats.bytes_read += n as u64;
        if eof {
            break n;
        }
        cipher.encrypt_blocks(&mut buf[..chunk_size]);
        writer.write_all(&buf[..chunk_size])?;
        stats.record_write(chunk_size);
    };

    options.check_cancelled()?;
    let last = cipher.finish(&mut buf[..], tail_len)?;
    writer.write_all(last)?;
    stats.record_write(last.len());
    writer.flush()?;

    tracing::debug!(
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        chunks = stats.chunks,
        "stream encrypted"
    );
    Ok(stats)
}

pub fn decrypt_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    key: &[u8],
    iv: &[u8],
) -> Result<StreamStats> {
    decrypt_stream_with(reader, writer, key, iv, &StreamOptions::default())
}

pub fn decrypt_stream_with<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    let chunk_size = options.validated_chunk_size()?;
    let mut cipher = CbcDecryptor::new(key, iv)?;

    let mut buf = Zeroizing::new(vec![0u8; chunk_size + BLOCK_LEN]);
    let mut stats = StreamStats::default();
    let mut filled = 0;

    loop {
        options.check_cancelled()?;
        let (n, eof) = read_full(&mut reader, &mut buf[filled..])?;
        stats.bytes_read += n as u64;
        filled += n;
        if eof {
            break;
        }
        // Buffer is full: everything but the trailing block is safe to emit.
        cipher.decrypt_blocks(&mut buf[..chunk_size]);
        writer.write_all(&buf[..chunk_size])?;
        stats.record_write(chunk_size);
        buf.copy_within(chunk_size.., 0);
        filled = BLOCK_LEN;
    }

    options.check_cancelled()?;
    let last = cipher.finish(&mut buf[..filled])?;
    writer.write_all(last)?;
    stats.record_write(last.len());
    writer.flush()?;

    tracing::debug!(
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        chunks = stats.chunks,
        "stream decrypted"
    );
    Ok(stats)
}
