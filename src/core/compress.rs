// src/core/compress.rs
//! gzip compression used ahead of encryption
//!
//! Only plaintext is ever compressed; ciphertext does not shrink.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::consts::{DEFAULT_COMPRESSION_LEVEL, GZIP_MAGIC};
use crate::error::{Result, ToolkitError};

// 10-byte header + 8-byte CRC32/ISIZE trailer
const GZIP_MIN_LEN: usize = 18;

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with_level(data, DEFAULT_COMPRESSION_LEVEL)
}

pub fn compress_with_level(data: &[u8], level: u32) -> Result<Vec<u8>> {
    if level > 9 {
        return Err(ToolkitError::invalid(format!(
            "compression level must be 0..=9, got {level}"
        )));
    }
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::new(level));
    encoder.write_all(data)?;
    let out = encoder.finish()?;
    tracing::trace!(input = data.len(), output = out.len(), "compressed");
    Ok(out)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < GZIP_MIN_LEN {
        return Err(ToolkitError::corrupt(format!(
            "gzip stream too short: {} bytes",
            data.len()
        )));
    }
    if !data.starts_with(GZIP_MAGIC) {
        return Err(ToolkitError::corrupt("missing gzip magic bytes"));
    }

    let mut out = Vec::with_capacity(data.len() * 2);
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| ToolkitError::corrupt(format!("gzip stream: {e}")))?;
    Ok(out)
}
