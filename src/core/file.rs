// src/core/file.rs
//! File-level encryption/decryption operations
//!
//! This module handles encryption and decryption with file I/O,
//! building on the streaming primitives from crypto::stream.
//! Output is staged in a temp file next to the destination and only renamed
//! over it once the whole transform succeeded, so a failed run never leaves a
//! truncated file behind and never touches an existing one.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::crypto::{
    decrypt_stream_with, encrypt_stream_with, validate_key_iv, StreamOptions, StreamStats,
};
use crate::error::Result;

/// Encrypt a file on disk with AES-CBC, streaming
pub fn encrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
) -> Result<StreamStats> {
    encrypt_file_with(input_path, output_path, key, iv, &StreamOptions::default())
}

pub fn encrypt_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    let input = BufReader::new(File::open(input_path.as_ref())?);
    encrypt_reader_to_file(input, output_path, key, iv, options)
}

/// Encrypt everything `reader` yields into `output_path`, published only on
/// success
pub fn encrypt_reader_to_file<R: Read, Q: AsRef<Path>>(
    reader: R,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    write_atomically(output_path.as_ref(), |out| {
        encrypt_stream_with(reader, out, key, iv, options)
    })
}

/// Decrypt a file produced by [`encrypt_file`]
pub fn decrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
) -> Result<StreamStats> {
    decrypt_file_with(input_path, output_path, key, iv, &StreamOptions::default())
}

pub fn decrypt_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    let input = BufReader::new(File::open(input_path.as_ref())?);
    decrypt_reader_to_file(input, output_path, key, iv, options)
}

pub fn decrypt_reader_to_file<R: Read, Q: AsRef<Path>>(
    reader: R,
    output_path: Q,
    key: &[u8],
    iv: &[u8],
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_key_iv(key, iv)?;
    write_atomically(output_path.as_ref(), |out| {
        decrypt_stream_with(reader, out, key, iv, options)
    })
}

/// Run `write` against a temp file in `output`'s directory and move it into
/// place only if `write` returns `Ok`. On any error the temp file is removed
/// when it drops.
pub(crate) fn write_atomically<T, F>(output: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;

    let value = {
        let mut out = BufWriter::new(staged.as_file_mut());
        let value = write(&mut out)?;
        out.flush()?;
        value
    };
    staged.as_file().sync_all()?;
    staged.persist(output).map_err(|e| e.error)?;

    tracing::debug!(path = %output.display(), "output published");
    Ok(value)
}
