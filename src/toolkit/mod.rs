// src/toolkit/mod.rs
//! Password-based sealing of values and files
//!
//! Protect: serialize → digest → (compress) → AES-CBC, with a fresh salt and
//! IV per call and the key derived from the password.
//! Open: the exact inverse. Errors keep their meaning across the pipeline:
//! `CorruptData` for undecryptable or undecompressable bytes,
//! `Deserialization` for bytes the codec rejects, `Integrity` for data that
//! decrypted but does not match its digest.

mod envelope;
mod options;

pub use envelope::{FileSeal, SealedEnvelope};
pub use options::ProtectOptions;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::aliases::PlainText;
use crate::consts::ENVELOPE_VERSION;
use crate::core::compress::{compress_with_level, decompress};
use crate::core::crypto::{
    decrypt, decrypt_stream_with, encrypt, encrypt_stream_with, StreamOptions, StreamStats,
};
use crate::core::file::write_atomically;
use crate::core::hash::{as_digest, digest, digests_match, HashingReader, HashingWriter};
use crate::core::key_material::{generate_iv, generate_salt};
use crate::core::serializer::ValueCodec;
use crate::enums::DigestTarget;
use crate::error::{Result, ToolkitError};

/// Seal `value` under `password`
pub fn protect<T>(value: &T, password: &str, options: &ProtectOptions) -> Result<SealedEnvelope>
where
    T: Serialize + ?Sized,
{
    options.validate()?;

    let salt = generate_salt(options.salt_len)?;
    let iv = generate_iv();
    let key = options.kdf.derive(password, &salt)?;

    let plaintext = PlainText::new(options.codec.encode(value)?);
    let plaintext_digest = match options.digest {
        DigestTarget::Plaintext => Some(digest(plaintext.expose_secret()).to_vec()),
        DigestTarget::Ciphertext | DigestTarget::None => None,
    };

    let sealed = if options.compress {
        let packed = PlainText::new(compress_with_level(
            plaintext.expose_secret(),
            options.compression_level,
        )?);
        encrypt(packed.expose_secret(), key.expose_secret(), &iv)?
    } else {
        encrypt(plaintext.expose_secret(), key.expose_secret(), &iv)?
    };

    let recorded_digest = match options.digest {
        DigestTarget::Ciphertext => Some(digest(&sealed).to_vec()),
        _ => plaintext_digest,
    };

    tracing::debug!(
        codec = ?options.codec,
        compressed = options.compress,
        digest = ?options.digest,
        serialized = plaintext.expose_secret().len(),
        sealed = sealed.len(),
        "value protected"
    );

    Ok(SealedEnvelope {
        version: ENVELOPE_VERSION,
        mode: options.mode,
        codec: options.codec,
        compressed: options.compress,
        kdf: options.kdf,
        salt,
        iv: iv.to_vec(),
        sealed,
        digest_target: options.digest,
        digest: recorded_digest,
        sealed_at: Utc::now(),
    })
}

/// Reverse [`protect`]
pub fn open<T: DeserializeOwned>(envelope: &SealedEnvelope, password: &str) -> Result<T> {
    envelope.check()?;
    let expected = envelope.expected_digest()?;

    if envelope.digest_target == DigestTarget::Ciphertext {
        if let Some(expected) = expected {
            if !digests_match(&digest(&envelope.sealed), expected) {
                return Err(ToolkitError::Integrity);
            }
        }
    }

    let key = envelope.kdf.derive(password, &envelope.salt)?;
    let decrypted = PlainText::new(decrypt(
        &envelope.sealed,
        key.expose_secret(),
        &envelope.iv,
    )?);
    let plaintext = if envelope.compressed {
        PlainText::new(decompress(decrypted.expose_secret())?)
    } else {
        decrypted
    };

    if envelope.digest_target == DigestTarget::Plaintext {
        if let Some(expected) = expected {
            if !digests_match(&digest(plaintext.expose_secret()), expected) {
                tracing::warn!("plaintext digest mismatch");
                return Err(ToolkitError::Integrity);
            }
        }
    }

    envelope.codec.decode(plaintext.expose_secret())
}

/// Encrypt a file under `password`, streaming. The returned [`FileSeal`] must
/// be kept with the output.
pub fn seal_file<P, Q>(
    input_path: P,
    output_path: Q,
    password: &str,
    options: &ProtectOptions,
) -> Result<FileSeal>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    options.validate()?;
    let stream_options = options.stream_options();
    let mut reader = HashingReader::new(BufReader::new(File::open(input_path.as_ref())?));

    let salt = generate_salt(options.salt_len)?;
    let iv = generate_iv();
    let key = options.kdf.derive(password, &salt)?;

    let stats = write_atomically(output_path.as_ref(), |out| {
        encrypt_stream_with(&mut reader, out, key.expose_secret(), &iv, &stream_options)
    })?;

    Ok(FileSeal {
        version: ENVELOPE_VERSION,
        mode: options.mode,
        kdf: options.kdf,
        salt,
        iv: iv.to_vec(),
        plaintext_digest: reader.finalize().to_vec(),
        plaintext_len: stats.bytes_read,
        sealed_at: Utc::now(),
    })
}

/// Reverse [`seal_file`]. The output only appears if decryption succeeded and
/// the recovered contents match the recorded digest.
pub fn open_file<P, Q>(
    input_path: P,
    output_path: Q,
    seal: &FileSeal,
    password: &str,
) -> Result<StreamStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    seal.check()?;
    let expected = *as_digest(&seal.plaintext_digest)?;
    let input = BufReader::new(File::open(input_path.as_ref())?);
    let key = seal.kdf.derive(password, &seal.salt)?;

    write_atomically(output_path.as_ref(), |out| {
        let mut hashing = HashingWriter::new(out);
        let stats = decrypt_stream_with(
            input,
            &mut hashing,
            key.expose_secret(),
            &seal.iv,
            &StreamOptions::default(),
        )?;
        let (_, actual) = hashing.finalize();
        if !digests_match(&actual, &expected) {
            return Err(ToolkitError::Integrity);
        }
        Ok(stats)
    })
}
