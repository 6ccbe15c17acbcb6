// tests/file_tests.rs
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use encrypted_data_toolkit::core::file::{
    decrypt_file_with, decrypt_reader_to_file, encrypt_file_with, encrypt_reader_to_file,
};
use encrypted_data_toolkit::{
    decrypt, decrypt_file, encrypt, encrypt_file, CancelFlag, StreamOptions, ToolkitError,
};
use tempfile::tempdir;

mod common;

const KEY: [u8; 32] = [7u8; 32];
const IV: [u8; 16] = [9u8; 16];

fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

/// Reader that raises `cancel` once `after` bytes have been handed out
struct CancelAfterBytes<R> {
    inner: R,
    served: usize,
    after: usize,
    cancel: CancelFlag,
}

impl<R: Read> Read for CancelAfterBytes<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.served += n;
        if self.served >= self.after {
            self.cancel.cancel();
        }
        Ok(n)
    }
}

#[test]
fn test_file_roundtrip_ten_megabytes() {
    common::setup();
    let dir = tempdir().unwrap();
    let plain = dir.path().join("big.bin");
    let sealed = dir.path().join("big.bin.enc");
    let restored = dir.path().join("big.out");

    let data = common::pattern_bytes(10 * 1024 * 1024);
    fs::write(&plain, &data).unwrap();

    let stats = encrypt_file(&plain, &sealed, &KEY, &IV).unwrap();
    assert_eq!(stats.bytes_read, data.len() as u64);
    assert_eq!(fs::metadata(&sealed).unwrap().len(), data.len() as u64 + 16);
    assert!(stats.largest_chunk <= 64 * 1024 + 16);

    let stats = decrypt_file(&sealed, &restored, &KEY, &IV).unwrap();
    assert_eq!(stats.bytes_written, data.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn test_encrypted_file_matches_buffer_decrypt() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("note.txt");
    let sealed = dir.path().join("note.enc");
    fs::write(&plain, b"a short note").unwrap();

    encrypt_file(&plain, &sealed, &KEY, &IV).unwrap();
    let ct = fs::read(&sealed).unwrap();
    assert_eq!(decrypt(&ct, &KEY, &IV).unwrap(), b"a short note");
}

#[test]
fn test_empty_file_roundtrip() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("empty");
    let sealed = dir.path().join("empty.enc");
    let restored = dir.path().join("empty.out");
    fs::write(&plain, b"").unwrap();

    encrypt_file(&plain, &sealed, &KEY, &IV).unwrap();
    assert_eq!(fs::metadata(&sealed).unwrap().len(), 16);
    decrypt_file(&sealed, &restored, &KEY, &IV).unwrap();
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = encrypt_file(
        dir.path().join("nope"),
        dir.path().join("out"),
        &KEY,
        &IV,
    )
    .unwrap_err();
    assert!(matches!(err, ToolkitError::Io(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_bad_key_leaves_no_output() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    fs::write(&plain, b"data").unwrap();

    let err = encrypt_file(&plain, dir.path().join("out"), &[0u8; 5], &IV).unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidArgument(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_failed_decrypt_keeps_existing_output_intact() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    let sealed = dir.path().join("in.enc");
    let restored = dir.path().join("restored");
    fs::write(&plain, common::pattern_bytes(50_000)).unwrap();
    encrypt_file(&plain, &sealed, &KEY, &IV).unwrap();

    // Truncate so the ciphertext is no longer block aligned
    let ct = fs::read(&sealed).unwrap();
    fs::write(&sealed, &ct[..ct.len() - 5]).unwrap();

    fs::write(&restored, b"previous contents").unwrap();
    let before = dir_entries(dir.path());

    let err = decrypt_file(&sealed, &restored, &KEY, &IV).unwrap_err();
    assert!(matches!(err, ToolkitError::CorruptData(_)));
    assert_eq!(fs::read(&restored).unwrap(), b"previous contents");
    assert_eq!(dir_entries(dir.path()), before, "temp file left behind");
}

#[test]
fn test_cancelled_file_encrypt_leaves_no_output() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    let sealed = dir.path().join("in.enc");
    fs::write(&plain, common::pattern_bytes(200_000)).unwrap();

    let cancel = CancelFlag::new();
    cancel.cancel();
    let options = StreamOptions::with_chunk_size(4096).cancellable(cancel);

    let err = encrypt_file_with(&plain, &sealed, &KEY, &IV, &options).unwrap_err();
    assert!(matches!(err, ToolkitError::Cancelled));
    assert!(!sealed.exists());
    assert_eq!(dir_entries(dir.path()), 1);
}

#[test]
fn test_small_chunks_file_roundtrip() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    let sealed = dir.path().join("in.enc");
    let restored = dir.path().join("out");
    let data = common::pattern_bytes(12_345);
    fs::write(&plain, &data).unwrap();

    let options = StreamOptions::with_chunk_size(32);
    let stats = encrypt_file_with(&plain, &sealed, &KEY, &IV, &options).unwrap();
    assert!(stats.largest_chunk <= 48);
    decrypt_file_with(&sealed, &restored, &KEY, &IV, &options).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn test_output_overwrites_existing_on_success() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    let sealed = dir.path().join("in.enc");
    fs::write(&plain, b"fresh").unwrap();
    fs::write(&sealed, b"stale stale stale").unwrap();

    encrypt_file(&plain, &sealed, &KEY, &IV).unwrap();
    assert_eq!(
        decrypt(&fs::read(&sealed).unwrap(), &KEY, &IV).unwrap(),
        b"fresh"
    );
}

#[test]
fn test_cancel_after_chunks_written_publishes_nothing() {
    let dir = tempdir().unwrap();
    let sealed = dir.path().join("partial.enc");
    let data = common::pattern_bytes(200_000);

    let cancel = CancelFlag::new();
    let options = StreamOptions::with_chunk_size(4096).cancellable(cancel.clone());
    let reader = CancelAfterBytes {
        inner: Cursor::new(&data),
        served: 0,
        after: 3 * 4096,
        cancel,
    };

    let err = encrypt_reader_to_file(reader, &sealed, &KEY, &IV, &options).unwrap_err();
    assert!(matches!(err, ToolkitError::Cancelled));
    assert!(!sealed.exists());
    assert_eq!(dir_entries(dir.path()), 0, "temp file left behind");
}

#[test]
fn test_cancel_mid_decrypt_keeps_existing_output() {
    let dir = tempdir().unwrap();
    let restored = dir.path().join("restored");
    fs::write(&restored, b"previous contents").unwrap();

    let data = common::pattern_bytes(200_000);
    let ct = encrypt(&data, &KEY, &IV).unwrap();

    let cancel = CancelFlag::new();
    let options = StreamOptions::with_chunk_size(4096).cancellable(cancel.clone());
    let reader = CancelAfterBytes {
        inner: Cursor::new(&ct),
        served: 0,
        after: 5 * 4096,
        cancel,
    };

    let err = decrypt_reader_to_file(reader, &restored, &KEY, &IV, &options).unwrap_err();
    assert!(matches!(err, ToolkitError::Cancelled));
    assert_eq!(fs::read(&restored).unwrap(), b"previous contents");
    assert_eq!(dir_entries(dir.path()), 1, "temp file left behind");
}

#[test]
fn test_reader_to_file_roundtrip() {
    let dir = tempdir().unwrap();
    let sealed = dir.path().join("from-reader.enc");
    let restored = dir.path().join("from-reader.out");
    let data = common::pattern_bytes(70_000);
    let options = StreamOptions::with_chunk_size(1024);

    encrypt_reader_to_file(Cursor::new(&data), &sealed, &KEY, &IV, &options).unwrap();
    let input = fs::File::open(&sealed).unwrap();
    decrypt_reader_to_file(input, &restored, &KEY, &IV, &options).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}
