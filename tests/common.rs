// tests/common.rs
//! Shared test utilities: logging setup and cheap KDF settings

#![allow(dead_code)] // each test binary uses a different subset

use encrypted_data_toolkit::consts::MIN_KDF_ITERATIONS;
use encrypted_data_toolkit::{KdfParams, ProtectOptions};

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // pretty + works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent, safe to call multiple times
}

/// Minimum-iteration KDF so façade tests stay fast
pub fn fast_kdf() -> KdfParams {
    KdfParams {
        iterations: MIN_KDF_ITERATIONS,
        ..KdfParams::default()
    }
}

pub fn fast_options() -> ProtectOptions {
    ProtectOptions::default().with_kdf(fast_kdf())
}

/// Deterministic, poorly compressible filler
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}
