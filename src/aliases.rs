// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Anything that can reveal plaintext or key material lives in one of these
//! wrappers so it is zeroized when dropped. Salts, IVs and digests are public
//! values and stay plain byte arrays.

pub use secure_gate::dynamic_alias;

// Dynamic secrets
dynamic_alias!(CipherKey, Vec<u8>); // AES-128/192/256 key, length checked at use
dynamic_alias!(PlainText, Vec<u8>); // serialized value or decrypted bytes
dynamic_alias!(Password, String); // user-supplied passphrase (CLI)
