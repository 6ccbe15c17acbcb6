// src/core/codec.rs
//! Text representations of keys, IVs, salts and digests
//!
//! The canonical form is upper-case hex byte pairs joined by dashes,
//! e.g. `0A-1B-FF`. Parsing accepts either case but nothing else: no plain
//! run-together hex, no whitespace, no empty groups.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::{Result, ToolkitError};

const SEPARATOR: char = '-';

pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(&hex::encode_upper([*byte]));
    }
    out
}

pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(SEPARATOR)
        .enumerate()
        .map(|(i, group)| {
            if group.len() != 2 {
                return Err(ToolkitError::invalid(format!(
                    "hex group {i} must be two digits, got {group:?}"
                )));
            }
            let mut byte = [0u8; 1];
            hex::decode_to_slice(group, &mut byte)
                .map_err(|e| ToolkitError::invalid(format!("hex group {i}: {e}")))?;
            Ok(byte[0])
        })
        .collect()
}

/// Multiple string representations of key material for export/display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRepr {
    pub hex: String,
    pub dashed_hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}

pub fn representations(bytes: &[u8]) -> KeyRepr {
    KeyRepr {
        hex: hex::encode(bytes),
        dashed_hex: to_hex(bytes),
        base64: STANDARD.encode(bytes),
        base64url_no_pad: URL_SAFE_NO_PAD.encode(bytes),
    }
}

/// serde helpers storing byte fields in the dashed-hex form
pub(crate) mod dashed_hex {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::to_hex(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(de)?;
        super::from_hex(&text).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, ser: S) -> Result<S::Ok, S::Error> {
            match bytes {
                Some(b) => ser.serialize_some(&super::super::to_hex(b)),
                None => ser.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<u8>>, D::Error> {
            Option::<String>::deserialize(de)?
                .map(|text| super::super::from_hex(&text).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// serde helper storing sealed bytes as base64url without padding
pub(crate) mod base64url {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(de)?;
        URL_SAFE_NO_PAD.decode(text).map_err(D::Error::custom)
    }
}
