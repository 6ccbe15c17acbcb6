// src/core/mod.rs
pub mod codec;
pub mod compress;
pub mod crypto;
pub mod file;
pub mod hash;
pub mod key_material;
pub mod serializer;

pub use codec::*;
pub use compress::*;
pub use crypto::*;
pub use file::*;
pub use hash::*;
pub use key_material::*;
pub use serializer::*;
