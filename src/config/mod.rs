// src/config/mod.rs
//! Configuration system for encrypted-data-toolkit
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, load_from, Config, KdfSection, PipelineSection, StreamSection};

mod app;
mod defaults;
