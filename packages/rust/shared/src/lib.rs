//! Shared types, error model, and configuration for layoutmap.
//!
//! This crate is the foundation depended on by all other layoutmap crates.
//! It provides:
//! - [`LayoutMapError`]: the unified error type
//! - The normalized model ([`FieldRecord`], [`DbFieldRecord`], [`ExtractionResult`], ...)
//! - [`pairs`]: ordered pair-list serde for registries
//! - Configuration ([`AppConfig`], [`ExtractionConfig`], config loading)

pub mod config;
pub mod error;
pub mod pairs;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ExtractionConfig, OutputConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, validate_config,
};
pub use error::{LayoutMapError, Result};
pub use types::{
    ButtonRecord, ButtonRegistry, CardRecord, CardRegistry, DbFieldRecord, DbFieldRegistry,
    Dependency, ExtractStats, ExtractionResult, FieldLovs, FieldRecord, FieldRegistry, Flag,
    LayoutFlags, LayoutType, ProfileMapping, ProfileRegistry,
};
