//! # ComponentAI Core
//!
//! Core types, configuration and error handling for ComponentAI.
//!
//! This crate provides the foundational building blocks used by the
//! storage, generation, UI and CLI crates:
//!
//! - **Types**: `FrameworkChoice`, `GenerationRecord`, `HistoryLog`, `Preferences`
//! - **Config**: `AppConfig`, loaded from TOML with defaults for every field
//! - **Errors**: `GenerationError` for generation attempts, `ComponentError` for the rest
//!

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use config::AppConfig;
pub use error::{ComponentError, ComponentResult, FailureCause, GenerationError, ResultExt};
pub use types::{
    DEFAULT_FONT_SIZE, EXPORT_FILE_NAME, EXPORT_MIME_TYPE, ExportArtifact, FrameworkChoice,
    GenerationRecord, HISTORY_LIMIT, HistoryLog, MAX_FONT_SIZE, MIN_FONT_SIZE, Preferences,
    clamp_font_size, format_timestamp, now_millis,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
