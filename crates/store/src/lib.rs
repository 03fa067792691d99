//! # ComponentAI Store
//!
//! Durable local storage for ComponentAI.
//!
//! ## Contents
//!
//! - **kv**: the `KeyValueStore` contract with file-backed and in-memory backends
//! - **history**: the five-entry `HistoryCache`
//! - **preferences**: the `PreferenceStore` for editor font size and comment toggle
//!
//! All three keys are independent. Loads are defensive: anything absent or
//! malformed reads as the default instead of failing.

pub mod error;
pub mod history;
pub mod kv;
pub mod preferences;

pub use error::{StoreError, StoreResult};
pub use history::{HISTORY_KEY, HistoryCache};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::{FONT_SIZE_KEY, INCLUDE_COMMENTS_KEY, PreferenceStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
