//! Editor preference store
//!
//! Two independent settings, each under its own key and each written through
//! immediately on change:
//! - `editor-font-size`: stringified integer, clamped to 12..=24
//! - `include-comments`: `"true"` or `"false"`
//!
//! Missing or unparsable values fall back to the defaults.

use componentai_core::{DEFAULT_FONT_SIZE, Preferences, clamp_font_size};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Storage key for the editor font size
pub const FONT_SIZE_KEY: &str = "editor-font-size";

/// Storage key for the include-comments flag
pub const INCLUDE_COMMENTS_KEY: &str = "include-comments";

/// Reads and writes editor preferences
#[derive(Debug)]
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load both settings
    pub fn load(&self) -> Preferences {
        Preferences {
            editor_font_size: self.load_font_size(),
            include_comments: self.load_include_comments(),
        }
    }

    /// Stored font size, or 14 if absent or unreadable
    pub fn load_font_size(&self) -> u8 {
        match self.read(FONT_SIZE_KEY) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(size) if size.is_finite() => clamp_font_size(size.round() as i64),
                _ => {
                    tracing::warn!("Ignoring malformed font size '{}'", raw);
                    DEFAULT_FONT_SIZE
                }
            },
            None => DEFAULT_FONT_SIZE,
        }
    }

    /// Persist a font size, clamped into range. Returns the value written.
    pub fn save_font_size(&self, size: i64) -> StoreResult<u8> {
        let size = clamp_font_size(size);
        self.store.set(FONT_SIZE_KEY, &size.to_string())?;
        Ok(size)
    }

    /// Stored include-comments flag, or `true` if absent.
    ///
    /// Any stored value other than `"true"` reads as `false`.
    pub fn load_include_comments(&self) -> bool {
        match self.read(INCLUDE_COMMENTS_KEY) {
            Some(raw) => raw.trim() == "true",
            None => true,
        }
    }

    /// Persist the include-comments flag
    pub fn save_include_comments(&self, include: bool) -> StoreResult<()> {
        self.store
            .set(INCLUDE_COMMENTS_KEY, if include { "true" } else { "false" })
    }

    /// Persist both settings
    pub fn save(&self, prefs: &Preferences) -> StoreResult<()> {
        self.save_font_size(prefs.editor_font_size as i64)?;
        self.save_include_comments(prefs.include_comments)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not read preference '{}': {}", key, e);
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
