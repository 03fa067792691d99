//! Core types used throughout ComponentAI
//!
//! This module contains the data model shared by the storage layer, the
//! generation pipeline, the desktop UI and the CLI: framework choices,
//! generation records, the bounded history log, editor preferences and the
//! exported download artifact.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ComponentError;

// ============================================================================
// Framework Choice
// ============================================================================

/// Target technology stack for a generated component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameworkChoice {
    #[default]
    HtmlCss,
    HtmlTailwind,
    HtmlBootstrap,
    HtmlCssJs,
    HtmlTailwindBootstrap,
}

impl FrameworkChoice {
    /// Machine value embedded in the model instruction
    pub fn value(&self) -> &'static str {
        match self {
            FrameworkChoice::HtmlCss => "html-css",
            FrameworkChoice::HtmlTailwind => "html-tailwind",
            FrameworkChoice::HtmlBootstrap => "html-bootstrap",
            FrameworkChoice::HtmlCssJs => "html-css-js",
            FrameworkChoice::HtmlTailwindBootstrap => "html-tailwind-bootstrap",
        }
    }

    /// Human readable label shown in the framework selector
    pub fn label(&self) -> &'static str {
        match self {
            FrameworkChoice::HtmlCss => "HTML + CSS",
            FrameworkChoice::HtmlTailwind => "HTML + Tailwind CSS",
            FrameworkChoice::HtmlBootstrap => "HTML + Bootstrap",
            FrameworkChoice::HtmlCssJs => "HTML + CSS + JS",
            FrameworkChoice::HtmlTailwindBootstrap => "HTML + Tailwind + Bootstrap",
        }
    }

    /// Look up a framework by its machine value
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.value() == value)
    }

    /// Get all framework choices, in selector order
    pub fn all() -> &'static [FrameworkChoice] {
        &[
            FrameworkChoice::HtmlCss,
            FrameworkChoice::HtmlTailwind,
            FrameworkChoice::HtmlBootstrap,
            FrameworkChoice::HtmlCssJs,
            FrameworkChoice::HtmlTailwindBootstrap,
        ]
    }
}

impl std::fmt::Display for FrameworkChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FrameworkChoice {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s.trim()).ok_or_else(|| ComponentError::UnknownFramework(s.to_string()))
    }
}

/// Wire shape of a framework choice: `{"value": "...", "label": "..."}`
#[derive(Serialize, Deserialize)]
struct FrameworkOption<'a> {
    value: std::borrow::Cow<'a, str>,
    #[serde(default)]
    label: std::borrow::Cow<'a, str>,
}

impl Serialize for FrameworkChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FrameworkOption {
            value: self.value().into(),
            label: self.label().into(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrameworkChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let option = FrameworkOption::deserialize(deserializer)?;
        FrameworkChoice::from_value(&option.value)
            .ok_or_else(|| de::Error::custom(format!("unknown framework '{}'", option.value)))
    }
}

// ============================================================================
// Generation Record
// ============================================================================

/// One successful generation: what was asked for and what came back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// Free-text description of the component
    pub prompt: String,
    /// Framework the component was generated for
    pub framework: FrameworkChoice,
    /// Extracted source of the generated component
    pub code: String,
    /// Milliseconds since the Unix epoch when generation succeeded
    pub created_at: i64,
}

impl GenerationRecord {
    /// Create a record stamped with the current time
    pub fn new(
        prompt: impl Into<String>,
        framework: FrameworkChoice,
        code: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(prompt, framework, code, now_millis())
    }

    /// Create a record with an explicit timestamp
    pub fn with_timestamp(
        prompt: impl Into<String>,
        framework: FrameworkChoice,
        code: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            framework,
            code: code.into(),
            created_at,
        }
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an epoch-millisecond timestamp in local time for display
pub fn format_timestamp(millis: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}

// ============================================================================
// History Log
// ============================================================================

/// Maximum number of records kept in the history log
pub const HISTORY_LIMIT: usize = 5;

/// Most-recent-first list of at most [`HISTORY_LIMIT`] generation records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GenerationRecord>", into = "Vec<GenerationRecord>")]
pub struct HistoryLog {
    records: Vec<GenerationRecord>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records already in most-recent-first order.
    ///
    /// Anything past [`HISTORY_LIMIT`] is dropped.
    pub fn from_records(mut records: Vec<GenerationRecord>) -> Self {
        records.truncate(HISTORY_LIMIT);
        Self { records }
    }

    /// Prepend a record, evicting the oldest beyond the limit
    pub fn push(&mut self, record: GenerationRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.first()
    }

    /// Record at `index` (0 is the most recent)
    pub fn get(&self, index: usize) -> Option<&GenerationRecord> {
        self.records.get(index)
    }

    /// Timestamp of the most recent generation
    pub fn last_used(&self) -> Option<i64> {
        self.latest().map(|r| r.created_at)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenerationRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }
}

impl From<Vec<GenerationRecord>> for HistoryLog {
    fn from(records: Vec<GenerationRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<HistoryLog> for Vec<GenerationRecord> {
    fn from(log: HistoryLog) -> Self {
        log.records
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a GenerationRecord;
    type IntoIter = std::slice::Iter<'a, GenerationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// Smallest editor font size the settings panel allows
pub const MIN_FONT_SIZE: u8 = 12;

/// Largest editor font size the settings panel allows
pub const MAX_FONT_SIZE: u8 = 24;

/// Editor font size used when nothing is stored
pub const DEFAULT_FONT_SIZE: u8 = 14;

/// Editor preferences persisted next to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Code viewer font size in pixels, within [MIN_FONT_SIZE, MAX_FONT_SIZE]
    pub editor_font_size: u8,
    /// Whether generated code should carry explanatory comments
    pub include_comments: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            editor_font_size: DEFAULT_FONT_SIZE,
            include_comments: true,
        }
    }
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size, clamped into the allowed range
    pub fn set_font_size(&mut self, size: i64) {
        self.editor_font_size = clamp_font_size(size);
    }
}

/// Clamp an arbitrary font size into [MIN_FONT_SIZE, MAX_FONT_SIZE]
pub fn clamp_font_size(size: i64) -> u8 {
    size.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u8
}

// ============================================================================
// Export Artifact
// ============================================================================

/// File name used for downloaded components
pub const EXPORT_FILE_NAME: &str = "ComponentAI.html";

/// MIME type of downloaded components
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// A generated component packaged for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    /// Package raw generated code. Returns `None` when there is nothing to export.
    pub fn from_code(code: &str) -> Option<Self> {
        if code.is_empty() {
            return None;
        }
        Some(Self {
            file_name: EXPORT_FILE_NAME,
            mime_type: EXPORT_MIME_TYPE,
            contents: code.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(prompt: &str, ts: i64) -> GenerationRecord {
        GenerationRecord::with_timestamp(prompt, FrameworkChoice::HtmlCss, "<div></div>", ts)
    }

    #[test]
    fn test_framework_values_and_labels() {
        assert_eq!(FrameworkChoice::HtmlTailwind.value(), "html-tailwind");
        assert_eq!(FrameworkChoice::HtmlTailwind.label(), "HTML + Tailwind CSS");
        assert_eq!(FrameworkChoice::default(), FrameworkChoice::HtmlCss);
        assert_eq!(FrameworkChoice::all().len(), 5);
    }

    #[test]
    fn test_framework_from_str() {
        let f: FrameworkChoice = "html-css-js".parse().unwrap();
        assert_eq!(f, FrameworkChoice::HtmlCssJs);
        assert!("react".parse::<FrameworkChoice>().is_err());
    }

    #[test]
    fn test_framework_serializes_as_option_object() {
        let json = serde_json::to_value(FrameworkChoice::HtmlBootstrap).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": "html-bootstrap", "label": "HTML + Bootstrap"})
        );

        let parsed: FrameworkChoice =
            serde_json::from_str(r#"{"value":"html-tailwind-bootstrap"}"#).unwrap();
        assert_eq!(parsed, FrameworkChoice::HtmlTailwindBootstrap);

        assert!(serde_json::from_str::<FrameworkChoice>(r#"{"value":"vue"}"#).is_err());
    }

    #[test]
    fn test_record_field_names() {
        let json = serde_json::to_value(record("card", 1_700_000_000_000)).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["prompt"], "card");
        assert_eq!(json["framework"]["value"], "html-css");
    }

    #[test]
    fn test_history_push_evicts_oldest() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.push(record(&format!("p{}", i), i));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.get(4).unwrap().prompt, "p0");

        log.push(record("p5", 5));
        assert_eq!(log.len(), HISTORY_LIMIT);
        assert_eq!(log.latest().unwrap().prompt, "p5");
        let prompts: Vec<&str> = log.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["p5", "p4", "p3", "p2", "p1"]);
    }

    #[test]
    fn test_history_from_records_truncates() {
        let records = (0..8).map(|i| record("x", i)).collect();
        assert_eq!(HistoryLog::from_records(records).len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_history_deserialize_truncates() {
        let records: Vec<GenerationRecord> = (0..8).map(|i| record(&format!("p{}", i), i)).collect();
        let json = serde_json::to_string(&records).unwrap();

        let log: HistoryLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log.len(), HISTORY_LIMIT);
        assert_eq!(log.latest().unwrap().prompt, "p0");

        // Serializes back as a bare array
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(HISTORY_LIMIT));
    }

    #[test]
    fn test_history_last_used() {
        let mut log = HistoryLog::new();
        assert_eq!(log.last_used(), None);
        log.push(record("a", 10));
        log.push(record("b", 20));
        assert_eq!(log.last_used(), Some(20));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_font_size_clamping() {
        assert_eq!(clamp_font_size(4), MIN_FONT_SIZE);
        assert_eq!(clamp_font_size(99), MAX_FONT_SIZE);
        assert_eq!(clamp_font_size(16), 16);

        let mut prefs = Preferences::default();
        assert_eq!(prefs.editor_font_size, 14);
        assert!(prefs.include_comments);
        prefs.set_font_size(30);
        assert_eq!(prefs.editor_font_size, 24);
    }

    #[test]
    fn test_export_artifact() {
        assert!(ExportArtifact::from_code("").is_none());
        let artifact = ExportArtifact::from_code("<p>hi</p>").unwrap();
        assert_eq!(artifact.file_name, "ComponentAI.html");
        assert_eq!(artifact.mime_type, "text/html");
        assert_eq!(artifact.contents, "<p>hi</p>");
    }

    #[test]
    fn test_format_timestamp_invalid() {
        assert_eq!(format_timestamp(i64::MAX), "unknown");
    }
}
