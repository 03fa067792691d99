//! # UI Components
//!
//! Dioxus components for the ComponentAI screen.
//!
//! ## Component Hierarchy
//!
//! ```text
//! App
//! ├── Navbar
//! │   ├── ProfilePanel
//! │   └── SettingsPanel (RangeInput, Checkbox)
//! ├── GeneratorForm (Select, TextArea)
//! ├── OutputPane
//! │   └── SandboxedPreview
//! ├── FullscreenPreview
//! │   └── SandboxedPreview
//! └── NoticeToast
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod generator_form;
pub mod inputs;
pub mod navbar;
pub mod notice;
pub mod output_pane;
pub mod preview;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator_form::{GeneratorForm, framework_options};
pub use inputs::{Checkbox, RangeInput, Select, SelectOption, TextArea};
pub use navbar::Navbar;
pub use notice::NoticeToast;
pub use output_pane::OutputPane;
pub use preview::{FullscreenPreview, SANDBOX_POLICY, SandboxedPreview, is_isolating_policy};
