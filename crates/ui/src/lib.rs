//! # ComponentAI UI
//!
//! Dioxus desktop front end for ComponentAI.
//!
//! ## Features
//!
//! - Framework picker and free-text description of a component
//! - Code and sandboxed live-preview tabs, with a full-screen preview
//! - Copy to clipboard and export as `ComponentAI.html`
//! - Last five generations restored on startup
//! - Light/dark theme, editor font size and include-comments settings
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use componentai_core;

pub use app::App;
pub use file_ops::{copy_to_clipboard, save_artifact, show_save_dialog, write_artifact};
pub use state::{
    AppState, Intent, Notice, OutputTab, PersistenceObserver, SESSION, Session, StateChange,
    StateObserver, StatusLevel, Theme,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "ComponentAI";

/// Application display title
pub const TITLE: &str = "ComponentAI - AI Component Generator";

/// Stylesheet embedded at build time
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the ComponentAI desktop application
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     componentai_ui::launch();
/// }
/// ```
pub fn launch() {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280.0, 860.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(720.0, 560.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

/// The embedded stylesheet
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains(NAME));
    }

    #[test]
    fn test_styles_define_both_themes() {
        let styles = get_styles();
        assert!(styles.contains("[data-theme=\"dark\"]"));
        assert!(styles.contains("[data-theme=\"light\"]"));
        assert!(styles.contains(".preview-frame"));
    }
}
