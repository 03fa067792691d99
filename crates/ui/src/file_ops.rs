//! Desktop Integrations for ComponentAI
//!
//! Saving a generated component through the native save dialog (`rfd`) and
//! copying it to the system clipboard (`arboard`).

use componentai_core::{ComponentError, ComponentResult, EXPORT_FILE_NAME, ExportArtifact};
use rfd::AsyncFileDialog;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// ============================================================================
// File Filter Constants
// ============================================================================

/// Extension of exported components
pub const FILE_EXTENSION: &str = "html";

/// Display name for file filter
pub const FILE_TYPE_NAME: &str = "HTML Document";

// ============================================================================
// Save Dialog
// ============================================================================

/// Ask where to save an exported component.
///
/// The dialog suggests `ComponentAI.html`. Returns None if it was cancelled;
/// otherwise the chosen path with an `.html` extension guaranteed.
pub async fn show_save_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Export Component")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter(FILE_TYPE_NAME, &[FILE_EXTENSION])
        .save_file()
        .await?;

    Some(ensure_extension(file.path().to_path_buf()))
}

/// Show the save dialog and write the artifact to the chosen path.
///
/// `Ok(None)` means the user cancelled the dialog.
pub async fn save_artifact(artifact: ExportArtifact) -> ComponentResult<Option<PathBuf>> {
    let Some(path) = show_save_dialog().await else {
        tracing::debug!("Export dialog cancelled");
        return Ok(None);
    };

    write_artifact(&artifact, &path)?;
    tracing::info!("Exported component to {}", path.display());
    Ok(Some(path))
}

/// Write the artifact to a known path without prompting
pub fn write_artifact(artifact: &ExportArtifact, path: &Path) -> ComponentResult<()> {
    std::fs::write(path, artifact.contents.as_bytes()).map_err(|e| ComponentError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Clipboard
// ============================================================================

thread_local! {
    /// Clipboard handle kept for the whole session. On X11 the copied text is
    /// served by this handle, so dropping it would lose the selection.
    static CLIPBOARD: RefCell<Option<arboard::Clipboard>> = const { RefCell::new(None) };
}

/// Place text on the system clipboard
pub fn copy_to_clipboard(text: &str) -> ComponentResult<()> {
    CLIPBOARD.with(|slot| {
        with_cached(
            slot,
            || arboard::Clipboard::new().map_err(|e| ComponentError::clipboard(e.to_string())),
            |clipboard| {
                clipboard
                    .set_text(text.to_string())
                    .map_err(|e| ComponentError::clipboard(e.to_string()))
            },
        )
    })?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Run `f` on the value in `slot`, creating it with `init` on first use.
///
/// A failed call drops the value so the next call starts from a fresh one.
fn with_cached<T, R>(
    slot: &RefCell<Option<T>>,
    init: impl FnOnce() -> ComponentResult<T>,
    f: impl FnOnce(&mut T) -> ComponentResult<R>,
) -> ComponentResult<R> {
    let mut slot = slot.borrow_mut();
    let mut value = match slot.take() {
        Some(value) => value,
        None => init()?,
    };
    let result = f(&mut value);
    if result.is_ok() {
        *slot = Some(value);
    }
    result
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Ensure a path ends in `.html`
pub fn ensure_extension(path: PathBuf) -> PathBuf {
    let has_html = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION) || ext == "htm");
    if has_html {
        path
    } else {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        if name.is_empty() {
            name.push("ComponentAI");
        }
        name.push(".");
        name.push(FILE_EXTENSION);
        path.with_file_name(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
