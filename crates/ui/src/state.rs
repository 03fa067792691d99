//! Application State Management for ComponentAI
//!
//! All screen state lives in [`AppState`] and changes only through
//! [`AppState::apply`], which takes an [`Intent`] and reports the durable
//! [`StateChange`]s it caused. A [`Session`] owns the state together with its
//! [`StateObserver`]s and forwards every change to them; the
//! [`PersistenceObserver`] writes history and preferences through to disk.

use std::path::PathBuf;
use std::sync::Arc;

use componentai_codegen::{GenerationPipeline, GenerationRequest};
use componentai_core::{
    AppConfig, ComponentResult, ExportArtifact, FrameworkChoice, GenerationError,
    GenerationRecord, HistoryLog, Preferences, ResultExt, clamp_font_size,
};
use componentai_store::{FileStore, HistoryCache, KeyValueStore, PreferenceStore};
use dioxus::prelude::*;

// ============================================================================
// View Enums
// ============================================================================

/// Output pane tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTab {
    /// Generated source
    #[default]
    Code,
    /// Live sandboxed rendering
    Preview,
}

impl OutputTab {
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputTab::Code => "Code",
            OutputTab::Preview => "Preview",
        }
    }
}

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The opposite scheme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Value for the root `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub level: StatusLevel,
}

impl Notice {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    /// CSS modifier for the notice toast
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "notice-info",
            StatusLevel::Success => "notice-success",
            StatusLevel::Warning => "notice-warning",
            StatusLevel::Error => "notice-error",
        }
    }
}

// ============================================================================
// Intents and Changes
// ============================================================================

/// Every user action the screen can take.
///
/// Starting a generation is not an intent of its own: it goes through
/// [`AppState::begin_generation`], which hands back the request to run, and
/// the outcome comes back as [`Intent::GenerationFinished`]. Copy and download
/// are performed by the view and reported here with their outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    EditPrompt(String),
    SelectFramework(FrameworkChoice),
    SelectTab(OutputTab),
    OpenFullscreenPreview,
    CloseFullscreenPreview,
    RefreshPreview,
    ClearHistory,
    ChangeFontSize(i64),
    ToggleIncludeComments,
    ToggleTheme,
    ToggleProfile,
    ToggleSettings,
    /// The clipboard write finished
    CopyCode(Result<(), String>),
    /// The save dialog finished; `Ok(None)` means the user cancelled it
    DownloadCode(Result<Option<PathBuf>, String>),
    DismissNotice,
    GenerationFinished(Result<GenerationRecord, GenerationError>),
}

/// A durable change produced by an intent
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    HistoryAppended(GenerationRecord),
    HistoryCleared,
    FontSizeChanged(u8),
    IncludeCommentsChanged(bool),
}

// ============================================================================
// Application State
// ============================================================================

/// Everything the screen renders
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub prompt: String,
    pub framework: FrameworkChoice,
    /// Code currently shown in the output pane
    pub code: String,
    /// A generation is outstanding
    pub loading: bool,
    /// Output pane replaces its placeholder once there is something to show
    pub output_visible: bool,
    pub tab: OutputTab,
    pub fullscreen_preview: bool,
    /// Bumped to remount the preview frame
    pub preview_key: u32,
    pub history: HistoryLog,
    pub preferences: Preferences,
    pub theme: Theme,
    pub show_profile: bool,
    pub show_settings: bool,
    pub notice: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            framework: FrameworkChoice::default(),
            code: String::new(),
            loading: false,
            output_visible: false,
            tab: OutputTab::Code,
            fullscreen_preview: false,
            preview_key: 0,
            history: HistoryLog::new(),
            preferences: Preferences::default(),
            theme: Theme::default(),
            show_profile: false,
            show_settings: false,
            notice: None,
        }
    }
}

impl AppState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the startup state from what was persisted.
    ///
    /// When history is non-empty the most recent record's prompt, framework
    /// and code are restored and the output pane is shown.
    pub fn restored(history: HistoryLog, preferences: Preferences) -> Self {
        let mut state = Self {
            history,
            preferences,
            ..Self::default()
        };
        if let Some(latest) = state.history.latest().cloned() {
            state.prompt = latest.prompt;
            state.framework = latest.framework;
            state.code = latest.code;
            state.output_visible = true;
        }
        state
    }

    /// Set the current notice
    pub fn set_notice(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.notice = Some(Notice::new(text, level));
    }

    /// Validate the form and mark a generation as outstanding.
    ///
    /// Refuses while another generation is in flight and when the prompt is
    /// blank; in the latter case a warning notice is shown.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, GenerationError> {
        if self.loading {
            return Err(GenerationError::Busy);
        }
        if self.prompt.trim().is_empty() {
            let err = GenerationError::EmptyPrompt;
            self.set_notice(err.notice(), StatusLevel::Warning);
            return Err(err);
        }

        self.loading = true;
        Ok(
            GenerationRequest::new(self.prompt.clone(), self.framework)
                .with_comments(self.preferences.include_comments),
        )
    }

    /// Code packaged for download, if there is any
    pub fn export_artifact(&self) -> Option<ExportArtifact> {
        ExportArtifact::from_code(&self.code)
    }

    /// Code to place on the clipboard, if there is any
    pub fn copyable_code(&self) -> Option<String> {
        (!self.code.is_empty()).then(|| self.code.clone())
    }

    /// Apply one intent and return the durable changes it caused
    pub fn apply(&mut self, intent: Intent) -> Vec<StateChange> {
        let mut changes = Vec::new();

        match intent {
            Intent::EditPrompt(text) => self.prompt = text,
            Intent::SelectFramework(framework) => self.framework = framework,
            Intent::SelectTab(tab) => self.tab = tab,
            Intent::OpenFullscreenPreview => self.fullscreen_preview = true,
            Intent::CloseFullscreenPreview => self.fullscreen_preview = false,
            Intent::RefreshPreview => self.preview_key = self.preview_key.wrapping_add(1),

            Intent::ClearHistory => {
                self.history.clear();
                self.show_profile = false;
                self.set_notice("History cleared", StatusLevel::Success);
                changes.push(StateChange::HistoryCleared);
            }

            Intent::ChangeFontSize(size) => {
                let size = clamp_font_size(size);
                if size != self.preferences.editor_font_size {
                    self.preferences.editor_font_size = size;
                    changes.push(StateChange::FontSizeChanged(size));
                }
            }

            Intent::ToggleIncludeComments => {
                let include = !self.preferences.include_comments;
                self.preferences.include_comments = include;
                changes.push(StateChange::IncludeCommentsChanged(include));
            }

            Intent::ToggleTheme => self.theme = self.theme.toggled(),

            // Profile and settings panels are mutually exclusive
            Intent::ToggleProfile => {
                self.show_profile = !self.show_profile;
                self.show_settings = false;
            }
            Intent::ToggleSettings => {
                self.show_settings = !self.show_settings;
                self.show_profile = false;
            }

            Intent::CopyCode(Ok(())) => self.set_notice("Copied", StatusLevel::Success),
            Intent::CopyCode(Err(e)) => {
                self.set_notice(format!("Failed to copy: {e}"), StatusLevel::Error)
            }

            Intent::DownloadCode(Ok(Some(path))) => self.set_notice(
                format!("Saved to {}", path.display()),
                StatusLevel::Success,
            ),
            Intent::DownloadCode(Ok(None)) => {}
            Intent::DownloadCode(Err(e)) => {
                self.set_notice(format!("Failed to save: {e}"), StatusLevel::Error)
            }

            Intent::DismissNotice => self.notice = None,

            Intent::GenerationFinished(Ok(record)) => {
                self.loading = false;
                self.code = record.code.clone();
                self.output_visible = true;
                self.history.push(record.clone());
                changes.push(StateChange::HistoryAppended(record));
            }

            Intent::GenerationFinished(Err(err)) if err.is_cancelled() => {
                self.loading = false;
                self.set_notice("Generation cancelled", StatusLevel::Info);
            }

            Intent::GenerationFinished(Err(err)) => {
                self.loading = false;
                let level = match err {
                    GenerationError::Failed(_) => StatusLevel::Error,
                    _ => StatusLevel::Warning,
                };
                self.set_notice(err.notice(), level);
            }
        }

        changes
    }
}

// ============================================================================
// Observers
// ============================================================================

/// Receives every durable change applied to the state
pub trait StateObserver {
    fn on_change(&mut self, change: &StateChange) -> ComponentResult<()>;
}

/// Writes history and preference changes through to storage
pub struct PersistenceObserver<S: KeyValueStore> {
    history: HistoryCache<S>,
    preferences: PreferenceStore<S>,
}

impl<S: KeyValueStore + Clone> PersistenceObserver<S> {
    pub fn new(store: S) -> Self {
        Self {
            history: HistoryCache::open(store.clone()),
            preferences: PreferenceStore::new(store),
        }
    }

    /// Persisted history as currently loaded
    pub fn history(&self) -> HistoryLog {
        self.history.log().clone()
    }

    /// Persisted preferences
    pub fn preferences(&self) -> Preferences {
        self.preferences.load()
    }
}

impl<S: KeyValueStore> StateObserver for PersistenceObserver<S> {
    fn on_change(&mut self, change: &StateChange) -> ComponentResult<()> {
        match change {
            StateChange::HistoryAppended(record) => {
                self.history
                    .append(record.clone())
                    .with_context("Saving history")?;
            }
            StateChange::HistoryCleared => {
                self.history.clear().with_context("Clearing history")?;
            }
            StateChange::FontSizeChanged(size) => {
                self.preferences.save_font_size(i64::from(*size))?;
            }
            StateChange::IncludeCommentsChanged(include) => {
                self.preferences.save_include_comments(*include)?;
            }
        }
        tracing::debug!("Persisted {:?}", change);
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

/// State plus the things that react to it
pub struct Session {
    state: AppState,
    observers: Vec<Box<dyn StateObserver>>,
    pipeline: Arc<GenerationPipeline>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// A session with no observers
    pub fn new(state: AppState, pipeline: Arc<GenerationPipeline>) -> Self {
        Self {
            state,
            observers: Vec::new(),
            pipeline,
        }
    }

    /// Restore persisted state from `store` and persist every later change to it
    pub fn open<S>(store: S, pipeline: Arc<GenerationPipeline>) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        let persistence = PersistenceObserver::new(store);
        let state = AppState::restored(persistence.history(), persistence.preferences());
        tracing::info!(
            "Session restored with {} history record(s)",
            state.history.len()
        );
        let mut session = Self::new(state, pipeline);
        session.subscribe(Box::new(persistence));
        session
    }

    /// Load config and open the on-disk store it points at
    pub fn bootstrap() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            AppConfig::default()
        });
        let data_dir = config.resolved_data_dir();
        tracing::info!("Data directory: {}", data_dir.display());

        let pipeline = Arc::new(GenerationPipeline::from_config(&config));
        Self::open(FileStore::new(data_dir), pipeline)
    }

    /// Register an observer for future changes
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shared handle to the generation pipeline
    pub fn pipeline(&self) -> Arc<GenerationPipeline> {
        Arc::clone(&self.pipeline)
    }

    /// See [`AppState::begin_generation`]
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, GenerationError> {
        self.state.begin_generation()
    }

    /// Apply an intent and forward its changes to every observer.
    ///
    /// A failed write does not roll the state back; it is logged and shown
    /// as an error notice.
    pub fn dispatch(&mut self, intent: Intent) {
        let changes = self.state.apply(intent);
        for change in &changes {
            for observer in &mut self.observers {
                if let Err(e) = observer.on_change(change) {
                    tracing::error!("Failed to persist {:?}: {}", change, e);
                    self.state
                        .set_notice(format!("Could not save: {e}"), StatusLevel::Error);
                }
            }
        }
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global session signal
/// Use this in components to read state and dispatch intents
pub static SESSION: GlobalSignal<Session> = Signal::global(Session::bootstrap);

// ============================================================================
// Tests
// ============================================================================
