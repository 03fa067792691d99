//! Command implementations
//!
//! Each command writes its human-facing output to the supplied writer so it
//! can be exercised without a terminal.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use componentai_codegen::{GenerationPipeline, GenerationRequest};
use componentai_core::{
    AppConfig, ComponentError, ExportArtifact, FrameworkChoice, format_timestamp,
};
use componentai_store::{FileStore, HistoryCache, PreferenceStore};

use crate::{ExportArgs, GenerateArgs, SettingsArgs};

/// Prompts longer than this are cut in the history listing
const PROMPT_PREVIEW_CHARS: usize = 60;

// ============================================================================
// generate
// ============================================================================

/// Run one generation, record it, and print or save the code
pub async fn generate<W: Write>(
    config: &AppConfig,
    store: &FileStore,
    args: GenerateArgs,
    out: &mut W,
) -> Result<()> {
    let include_comments =
        !args.no_comments && PreferenceStore::new(store).load_include_comments();
    let request =
        GenerationRequest::new(args.prompt, args.framework).with_comments(include_comments);

    let pipeline = Arc::new(GenerationPipeline::from_config(config));

    // Ctrl-C cancels the outstanding request instead of killing the process
    let watcher = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                pipeline.cancel_in_flight();
            }
        })
    };
    let result = pipeline.generate_request(request).await;
    watcher.abort();

    let record = result.map_err(ComponentError::from)?;

    HistoryCache::open(store)
        .append(record.clone())
        .context("generated code could not be added to history")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &record.code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "{} {}", "Saved to".green(), path.display())?;
        }
        None => writeln!(out, "{}", record.code)?,
    }
    Ok(())
}

// ============================================================================
// history / clear-history
// ============================================================================

/// List history entries, newest first
pub fn history<W: Write>(store: &FileStore, json: bool, out: &mut W) -> Result<()> {
    let log = HistoryCache::open(store).log().clone();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&log)?)?;
        return Ok(());
    }

    if log.is_empty() {
        writeln!(out, "No history yet.")?;
        return Ok(());
    }

    for (index, record) in log.iter().enumerate() {
        writeln!(
            out,
            "[{}] {}  {}  {}",
            index,
            format_timestamp(record.created_at).as_str().dimmed(),
            format!("{:<24}", record.framework.value()).as_str().cyan(),
            preview(&record.prompt)
        )?;
    }
    Ok(())
}

/// Empty the history
pub fn clear_history<W: Write>(store: &FileStore, out: &mut W) -> Result<()> {
    HistoryCache::open(store).clear()?;
    writeln!(out, "{}", "History cleared".green())?;
    Ok(())
}

// ============================================================================
// settings
// ============================================================================

/// Show preferences, applying any updates first
pub fn settings<W: Write>(store: &FileStore, args: SettingsArgs, out: &mut W) -> Result<()> {
    let prefs = PreferenceStore::new(store);

    if let Some(size) = args.font_size {
        let written = prefs.save_font_size(size)?;
        if i64::from(written) != size {
            tracing::info!("Font size {} clamped to {}", size, written);
        }
    }
    if let Some(include) = args.include_comments {
        prefs.save_include_comments(include)?;
    }

    let current = prefs.load();
    writeln!(out, "Editor font size: {}px", current.editor_font_size)?;
    writeln!(out, "Include comments: {}", current.include_comments)?;
    Ok(())
}

// ============================================================================
// export
// ============================================================================

/// Write one history entry's code to a file
pub fn export<W: Write>(store: &FileStore, args: ExportArgs, out: &mut W) -> Result<()> {
    let cache = HistoryCache::open(store);
    let log = cache.log();
    if log.is_empty() {
        return Err(ComponentError::NoCode.into());
    }
    let record = log
        .get(args.index)
        .ok_or(ComponentError::HistoryIndex(args.index))?;
    let artifact = ExportArtifact::from_code(&record.code).ok_or(ComponentError::NoCode)?;

    std::fs::write(&args.output, artifact.contents.as_bytes())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    writeln!(
        out,
        "{} {} ({})",
        "Exported".green(),
        args.output.display(),
        artifact.mime_type
    )?;
    Ok(())
}

// ============================================================================
// frameworks
// ============================================================================

/// List machine values and labels
pub fn frameworks<W: Write>(out: &mut W) -> Result<()> {
    for framework in FrameworkChoice::all() {
        writeln!(out, "{:<24}  {}", framework.value(), framework.label())?;
    }
    Ok(())
}

/// First line of a prompt, cut to a readable length
fn preview(prompt: &str) -> String {
    let line = prompt.lines().next().unwrap_or_default().trim();
    if line.chars().count() > PROMPT_PREVIEW_CHARS {
        let cut: String = line.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::{Cli, run};
    use clap::Parser;
    use componentai_core::GenerationRecord;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn seed_history(store: &FileStore, prompts: &[&str]) {
        let mut cache = HistoryCache::open(store);
        for (i, prompt) in prompts.iter().enumerate() {
            cache
                .append(GenerationRecord::with_timestamp(
                    *prompt,
                    FrameworkChoice::HtmlCss,
                    format!("<p>{prompt}</p>"),
                    i as i64,
                ))
                .unwrap();
        }
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first");
        let long = "x".repeat(80);
        assert_eq!(preview(&long).chars().count(), PROMPT_PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_history_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Vec::new();
        history(&FileStore::new(dir.path()), false, &mut buf).unwrap();
        assert_eq!(output(buf), "No history yet.\n");
    }

    #[test]
    fn test_history_json_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        seed_history(&store, &["first", "second"]);

        let mut buf = Vec::new();
        history(&store, true, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(value[0]["prompt"], "second");
        assert_eq!(value[1]["prompt"], "first");
        assert_eq!(value[0]["framework"]["value"], "html-css");
    }

    #[test]
    fn test_settings_update_and_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut buf = Vec::new();
        settings(
            &store,
            SettingsArgs {
                font_size: Some(40),
                include_comments: Some(false),
            },
            &mut buf,
        )
        .unwrap();
        assert_eq!(
            output(buf),
            "Editor font size: 24px\nInclude comments: false\n"
        );
    }

    #[test]
    fn test_export_writes_selected_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        seed_history(&store, &["old", "new"]);
        let target = dir.path().join("out.html");

        let mut buf = Vec::new();
        export(
            &store,
            ExportArgs {
                output: target.clone(),
                index: 1,
            },
            &mut buf,
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "<p>old</p>");
    }

    #[test]
    fn test_export_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let args = || ExportArgs {
            output: dir.path().join("x.html"),
            index: 3,
        };

        let err = export(&store, args(), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::NoCode)
        ));

        seed_history(&store, &["only"]);
        let err = export(&store, args(), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::HistoryIndex(3))
        ));
    }

    #[test]
    fn test_frameworks_lists_all() {
        let mut buf = Vec::new();
        frameworks(&mut buf).unwrap();
        let text = output(buf);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("html-tailwind-bootstrap"));
        assert!(text.contains("HTML + CSS + JS"));
    }

    #[tokio::test]
    async fn test_generate_records_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Sure!\n```html\n<nav>menu</nav>\n```" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("base_url = \"{}\"\napi_key = \"test\"\n", server.uri()),
        )
        .unwrap();
        let data_dir = dir.path().join("data");

        let cli = Cli::parse_from([
            "componentai-cli",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            data_dir.to_str().unwrap(),
            "generate",
            "a navbar",
            "-f",
            "html-css-js",
        ]);
        let mut buf = Vec::new();
        run(cli, &mut buf).await.unwrap();
        assert_eq!(output(buf), "<nav>menu</nav>\n");

        let cache = HistoryCache::open(FileStore::new(&data_dir));
        let latest = cache.log().latest().expect("history entry");
        assert_eq!(latest.prompt, "a navbar");
        assert_eq!(latest.framework, FrameworkChoice::HtmlCssJs);
        assert_eq!(latest.code, "<nav>menu</nav>");
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_history_alone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default()
            .with_base_url(server.uri())
            .with_api_key("k");
        let store = FileStore::new(dir.path());
        let args = GenerateArgs {
            prompt: "anything".into(),
            framework: FrameworkChoice::HtmlCss,
            output: None,
            no_comments: false,
        };

        let err = generate(&config, &store, args, &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::Generation(_))
        ));
        assert!(HistoryCache::open(&store).log().is_empty());
    }
}
