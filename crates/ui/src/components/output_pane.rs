//! Right pane: Code and Preview tabs over the current generated component

use dioxus::prelude::*;

use crate::components::preview::SandboxedPreview;
use crate::file_ops;
use crate::state::{Intent, OutputTab, SESSION};

/// Tabbed view of the generated code, or a placeholder before any exists
#[component]
pub fn OutputPane() -> Element {
    let session = SESSION.read();
    let state = session.state();
    let visible = state.output_visible;
    let tab = state.tab;
    let code = state.code.clone();
    let font_size = state.preferences.editor_font_size;
    let refresh_key = state.preview_key;
    drop(session);

    if !visible {
        return rsx! {
            section {
                class: "panel output-pane output-empty",
                span { class: "output-empty-icon", "</>" }
                p { class: "text-secondary", "Output will appear here" }
            }
        };
    }

    rsx! {
        section {
            class: "panel output-pane",

            // ── tabs ──
            div {
                class: "output-tabs",
                for (candidate, name) in [OutputTab::Code, OutputTab::Preview].map(|t| (t, t.display_name())) {
                    button {
                        key: "{name}",
                        class: "output-tab",
                        class: if tab == candidate { "active" } else { "" },
                        onclick: move |_| SESSION.write().dispatch(Intent::SelectTab(candidate)),
                        "{name}"
                    }
                }
            }

            // ── toolbar ──
            div {
                class: "output-toolbar",
                {match tab {
                    OutputTab::Code => rsx! {
                        button {
                            class: "icon-button",
                            title: "Copy code",
                            onclick: move |_| copy_code(),
                            "⧉"
                        }
                        button {
                            class: "icon-button",
                            title: "Download",
                            onclick: move |_| download_code(),
                            "⇩"
                        }
                    },
                    OutputTab::Preview => rsx! {
                        button {
                            class: "icon-button",
                            title: "Open full screen",
                            onclick: move |_| SESSION.write().dispatch(Intent::OpenFullscreenPreview),
                            "⤢"
                        }
                        button {
                            class: "icon-button",
                            title: "Refresh preview",
                            onclick: move |_| SESSION.write().dispatch(Intent::RefreshPreview),
                            "↻"
                        }
                    },
                }}
            }

            // ── body ──
            {match tab {
                OutputTab::Code => rsx! {
                    pre {
                        class: "code-view",
                        style: "font-size: {font_size}px;",
                        code { "{code}" }
                    }
                },
                OutputTab::Preview => rsx! {
                    SandboxedPreview { code, refresh_key }
                },
            }}
        }
    }
}

/// Copy the current code and report the outcome
fn copy_code() {
    let Some(code) = SESSION.read().state().copyable_code() else {
        return;
    };
    let result = file_ops::copy_to_clipboard(&code).map_err(|e| e.to_string());
    SESSION.write().dispatch(Intent::CopyCode(result));
}

/// Ask where to save the current code, then write it
fn download_code() {
    let Some(artifact) = SESSION.read().state().export_artifact() else {
        return;
    };
    spawn(async move {
        let result = file_ops::save_artifact(artifact)
            .await
            .map_err(|e| e.to_string());
        SESSION.write().dispatch(Intent::DownloadCode(result));
    });
}
