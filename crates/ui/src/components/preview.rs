//! Sandboxed preview of generated markup
//!
//! Generated code is untrusted. It is rendered only inside an `iframe` whose
//! `srcdoc` holds the markup and whose `sandbox` policy allows scripts and
//! forms but not same-origin access or top-level navigation, so it cannot
//! reach the host window or its storage.

use dioxus::prelude::*;

use crate::state::{Intent, SESSION};

/// Capabilities granted to the preview frame
pub const SANDBOX_POLICY: &str = "allow-scripts allow-forms";

/// Tokens that must never appear in [`SANDBOX_POLICY`]
const FORBIDDEN_TOKENS: &[&str] = &[
    "allow-same-origin",
    "allow-top-navigation",
    "allow-top-navigation-by-user-activation",
    "allow-popups-to-escape-sandbox",
];

/// Whether a sandbox policy keeps the frame isolated from its host
pub fn is_isolating_policy(policy: &str) -> bool {
    policy
        .split_whitespace()
        .all(|token| !FORBIDDEN_TOKENS.contains(&token))
}

/// Properties for SandboxedPreview
#[derive(Props, Clone, PartialEq)]
pub struct SandboxedPreviewProps {
    /// Markup to render
    pub code: String,

    /// Changing this remounts the frame
    #[props(default = 0)]
    pub refresh_key: u32,

    #[props(default)]
    pub class: Option<String>,
}

/// An isolated frame rendering `code`
#[component]
pub fn SandboxedPreview(props: SandboxedPreviewProps) -> Element {
    let class = props.class.clone().unwrap_or_else(|| "preview-frame".into());

    rsx! {
        iframe {
            key: "{props.refresh_key}",
            class: "{class}",
            title: "Component preview",
            sandbox: SANDBOX_POLICY,
            srcdoc: "{props.code}",
        }
    }
}

/// Full-window overlay showing the same sandboxed preview
#[component]
pub fn FullscreenPreview() -> Element {
    let session = SESSION.read();
    let state = session.state();
    let open = state.fullscreen_preview;
    let code = state.code.clone();
    let refresh_key = state.preview_key;
    drop(session);

    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fullscreen-overlay",

            div {
                class: "fullscreen-header",
                p { class: "font-bold", "Preview" }
                button {
                    class: "icon-button",
                    title: "Close preview",
                    onclick: move |_| SESSION.write().dispatch(Intent::CloseFullscreenPreview),
                    "✕"
                }
            }

            SandboxedPreview {
                code,
                refresh_key,
                class: "preview-frame preview-frame-full",
            }
        }
    }
}
