//! Main Application Component for ComponentAI
//!
//! Lays out the navbar above a two-pane body (generator form on the left,
//! output on the right), with the full-screen preview and the notice toast
//! on top.

use dioxus::prelude::*;

use crate::components::{FullscreenPreview, GeneratorForm, Navbar, NoticeToast, OutputPane};
use crate::state::SESSION;

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("ComponentAI UI initialized");
    });

    let theme = SESSION.read().state().theme;
    let theme_attr = theme.as_str();

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",

            Navbar {}

            main {
                class: "workspace",
                GeneratorForm {}
                OutputPane {}
            }

            FullscreenPreview {}
            NoticeToast {}
        }
    }
}
