//! Left pane: framework picker, description box and the Generate button

use componentai_core::FrameworkChoice;
use dioxus::prelude::*;

use crate::components::inputs::{Select, SelectOption, TextArea};
use crate::state::{Intent, SESSION};

/// Options for the framework dropdown, in display order
pub fn framework_options() -> Vec<SelectOption> {
    FrameworkChoice::all()
        .iter()
        .map(|f| SelectOption::new(f.value(), f.label()))
        .collect()
}

/// Validate the form and run one generation in the background
fn start_generation() {
    let request = SESSION.write().begin_generation();
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Generation not started: {}", e);
            return;
        }
    };

    let pipeline = SESSION.read().pipeline();
    spawn(async move {
        let result = pipeline.generate_request(request).await;
        SESSION.write().dispatch(Intent::GenerationFinished(result));
    });
}

/// The generator form
#[component]
pub fn GeneratorForm() -> Element {
    let session = SESSION.read();
    let state = session.state();
    let prompt = state.prompt.clone();
    let framework = state.framework;
    let loading = state.loading;
    drop(session);

    rsx! {
        section {
            class: "panel generator-form",

            h3 { class: "panel-title sp-text", "AI Component Generator" }

            Select {
                label: "Framework",
                value: framework.value().to_string(),
                options: framework_options(),
                on_change: move |value: String| {
                    match FrameworkChoice::from_value(&value) {
                        Some(choice) => SESSION.write().dispatch(Intent::SelectFramework(choice)),
                        None => tracing::warn!("Ignoring unknown framework '{}'", value),
                    }
                },
            }

            TextArea {
                label: "Describe Component",
                value: prompt,
                placeholder: "e.g. A pricing card with three tiers and a highlighted plan",
                on_change: move |text: String| SESSION.write().dispatch(Intent::EditPrompt(text)),
            }

            button {
                class: "generate-button",
                disabled: loading,
                onclick: move |_| start_generation(),
                if loading {
                    span { class: "spinner" }
                } else {
                    span { "✦" }
                }
                "Generate"
            }

            if loading {
                button {
                    class: "link-button",
                    onclick: move |_| {
                        let cancelled = SESSION.read().pipeline().cancel_in_flight();
                        tracing::debug!("Cancel requested (in flight: {})", cancelled);
                    },
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_options_match_choices() {
        let options = framework_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], SelectOption::new("html-css", "HTML + CSS"));
        assert!(options.iter().all(|o| FrameworkChoice::from_value(&o.value).is_some()));
    }
}
