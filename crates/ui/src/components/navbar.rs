//! Top navigation bar with the theme toggle and the profile and settings panels

use componentai_core::{MAX_FONT_SIZE, MIN_FONT_SIZE, format_timestamp};
use dioxus::prelude::*;

use crate::components::inputs::{Checkbox, RangeInput};
use crate::state::{Intent, SESSION, Theme};

/// Logo, theme toggle, profile and settings buttons
#[component]
pub fn Navbar() -> Element {
    let session = SESSION.read();
    let state = session.state();
    let theme = state.theme;
    let show_profile = state.show_profile;
    let show_settings = state.show_settings;
    drop(session);

    let theme_icon = match theme {
        Theme::Dark => "☀",
        Theme::Light => "☾",
    };

    rsx! {
        header {
            class: "navbar",

            h3 { class: "navbar-logo sp-text", "ComponentAI" }

            div {
                class: "navbar-icons",

                button {
                    class: "icon-button",
                    title: "Toggle Theme",
                    onclick: move |_| SESSION.write().dispatch(Intent::ToggleTheme),
                    "{theme_icon}"
                }

                button {
                    class: "icon-button",
                    class: if show_profile { "active" } else { "" },
                    title: "Profile",
                    onclick: move |_| SESSION.write().dispatch(Intent::ToggleProfile),
                    "👤"
                }

                button {
                    class: "icon-button",
                    class: if show_settings { "active" } else { "" },
                    title: "Settings",
                    onclick: move |_| SESSION.write().dispatch(Intent::ToggleSettings),
                    "⚙"
                }
            }
        }

        if show_profile {
            ProfilePanel {}
        }

        if show_settings {
            SettingsPanel {}
        }
    }
}

/// Generation count, last-used time and the clear-history action
#[component]
fn ProfilePanel() -> Element {
    let session = SESSION.read();
    let history = &session.state().history;
    let count = history.len();
    let last_used = history
        .last_used()
        .map(format_timestamp)
        .unwrap_or_else(|| "—".to_string());
    drop(session);

    rsx! {
        div {
            class: "dropdown-panel",

            p { class: "font-bold mb-2", "Guest User" }

            div {
                class: "panel-details",
                p { "Generated Components: {count}" }
                p { "Last Used: {last_used}" }
            }

            button {
                class: "panel-button",
                onclick: move |_| SESSION.write().dispatch(Intent::ClearHistory),
                "Clear History"
            }
        }
    }
}

/// Editor font size and the include-comments toggle
#[component]
fn SettingsPanel() -> Element {
    let session = SESSION.read();
    let prefs = session.state().preferences;
    drop(session);

    rsx! {
        div {
            class: "dropdown-panel",

            div {
                class: "panel-header",
                p { class: "font-bold", "Settings" }
                button {
                    class: "icon-button small",
                    title: "Close",
                    onclick: move |_| SESSION.write().dispatch(Intent::ToggleSettings),
                    "✕"
                }
            }

            RangeInput {
                label: "Editor Font Size",
                value: i64::from(prefs.editor_font_size),
                min: i64::from(MIN_FONT_SIZE),
                max: i64::from(MAX_FONT_SIZE),
                unit: "px",
                on_change: move |size: i64| SESSION.write().dispatch(Intent::ChangeFontSize(size)),
            }

            Checkbox {
                label: "Include Comments",
                checked: prefs.include_comments,
                on_change: move |_: bool| SESSION.write().dispatch(Intent::ToggleIncludeComments),
            }
        }
    }
}
