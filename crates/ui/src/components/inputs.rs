//! # Input Components
//!
//! Form inputs shared by the generator form and the settings panel:
//! - **Select**: Dropdown selection
//! - **TextArea**: Multi-line text input
//! - **RangeInput**: Integer slider with a value readout
//! - **Checkbox**: Boolean checkbox
//!
//! Styling comes from the `.field-*` rules in the bundled stylesheet.

use dioxus::prelude::*;

// ============================================================================
// Select Component
// ============================================================================

/// A single option for the Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    /// Option value
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create a new select option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    /// Available options
    pub options: Vec<SelectOption>,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Whether disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Change handler, called with the option value
    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    rsx! {
        div {
            class: "field-group",

            if let Some(label) = &props.label {
                label { class: "field-label", "{label}" }
            }

            select {
                class: "field-select",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// TextArea Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    /// Input value
    pub value: String,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Number of visible rows
    #[props(default = 8)]
    pub rows: usize,

    /// Whether disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    rsx! {
        div {
            class: "field-group",

            if let Some(label) = &props.label {
                label { class: "field-label", "{label}" }
            }

            textarea {
                class: "field-textarea",
                rows: "{props.rows}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                value: "{props.value}",
                oninput: move |e| props.on_change.call(e.value()),
            }
        }
    }
}

// ============================================================================
// Range Component
// ============================================================================

/// Properties for RangeInput component
#[derive(Props, Clone, PartialEq)]
pub struct RangeInputProps {
    /// Current value
    pub value: i64,

    pub min: i64,

    pub max: i64,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Suffix for the readout, e.g. "px"
    #[props(default)]
    pub unit: Option<String>,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<i64>,
}

/// Slider with the current value shown underneath
#[component]
pub fn RangeInput(props: RangeInputProps) -> Element {
    let unit = props.unit.clone().unwrap_or_default();

    rsx! {
        div {
            class: "field-group",

            if let Some(label) = &props.label {
                label { class: "field-label", "{label}" }
            }

            input {
                class: "field-range",
                r#type: "range",
                min: "{props.min}",
                max: "{props.max}",
                value: "{props.value}",
                oninput: move |e| {
                    if let Some(v) = parse_range_value(&e.value()) {
                        props.on_change.call(v);
                    }
                },
            }

            p { class: "field-help", "{props.value}{unit}" }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

/// Properties for Checkbox component
#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    /// Whether checked
    pub checked: bool,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Change handler, called with the new value
    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Checkbox with its label on the left
#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        label {
            class: "field-checkbox",

            if let Some(label) = &props.label {
                span { "{label}" }
            }

            input {
                r#type: "checkbox",
                checked: props.checked,
                onchange: move |_| props.on_change.call(!props.checked),
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a slider value. Browsers may report `"16"` or `"16.0"`.
fn parse_range_value(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i64)
    })
}

// ============================================================================
// Tests
// ============================================================================
