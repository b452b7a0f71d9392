use dioxus::prelude::*;
use learn_core::model::StepStatus;

use crate::vm::status_label;

const STATUSES: [StepStatus; 3] = [
    StepStatus::NotStarted,
    StepStatus::InProgress,
    StepStatus::Completed,
];

#[component]
pub fn ProgressBar(percent: u8) -> Element {
    rsx! {
        div { class: "progress-row",
            div { class: "progress-bar",
                div { class: "progress", style: "width: {percent}%" }
            }
            span { class: "progress-text", "{percent}%" }
        }
    }
}

/// One button per status. `substep` is empty for the step itself.
#[component]
pub fn StatusButtons(current: StepStatus, substep: String) -> Element {
    rsx! {
        div { class: "status-buttons",
            for status in STATUSES {
                button {
                    r#type: "button",
                    class: "{button_class(status, current)}",
                    "data-status": "{status.as_str()}",
                    "data-substep": "{substep}",
                    "{status_label(status)}"
                }
            }
        }
    }
}

fn button_class(status: StepStatus, current: StepStatus) -> &'static str {
    if status == current {
        "status-button active"
    } else {
        "status-button"
    }
}

/// A labelled block of sanitized HTML, skipped when empty.
#[component]
pub fn ProseBlock(label: &'static str, block_class: &'static str, html: String) -> Element {
    if html.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { class: "{block_class}",
            h3 { "{label}" }
            div { class: "prose", dangerous_inner_html: "{html}" }
        }
    }
}
