use dioxus::prelude::*;

use crate::pages::widgets::{ProgressBar, ProseBlock, StatusButtons};
use crate::vm::{StepVm, SubStepVm};

#[component]
pub fn StepPage(vm: StepVm) -> Element {
    let step_number = vm.step_index + 1;
    let after_complete = vm.after_complete_href().to_string();
    let complete_label = if vm.is_last() {
        "Complete Skill"
    } else {
        "Mark as Complete"
    };

    rsx! {
        section { class: "skill-overview",
            a { class: "back-link", href: "{vm.skill_href}", "Back to {vm.skill_name}" }
            ProgressBar { percent: vm.overall_progress }
        }

        article {
            class: "step-detail",
            "data-skill": "{vm.skill_name}",
            "data-step": "{vm.step_index}",
            "data-after-complete": "{after_complete}",
            "data-questions": "{vm.questions_href}",
            p { class: "step-count", "Step {step_number} of {vm.step_count}" }
            h1 { "{vm.title}" }
            span { class: "status {vm.status_class}", "{vm.status_label}" }
            ProgressBar { percent: vm.progress }
            StatusButtons { current: vm.status, substep: String::new() }

            ProseBlock { label: "Explanation", block_class: "explanation", html: vm.explanation_html.clone() }
            ProseBlock { label: "Exercise", block_class: "exercise", html: vm.exercise_html.clone() }
            ProseBlock { label: "Tip", block_class: "tip", html: vm.tip_html.clone() }

            if !vm.sub_steps.is_empty() {
                section { class: "sub-steps",
                    h2 { "Break it down" }
                    for sub in vm.sub_steps.iter() {
                        SubStepCard { key: "{sub.index}", sub: sub.clone() }
                    }
                }
            }

            div { class: "mcq-section", id: "quiz" }
        }

        nav { class: "navigation",
            if let Some(href) = &vm.prev_href {
                a { class: "button prev-button", href: "{href}", "Previous Step" }
            }
            a { class: "back-button", href: "{vm.skill_href}", "Back to Skill Overview" }
            button { class: "button complete-button", r#type: "button", "{complete_label}" }
            if let Some(href) = &vm.next_href {
                a { class: "button next-button", href: "{href}", "Next Step" }
            }
        }
    }
}

#[component]
fn SubStepCard(sub: SubStepVm) -> Element {
    rsx! {
        div { class: "sub-step {sub.status_class}",
            h3 { "{sub.title}" }
            span { class: "status {sub.status_class}", "{sub.status_label}" }
            ProseBlock { label: "Explanation", block_class: "explanation", html: sub.explanation_html.clone() }
            ProseBlock { label: "Exercise", block_class: "exercise", html: sub.exercise_html.clone() }
            ProseBlock { label: "Tip", block_class: "tip", html: sub.tip_html.clone() }
            StatusButtons { current: sub.status, substep: sub.index.to_string() }
        }
    }
}
