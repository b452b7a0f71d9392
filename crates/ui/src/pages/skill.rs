use dioxus::prelude::*;

use crate::pages::widgets::ProgressBar;
use crate::vm::{SkillVm, StepRowVm};

#[component]
pub fn SkillPage(vm: SkillVm) -> Element {
    rsx! {
        section { class: "skill-overview",
            h1 { "{vm.skill_name}" }
            div { class: "prose", dangerous_inner_html: "{vm.description_html}" }
            ProgressBar { percent: vm.progress }
            p { class: "meta", "Created {vm.created_at_str}" }
            if let Some(href) = &vm.resume_href {
                a { class: "button", href: "{href}", "Continue learning" }
            } else if !vm.steps.is_empty() {
                a { class: "button", href: "{vm.congratulations_href}", "Finish skill" }
            }
        }

        ol { class: "step-list",
            for row in vm.steps.iter() {
                StepRow { key: "{row.number}", row: row.clone() }
            }
        }
    }
}

#[component]
fn StepRow(row: StepRowVm) -> Element {
    rsx! {
        li { class: "step-row {row.status_class}",
            a { href: "{row.href}",
                span { class: "step-number", "{row.number}." }
                span { class: "step-title", "{row.title}" }
            }
            span { class: "status {row.status_class}", "{row.status_label}" }
            if row.sub_step_count > 0 {
                span { class: "meta", "{row.sub_step_count} parts" }
            }
            span { class: "progress-text", "{row.progress}%" }
        }
    }
}
