use dioxus::prelude::*;

use crate::pages::widgets::ProgressBar;
use crate::vm::{HomeVm, PlanCardVm};

#[component]
pub fn HomePage(vm: HomeVm) -> Element {
    let streak = vm.streak_label();

    rsx! {
        section { class: "hero",
            h1 { "Your skills" }
            p { class: "streak", "Current streak: {streak}" }
            a { class: "button", href: "/learn", "Learn a new skill" }
        }

        if vm.plans.is_empty() {
            p { class: "empty", "No skills yet. Pick a topic to get a step-by-step plan." }
        } else {
            ul { class: "skill-list",
                for plan in vm.plans.iter() {
                    PlanCard { key: "{plan.href}", plan: plan.clone() }
                }
            }
        }
    }
}

#[component]
fn PlanCard(plan: PlanCardVm) -> Element {
    rsx! {
        li { class: "skill-card",
            a { class: "skill-link", href: "{plan.href}",
                h2 { "{plan.skill_name}" }
            }
            if plan.complete {
                span { class: "status completed", "Completed" }
            }
            p { class: "skill-description", "{plan.description}" }
            ProgressBar { percent: plan.progress }
            p { class: "meta", "{plan.step_count} steps, created {plan.created_at_str}" }
        }
    }
}
