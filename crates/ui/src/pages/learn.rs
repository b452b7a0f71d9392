use dioxus::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearnVm {
    pub notice: Option<String>,
}

#[component]
pub fn LearnPage(vm: LearnVm) -> Element {
    rsx! {
        section { class: "learn",
            h1 { "What do you want to learn?" }
            p { "Name a skill and get a step-by-step plan you can track." }
            if let Some(notice) = &vm.notice {
                p { class: "notice", "{notice}" }
            }
            form { class: "learn-form", method: "post", action: "/learn",
                input {
                    r#type: "text",
                    name: "skill",
                    placeholder: "e.g. Watercolor painting",
                    autofocus: true,
                }
                button { class: "button", r#type: "submit", "Create my plan" }
            }
            p { class: "hint", "Generating a plan takes a few seconds." }
        }
    }
}
