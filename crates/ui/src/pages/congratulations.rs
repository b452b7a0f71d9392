use dioxus::prelude::*;

use crate::vm::CongratulationsVm;

#[component]
pub fn CongratulationsPage(vm: CongratulationsVm) -> Element {
    rsx! {
        section { class: "congratulations",
            h1 { "Congratulations!" }
            p { "You completed every step of {vm.skill_name}." }
            p { class: "meta", "{vm.step_count} steps finished" }
            div { class: "actions",
                a { class: "button", href: "{vm.skill_href}", "Review the plan" }
                a { class: "button", href: "/learn", "Learn something new" }
                a { href: "/", "Home" }
            }
        }
    }
}
