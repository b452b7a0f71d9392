use dioxus::prelude::*;

/// `detail` carries the raw model output when a plan failed to parse.
#[component]
pub fn ErrorPage(message: String, detail: String) -> Element {
    rsx! {
        section { class: "error",
            h1 { "Something went wrong" }
            p { class: "error-message", "{message}" }
            if !detail.is_empty() {
                details { class: "raw-response",
                    summary { "Raw response" }
                    pre { "{detail}" }
                }
            }
            div { class: "actions",
                a { class: "button", href: "/learn", "Try another topic" }
                a { href: "/", "Home" }
            }
        }
    }
}
