use dioxus::prelude::*;

use crate::assets::{STEP_SCRIPT_PATH, STYLE_PATH};

const SITE_NAME: &str = "Skill Path";

/// Render `content` inside the shared page shell and return a full HTML
/// document.
#[must_use]
pub fn render_document(page_title: &str, content: Element) -> String {
    let full_title = format!("{page_title} | {SITE_NAME}");
    let html = dioxus_ssr::render_element(rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{full_title}" }
                link { rel: "stylesheet", href: STYLE_PATH }
                script { src: STEP_SCRIPT_PATH, defer: true }
            }
            body {
                header { class: "site-header",
                    a { class: "brand", href: "/", "{SITE_NAME}" }
                    nav {
                        a { href: "/learn", "Learn a new skill" }
                    }
                }
                main { class: "container", {content} }
            }
        }
    });
    format!("<!DOCTYPE html>{html}")
}
