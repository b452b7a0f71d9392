//! Server-rendered pages, one `render_*` entry point per page.

mod congratulations;
mod error;
mod home;
mod learn;
mod skill;
mod step;
mod widgets;

use dioxus::prelude::*;

use crate::document::render_document;
use crate::vm::{CongratulationsVm, HomeVm, SkillVm, StepVm};

pub use congratulations::CongratulationsPage;
pub use error::ErrorPage;
pub use home::HomePage;
pub use learn::{LearnPage, LearnVm};
pub use skill::SkillPage;
pub use step::StepPage;
pub use widgets::{ProgressBar, ProseBlock, StatusButtons};

#[must_use]
pub fn render_home(vm: HomeVm) -> String {
    render_document("Home", rsx! { HomePage { vm } })
}

#[must_use]
pub fn render_learn(vm: LearnVm) -> String {
    render_document("Learn", rsx! { LearnPage { vm } })
}

#[must_use]
pub fn render_skill(vm: SkillVm) -> String {
    let page_title = vm.skill_name.clone();
    render_document(&page_title, rsx! { SkillPage { vm } })
}

#[must_use]
pub fn render_step(vm: StepVm) -> String {
    let page_title = format!("{}: {}", vm.skill_name, vm.title);
    render_document(&page_title, rsx! { StepPage { vm } })
}

#[must_use]
pub fn render_congratulations(vm: CongratulationsVm) -> String {
    render_document("Congratulations", rsx! { CongratulationsPage { vm } })
}

#[must_use]
pub fn render_error(message: &str, detail: Option<&str>) -> String {
    let message = message.to_string();
    let detail = detail.unwrap_or_default().to_string();
    render_document("Error", rsx! { ErrorPage { message, detail } })
}
