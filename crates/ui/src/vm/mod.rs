mod links;
mod markdown_vm;
mod plan_vm;
mod status;
mod step_vm;
mod time_fmt;

pub use links::{
    congratulations_href, generate_href, questions_href, skill_href, step_href,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use plan_vm::{CongratulationsVm, HomeVm, PlanCardVm, SkillVm, StepRowVm};
pub use status::{status_class, status_label};
pub use step_vm::{StepVm, SubStepVm};
pub use time_fmt::format_created;
