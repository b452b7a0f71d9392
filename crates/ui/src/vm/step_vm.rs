use learn_core::model::{StepStatus, SubStep};
use services::StepPage;

use crate::vm::links::{congratulations_href, questions_href, skill_href, step_href};
use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::status::{status_class, status_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubStepVm {
    pub index: usize,
    pub title: String,
    pub explanation_html: String,
    pub exercise_html: String,
    pub tip_html: String,
    pub status: StepStatus,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl SubStepVm {
    fn new(index: usize, sub: &SubStep) -> Self {
        Self {
            index,
            title: sub.title.clone(),
            explanation_html: markdown_to_html(&sub.explanation),
            exercise_html: markdown_to_html(&sub.exercise),
            tip_html: markdown_to_html(&sub.tip),
            status: sub.status,
            status_label: status_label(sub.status),
            status_class: status_class(sub.status),
        }
    }
}

/// Everything the step page shows, with navigation already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepVm {
    pub skill_name: String,
    pub skill_href: String,
    pub overall_progress: u8,
    pub step_index: usize,
    pub step_count: usize,
    pub title: String,
    pub explanation_html: String,
    pub exercise_html: String,
    pub tip_html: String,
    pub status: StepStatus,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub progress: u8,
    pub sub_steps: Vec<SubStepVm>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub questions_href: String,
    pub congratulations_href: String,
}

impl StepVm {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_href.is_none()
    }

    /// Where the "complete" action leads: the next step, or the finish page.
    #[must_use]
    pub fn after_complete_href(&self) -> &str {
        self.next_href
            .as_deref()
            .unwrap_or(&self.congratulations_href)
    }
}

impl From<&StepPage> for StepVm {
    fn from(page: &StepPage) -> Self {
        let plan = &page.plan;
        let step = page.step();
        let name = plan.skill_name.as_str();

        Self {
            skill_name: plan.skill_name.clone(),
            skill_href: skill_href(name),
            overall_progress: plan.overall_progress,
            step_index: page.step_index,
            step_count: plan.steps.len(),
            title: step.title.clone(),
            explanation_html: markdown_to_html(&step.explanation),
            exercise_html: markdown_to_html(&step.exercise),
            tip_html: markdown_to_html(&step.tip),
            status: step.status,
            status_label: status_label(step.status),
            status_class: status_class(step.status),
            progress: step.progress,
            sub_steps: step
                .sub_steps
                .iter()
                .enumerate()
                .map(|(index, sub)| SubStepVm::new(index, sub))
                .collect(),
            prev_href: page.prev_index.map(|index| step_href(name, index)),
            next_href: page.next_index.map(|index| step_href(name, index)),
            questions_href: questions_href(name, page.step_index),
            congratulations_href: congratulations_href(name),
        }
    }
}
