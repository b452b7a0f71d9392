use learn_core::model::{LearningPlan, Step, StepStatus};

use crate::vm::links::{congratulations_href, skill_href, step_href};
use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::status::{status_class, status_label};
use crate::vm::time_fmt::format_created;

/// One plan as listed on the home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanCardVm {
    pub skill_name: String,
    pub description: String,
    pub progress: u8,
    pub complete: bool,
    pub step_count: usize,
    pub created_at_str: String,
    pub href: String,
}

impl From<&LearningPlan> for PlanCardVm {
    fn from(plan: &LearningPlan) -> Self {
        Self {
            skill_name: plan.skill_name.clone(),
            description: plan.description.clone(),
            progress: plan.overall_progress,
            complete: plan.is_complete(),
            step_count: plan.steps.len(),
            created_at_str: format_created(plan.created_at),
            href: skill_href(&plan.skill_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub plans: Vec<PlanCardVm>,
    pub streak: usize,
}

impl HomeVm {
    #[must_use]
    pub fn new(plans: &[LearningPlan], streak: usize) -> Self {
        Self {
            plans: plans.iter().map(PlanCardVm::from).collect(),
            streak,
        }
    }

    #[must_use]
    pub fn streak_label(&self) -> String {
        match self.streak {
            1 => "1 day".to_string(),
            days => format!("{days} days"),
        }
    }
}

/// A step row on the plan overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRowVm {
    pub number: usize,
    pub title: String,
    pub progress: u8,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub sub_step_count: usize,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillVm {
    pub skill_name: String,
    pub description_html: String,
    pub progress: u8,
    pub created_at_str: String,
    pub steps: Vec<StepRowVm>,
    /// Link to the first step that is not completed yet.
    pub resume_href: Option<String>,
    pub congratulations_href: String,
}

impl From<&LearningPlan> for SkillVm {
    fn from(plan: &LearningPlan) -> Self {
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| step_row(&plan.skill_name, index, step))
            .collect();
        let resume_href = plan
            .steps
            .iter()
            .position(|step| step.status != StepStatus::Completed)
            .map(|index| step_href(&plan.skill_name, index));

        Self {
            skill_name: plan.skill_name.clone(),
            description_html: markdown_to_html(&plan.description),
            progress: plan.overall_progress,
            created_at_str: format_created(plan.created_at),
            steps,
            resume_href,
            congratulations_href: congratulations_href(&plan.skill_name),
        }
    }
}

fn step_row(skill_name: &str, index: usize, step: &Step) -> StepRowVm {
    StepRowVm {
        number: index + 1,
        title: step.title.clone(),
        progress: step.progress,
        status_label: status_label(step.status),
        status_class: status_class(step.status),
        sub_step_count: step.sub_steps.len(),
        href: step_href(skill_name, index),
    }
}

/// Shown after a plan has been marked complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CongratulationsVm {
    pub skill_name: String,
    pub step_count: usize,
    pub skill_href: String,
}

impl From<&LearningPlan> for CongratulationsVm {
    fn from(plan: &LearningPlan) -> Self {
        Self {
            skill_name: plan.skill_name.clone(),
            step_count: plan.steps.len(),
            skill_href: skill_href(&plan.skill_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::time::fixed_now;

    fn plan() -> LearningPlan {
        LearningPlan {
            skill_name: "Jazz Piano".into(),
            description: "Learn *voicings*".into(),
            steps: vec![
                Step {
                    title: "Scales".into(),
                    status: StepStatus::Completed,
                    progress: 100,
                    ..Step::default()
                },
                Step {
                    title: "Shells".into(),
                    ..Step::default()
                },
            ],
            overall_progress: 50,
            created_at: fixed_now(),
        }
    }

    #[test]
    fn skill_vm_resumes_at_first_unfinished_step() {
        let vm = SkillVm::from(&plan());
        assert_eq!(vm.resume_href.as_deref(), Some("/step/Jazz%20Piano/1"));
        assert_eq!(vm.steps[0].number, 1);
        assert_eq!(vm.steps[0].status_class, "completed");
        assert_eq!(vm.steps[1].status_label, "Not started");
        assert!(vm.description_html.contains("<em>voicings</em>"));
    }

    #[test]
    fn finished_plan_has_nothing_to_resume() {
        let mut plan = plan();
        plan.steps[1].status = StepStatus::Completed;
        assert_eq!(SkillVm::from(&plan).resume_href, None);
    }

    #[test]
    fn streak_label_pluralizes() {
        assert_eq!(HomeVm::new(&[], 1).streak_label(), "1 day");
        assert_eq!(HomeVm::new(&[], 0).streak_label(), "0 days");
        let home = HomeVm::new(&[plan()], 3);
        assert_eq!(home.plans[0].href, "/skill/Jazz%20Piano");
        assert_eq!(home.plans[0].created_at_str, "2023-11-14 22:13");
        assert!(!home.plans[0].complete);
    }
}
