//! Weighted completion percentages for steps and plans.
//!
//! Completed units count fully, in-progress units count half. Percentages are
//! truncated toward zero, so 2 completed and 1 in progress out of 4 is 62.

use serde::Serialize;
use thiserror::Error;

use crate::model::{LearningPlan, StepStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("step {index} is out of range (plan has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}

/// Values the presentation layer needs after a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub step_progress: u8,
    pub overall_progress: u8,
}

/// Weighted percentage over a set of statuses. Empty input yields 0.
#[must_use]
pub fn weighted_percent<I>(statuses: I) -> u8
where
    I: IntoIterator<Item = StepStatus>,
{
    let mut total = 0_u32;
    let mut half_units = 0_u32;
    for status in statuses {
        total += 1;
        half_units += match status {
            StepStatus::Completed => 2,
            StepStatus::InProgress => 1,
            StepStatus::NotStarted => 0,
        };
    }
    if total == 0 {
        return 0;
    }
    // (half_units / 2) / total * 100, truncated, in integer arithmetic.
    let percent = (half_units * 50) / total;
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Recomputes `overall_progress` from each step's top-level status.
pub fn recompute_overall(plan: &mut LearningPlan) -> u8 {
    plan.overall_progress = weighted_percent(plan.steps.iter().map(|step| step.status));
    plan.overall_progress
}

/// Applies a status change to a step, or to one of its substeps, and refreshes
/// both the step's and the plan's progress.
///
/// The step always takes the requested status, so overall progress follows
/// the last change made on each step. With a substep the step's progress is
/// weighted over its substeps. A substep index outside the step's substeps is
/// ignored.
///
/// # Errors
///
/// Returns `ProgressError::StepOutOfRange` if `step_index` does not name a
/// step; the plan is left untouched in that case.
pub fn apply_status(
    plan: &mut LearningPlan,
    step_index: usize,
    sub_step_index: Option<usize>,
    status: StepStatus,
) -> Result<ProgressReport, ProgressError> {
    let len = plan.steps.len();
    let step = plan
        .step_mut(step_index)
        .ok_or(ProgressError::StepOutOfRange {
            index: step_index,
            len,
        })?;

    step.status = status;
    match sub_step_index.filter(|&idx| idx < step.sub_steps.len()) {
        Some(idx) => {
            step.sub_steps[idx].status = status;
            step.progress = weighted_percent(step.sub_steps.iter().map(|s| s.status));
        }
        None => step.progress = status.progress_percent(),
    }
    let step_progress = step.progress;

    let overall_progress = recompute_overall(plan);
    Ok(ProgressReport {
        step_progress,
        overall_progress,
    })
}

/// Forces every step and substep to completed and the plan to 100%.
pub fn mark_complete(plan: &mut LearningPlan) {
    for step in &mut plan.steps {
        step.status = StepStatus::Completed;
        step.progress = 100;
        for sub in &mut step.sub_steps {
            sub.status = StepStatus::Completed;
        }
    }
    plan.overall_progress = 100;
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Step, SubStep};
    use crate::time::fixed_now;

    fn step_with_subs(count: usize) -> Step {
        Step {
            title: "Step".into(),
            sub_steps: (0..count)
                .map(|i| SubStep {
                    title: format!("Sub {i}"),
                    ..SubStep::default()
                })
                .collect(),
            ..Step::default()
        }
    }

    fn plan_with(steps: Vec<Step>) -> LearningPlan {
        LearningPlan {
            skill_name: "Juggling".into(),
            description: String::new(),
            steps,
            overall_progress: 0,
            created_at: fixed_now(),
        }
    }

    #[test]
    fn weighted_percent_truncates() {
        use StepStatus::*;
        assert_eq!(weighted_percent([Completed, Completed, InProgress, NotStarted]), 62);
        assert_eq!(weighted_percent([InProgress, NotStarted, NotStarted]), 16);
        assert_eq!(weighted_percent([Completed, NotStarted, NotStarted]), 33);
        assert_eq!(weighted_percent(std::iter::empty()), 0);
    }

    #[test]
    fn substep_updates_recompute_step_progress() {
        let mut plan = plan_with(vec![step_with_subs(4)]);
        apply_status(&mut plan, 0, Some(0), StepStatus::Completed).unwrap();
        apply_status(&mut plan, 0, Some(1), StepStatus::Completed).unwrap();
        let report = apply_status(&mut plan, 0, Some(2), StepStatus::InProgress).unwrap();

        assert_eq!(report.step_progress, 62);
        assert_eq!(plan.steps[0].progress, 62);
        assert_eq!(plan.steps[0].status, StepStatus::InProgress);
        assert_eq!(report.overall_progress, 50);
    }

    #[test]
    fn substep_status_becomes_the_step_status() {
        let mut plan = plan_with(vec![step_with_subs(4)]);
        let report = apply_status(&mut plan, 0, Some(0), StepStatus::Completed).unwrap();

        assert_eq!(plan.steps[0].status, StepStatus::Completed);
        assert_eq!(report.step_progress, 25);
        assert_eq!(report.overall_progress, 100);

        let report = apply_status(&mut plan, 0, Some(1), StepStatus::InProgress).unwrap();
        assert_eq!(plan.steps[0].status, StepStatus::InProgress);
        assert_eq!(report.step_progress, 37);
        assert_eq!(report.overall_progress, 50);
    }

    #[test]
    fn completing_all_substeps_completes_the_step() {
        let mut plan = plan_with(vec![step_with_subs(2), step_with_subs(0)]);
        apply_status(&mut plan, 0, Some(0), StepStatus::Completed).unwrap();
        let report = apply_status(&mut plan, 0, Some(1), StepStatus::Completed).unwrap();

        assert_eq!(plan.steps[0].status, StepStatus::Completed);
        assert_eq!(report.step_progress, 100);
        assert_eq!(report.overall_progress, 50);

        let report = apply_status(&mut plan, 0, Some(1), StepStatus::NotStarted).unwrap();
        assert_eq!(plan.steps[0].status, StepStatus::NotStarted);
        assert_eq!(report.step_progress, 50);
        assert_eq!(report.overall_progress, 0);
    }

    #[test]
    fn step_status_maps_to_fixed_progress() {
        let mut plan = plan_with(vec![step_with_subs(0), step_with_subs(0)]);
        let report = apply_status(&mut plan, 1, None, StepStatus::InProgress).unwrap();
        assert_eq!(report.step_progress, 50);
        assert_eq!(report.overall_progress, 25);

        let report = apply_status(&mut plan, 1, None, StepStatus::NotStarted).unwrap();
        assert_eq!(report.step_progress, 0);
        assert_eq!(report.overall_progress, 0);
    }

    #[test]
    fn out_of_range_substep_falls_back_to_step_status() {
        let mut plan = plan_with(vec![step_with_subs(2)]);
        let report = apply_status(&mut plan, 0, Some(7), StepStatus::Completed).unwrap();

        assert_eq!(report.step_progress, 100);
        assert_eq!(plan.steps[0].status, StepStatus::Completed);
        assert!(
            plan.steps[0]
                .sub_steps
                .iter()
                .all(|s| s.status == StepStatus::NotStarted)
        );
    }

    #[test]
    fn out_of_range_step_leaves_plan_unchanged() {
        let mut plan = plan_with(vec![step_with_subs(1)]);
        let before = plan.clone();
        let err = apply_status(&mut plan, 3, None, StepStatus::Completed).unwrap_err();
        assert_eq!(err, ProgressError::StepOutOfRange { index: 3, len: 1 });
        assert_eq!(plan, before);
    }

    #[test]
    fn untouched_plan_is_zero_and_mark_complete_is_hundred() {
        let mut plan = plan_with(vec![step_with_subs(2), step_with_subs(0), step_with_subs(3)]);
        assert_eq!(recompute_overall(&mut plan), 0);

        mark_complete(&mut plan);
        assert_eq!(plan.overall_progress, 100);
        for step in &plan.steps {
            assert_eq!(step.status, StepStatus::Completed);
            assert_eq!(step.progress, 100);
            assert!(step.sub_steps.iter().all(|s| s.status == StepStatus::Completed));
        }
    }

    #[test]
    fn empty_plan_never_divides_by_zero() {
        let mut plan = plan_with(Vec::new());
        assert_eq!(recompute_overall(&mut plan), 0);
        assert!(apply_status(&mut plan, 0, None, StepStatus::Completed).is_err());
        mark_complete(&mut plan);
        assert_eq!(plan.overall_progress, 100);
    }
}
