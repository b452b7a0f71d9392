use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::plan::LearningPlan;

/// The whole per-user document: plans plus streak bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub skills: Vec<LearningPlan>,
    #[serde(default)]
    pub streaks: Vec<NaiveDate>,
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
}

impl UserData {
    #[must_use]
    pub fn plan(&self, skill_name: &str) -> Option<&LearningPlan> {
        self.skills.iter().find(|plan| plan.skill_name == skill_name)
    }

    #[must_use]
    pub fn plan_mut(&mut self, skill_name: &str) -> Option<&mut LearningPlan> {
        self.skills
            .iter_mut()
            .find(|plan| plan.skill_name == skill_name)
    }

    /// Inserts a plan, replacing an existing plan with the same name in place.
    ///
    /// Returns `true` when an existing plan was replaced.
    pub fn upsert_plan(&mut self, plan: LearningPlan) -> bool {
        if let Some(existing) = self.plan_mut(&plan.skill_name) {
            *existing = plan;
            true
        } else {
            self.skills.push(plan);
            false
        }
    }

    #[must_use]
    pub fn streak_len(&self) -> usize {
        self.streaks.len()
    }
}
