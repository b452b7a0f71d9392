use std::sync::Arc;

use chrono::{DateTime, Utc};
use learn_core::model::{LearningPlan, Step, StepStatus, SubStep, UserId};
use learn_core::progress::{self, ProgressReport};
use serde::Deserialize;
use serde_json::{Map, Value};
use storage::repository::UserDataRepository;
use tracing::{debug, info};

use crate::Clock;
use crate::ai::{CompletionBackend, CompletionRequest, normalize};
use crate::error::{GenerationError, PlanServiceError};

/// A status change requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub skill_name: String,
    pub step_index: usize,
    pub substep_index: Option<usize>,
    pub status: StepStatus,
}

/// A step together with its plan and neighbour indexes for navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPage {
    pub plan: LearningPlan,
    pub step_index: usize,
    pub prev_index: Option<usize>,
    pub next_index: Option<usize>,
}

impl StepPage {
    #[must_use]
    pub fn step(&self) -> &Step {
        &self.plan.steps[self.step_index]
    }
}

/// Orchestrates plan generation, lookup and progress updates.
#[derive(Clone)]
pub struct PlanService {
    clock: Clock,
    completions: Arc<dyn CompletionBackend>,
    users: Arc<dyn UserDataRepository>,
}

impl PlanService {
    #[must_use]
    pub fn new(
        clock: Clock,
        completions: Arc<dyn CompletionBackend>,
        users: Arc<dyn UserDataRepository>,
    ) -> Self {
        Self {
            clock,
            completions,
            users,
        }
    }

    /// Ask the completion API for a plan on `topic` and store it for `user`.
    ///
    /// A plan whose name matches an existing one replaces it.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::EmptyTopic` for a blank topic,
    /// `PlanServiceError::Generation` when the API call, parsing, or the
    /// response shape fails, and `PlanServiceError::Storage` if saving fails.
    pub async fn generate_plan(
        &self,
        user: &UserId,
        topic: &str,
    ) -> Result<LearningPlan, PlanServiceError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(PlanServiceError::EmptyTopic);
        }

        let completion = self
            .completions
            .complete(&CompletionRequest::plan(topic))
            .await
            .map_err(GenerationError::from)?;
        let object =
            normalize(&completion.text, completion.truncated).map_err(GenerationError::from)?;
        let plan = plan_from_object(object, self.clock.now())?;

        self.users.save_plan(user, &plan).await?;
        info!(%user, skill = %plan.skill_name, steps = plan.steps.len(), "stored learning plan");
        Ok(plan)
    }

    /// All plans for `user`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if repository access fails.
    pub async fn list_plans(&self, user: &UserId) -> Result<Vec<LearningPlan>, PlanServiceError> {
        Ok(self.users.load(user).await?.skills)
    }

    /// Fetch a plan by skill name.
    ///
    /// Returns `Ok(None)` when the plan does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if repository access fails.
    pub async fn get_plan(
        &self,
        user: &UserId,
        skill_name: &str,
    ) -> Result<Option<LearningPlan>, PlanServiceError> {
        let data = self.users.load(user).await?;
        Ok(data.plan(skill_name).cloned())
    }

    /// Load a step with its previous/next indexes.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::PlanNotFound` or `StepNotFound` for unknown
    /// targets, and `PlanServiceError::Storage` if repository access fails.
    pub async fn step_page(
        &self,
        user: &UserId,
        skill_name: &str,
        step_index: usize,
    ) -> Result<StepPage, PlanServiceError> {
        let plan = self
            .get_plan(user, skill_name)
            .await?
            .ok_or(PlanServiceError::PlanNotFound)?;
        if !plan.has_step(step_index) {
            return Err(PlanServiceError::StepNotFound);
        }

        let next_index = Some(step_index + 1).filter(|&next| plan.has_step(next));
        let prev_index = step_index.checked_sub(1);
        Ok(StepPage {
            plan,
            step_index,
            prev_index,
            next_index,
        })
    }

    /// Whether `skill_name` has a step at `step_index`.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if repository access fails.
    pub async fn step_exists(
        &self,
        user: &UserId,
        skill_name: &str,
        step_index: usize,
    ) -> Result<bool, PlanServiceError> {
        let plan = self.get_plan(user, skill_name).await?;
        Ok(plan.is_some_and(|plan| plan.has_step(step_index)))
    }

    /// Apply a step or substep status change and persist the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::PlanNotFound` or `StepNotFound` for unknown
    /// targets, and `PlanServiceError::Storage` if repository access fails.
    pub async fn update_progress(
        &self,
        user: &UserId,
        update: &ProgressUpdate,
    ) -> Result<ProgressReport, PlanServiceError> {
        let mut data = self.users.load(user).await?;
        let plan = data
            .plan_mut(&update.skill_name)
            .ok_or(PlanServiceError::PlanNotFound)?;

        let report = progress::apply_status(
            plan,
            update.step_index,
            update.substep_index,
            update.status,
        )
        .map_err(|_| PlanServiceError::StepNotFound)?;

        self.users.save_plan(user, plan).await?;
        debug!(
            %user,
            skill = %update.skill_name,
            step = update.step_index,
            substep = ?update.substep_index,
            status = %update.status,
            overall = report.overall_progress,
            "progress updated"
        );
        Ok(report)
    }

    /// Mark every step and substep of a plan completed.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::PlanNotFound` for an unknown plan and
    /// `PlanServiceError::Storage` if repository access fails.
    pub async fn complete_plan(
        &self,
        user: &UserId,
        skill_name: &str,
    ) -> Result<LearningPlan, PlanServiceError> {
        let mut plan = self
            .get_plan(user, skill_name)
            .await?
            .ok_or(PlanServiceError::PlanNotFound)?;
        progress::mark_complete(&mut plan);
        self.users.save_plan(user, &plan).await?;
        info!(%user, skill = %plan.skill_name, "plan completed");
        Ok(plan)
    }
}

//
// ─── GENERATED PAYLOAD ─────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct GeneratedPlan {
    skill_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    steps: Option<Vec<GeneratedStep>>,
}

#[derive(Debug, Deserialize)]
struct GeneratedStep {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    exercise: Option<String>,
    #[serde(default)]
    tip: Option<String>,
    #[serde(default)]
    sub_steps: Option<Vec<GeneratedSubStep>>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSubStep {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    exercise: Option<String>,
    #[serde(default)]
    tip: Option<String>,
}

/// Build a fresh, untouched plan from a normalized API object.
///
/// # Errors
///
/// Returns `GenerationError::UnexpectedShape` when `skill_name` or `steps` is
/// missing or a field has the wrong type.
pub fn plan_from_object(
    object: Map<String, Value>,
    created_at: DateTime<Utc>,
) -> Result<LearningPlan, GenerationError> {
    let generated: GeneratedPlan = serde_json::from_value(Value::Object(object))
        .map_err(|err| GenerationError::UnexpectedShape(err.to_string()))?;

    let skill_name = generated
        .skill_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GenerationError::UnexpectedShape("missing skill_name".into()))?;
    let steps = generated
        .steps
        .ok_or_else(|| GenerationError::UnexpectedShape("missing steps".into()))?;

    let steps = steps
        .into_iter()
        .map(|step| Step {
            title: step.title.unwrap_or_default(),
            explanation: step.explanation.unwrap_or_default(),
            exercise: step.exercise.unwrap_or_default(),
            tip: step.tip.unwrap_or_default(),
            sub_steps: step
                .sub_steps
                .unwrap_or_default()
                .into_iter()
                .map(|sub| SubStep {
                    title: sub.title.unwrap_or_default(),
                    explanation: sub.explanation.unwrap_or_default(),
                    exercise: sub.exercise.unwrap_or_default(),
                    tip: sub.tip.unwrap_or_default(),
                    status: StepStatus::NotStarted,
                })
                .collect(),
            status: StepStatus::NotStarted,
            progress: 0,
            mcqs: None,
        })
        .collect();

    Ok(LearningPlan {
        skill_name,
        description: generated.description.unwrap_or_default(),
        steps,
        overall_progress: 0,
        created_at,
    })
}
