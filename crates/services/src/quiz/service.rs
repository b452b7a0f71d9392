use std::sync::Arc;

use learn_core::model::{QuestionSet, UserId};
use serde_json::Value;
use storage::repository::UserDataRepository;
use tracing::warn;

use crate::ai::{CompletionBackend, CompletionRequest, normalize};
use crate::error::QuizServiceError;
use crate::quiz::validate::{default_question_set, validate_question_set};

/// Generates and caches the multiple-choice questions for a step.
#[derive(Clone)]
pub struct QuizService {
    completions: Arc<dyn CompletionBackend>,
    users: Arc<dyn UserDataRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        completions: Arc<dyn CompletionBackend>,
        users: Arc<dyn UserDataRepository>,
    ) -> Self {
        Self { completions, users }
    }

    /// Questions for one step, generating and storing them on first use.
    ///
    /// An unknown plan or step yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the user's plans cannot be read
    /// or the new questions cannot be stored.
    pub async fn questions_for_step(
        &self,
        user: &UserId,
        skill_name: &str,
        step_index: usize,
    ) -> Result<QuestionSet, QuizServiceError> {
        let mut data = self.users.load(user).await?;
        let Some(plan) = data.plan_mut(skill_name) else {
            return Ok(QuestionSet::empty());
        };
        let Some(step) = plan.step_mut(step_index) else {
            return Ok(QuestionSet::empty());
        };
        if let Some(cached) = step.cached_questions() {
            return Ok(cached.clone());
        }

        let questions = self.generate(&step.quiz_content()).await;
        step.mcqs = Some(questions.clone());
        self.users.save_plan(user, plan).await?;
        Ok(questions)
    }

    /// Ask the backend for questions about `content` and validate them.
    ///
    /// Backend or parse failures, and payloads without a `questions` key,
    /// produce the single default question instead.
    pub async fn generate(&self, content: &str) -> QuestionSet {
        let completion = match self.completions.complete(&CompletionRequest::quiz(content)).await {
            Ok(completion) => completion,
            Err(err) => {
                warn!(error = %err, "question generation failed, using default question");
                return default_question_set(content);
            }
        };

        match normalize(&completion.text, completion.truncated) {
            Ok(object) if object.contains_key("questions") => {
                validate_question_set(&Value::Object(object))
            }
            Ok(object) => {
                warn!(keys = ?object.keys().collect::<Vec<_>>(), "unexpected question payload shape");
                default_question_set(content)
            }
            Err(err) => {
                warn!(error = %err, "question payload did not parse");
                default_question_set(content)
            }
        }
    }
}
