mod common;

use std::sync::Arc;

use common::{GUITAR_PLAN, ScriptedBackend};
use learn_core::model::UserId;
use learn_core::time::fixed_clock;
use services::{ApiError, PlanService, QuizService};
use storage::repository::{InMemoryRepository, UserDataRepository};

const QUESTIONS: &str = r#"{"questions": [
    {"question": "Which hand frets?", "options": ["Left", "Right", "Both", "Neither"], "correctIndex": 0, "explanation": "Usually"},
    {"question": "Missing options", "correctIndex": 1},
    {"question": "Tuning reference?", "options": ["A440", "C256", "E330", "G392"], "correctIndex": 9}
]}"#;

async fn seeded(backend: &Arc<ScriptedBackend>, repo: &Arc<InMemoryRepository>) -> UserId {
    backend.push_text(GUITAR_PLAN, false);
    let plans = PlanService::new(fixed_clock(), backend.clone(), repo.clone());
    let user = UserId::default();
    plans.generate_plan(&user, "guitar").await.unwrap();
    user
}

#[tokio::test]
async fn questions_are_generated_once_and_cached() {
    let backend = ScriptedBackend::new();
    let repo = Arc::new(InMemoryRepository::new());
    let user = seeded(&backend, &repo).await;
    backend.push_text(&format!("```json\n{QUESTIONS}\n```"), false);
    let quizzes = QuizService::new(backend.clone(), repo.clone());

    let first = quizzes.questions_for_step(&user, "Guitar", 0).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.questions[0].correct_option(), Some("Left"));
    assert_eq!(first.questions[1].correct_index, 0);

    let quiz_request = &backend.requests()[1];
    assert!(quiz_request.prompt.contains("Hold the guitar\nPosture first"));

    // Served from the stored plan, no second request.
    let second = quizzes.questions_for_step(&user, "Guitar", 0).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(backend.requests().len(), 2);

    let stored = repo.load(&user).await.unwrap();
    assert_eq!(stored.skills[0].steps[0].mcqs.as_ref(), Some(&first));
}

#[tokio::test]
async fn backend_failure_yields_default_question() {
    let backend = ScriptedBackend::new();
    let repo = Arc::new(InMemoryRepository::new());
    let user = seeded(&backend, &repo).await;
    backend.push_error(ApiError::NoCandidates);
    let quizzes = QuizService::new(backend, repo);

    let set = quizzes.questions_for_step(&user, "Guitar", 1).await.unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.questions[0].options.len(), 4);
    assert!(set.questions[0].question.contains("Tune"));
}

#[tokio::test]
async fn unexpected_payload_yields_default_question() {
    let backend = ScriptedBackend::new();
    let repo = Arc::new(InMemoryRepository::new());
    let user = seeded(&backend, &repo).await;
    backend.push_text(r#"{"quiz": []}"#, false);
    let quizzes = QuizService::new(backend, repo);

    let set = quizzes.questions_for_step(&user, "Guitar", 2).await.unwrap();
    assert_eq!(set.len(), 1);
}

#[tokio::test]
async fn unknown_targets_yield_empty_set_without_calling_backend() {
    let backend = ScriptedBackend::new();
    let repo = Arc::new(InMemoryRepository::new());
    let user = seeded(&backend, &repo).await;
    let quizzes = QuizService::new(backend.clone(), repo);

    assert!(quizzes.questions_for_step(&user, "Guitar", 7).await.unwrap().is_empty());
    assert!(quizzes.questions_for_step(&user, "Violin", 0).await.unwrap().is_empty());
    assert_eq!(backend.requests().len(), 1);
}
