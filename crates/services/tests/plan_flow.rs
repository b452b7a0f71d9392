mod common;

use std::sync::Arc;

use common::{GUITAR_PLAN, ScriptedBackend};
use learn_core::model::{StepStatus, UserId};
use learn_core::time::fixed_clock;
use services::{ApiError, GenerationError, PlanService, PlanServiceError, ProgressUpdate};
use storage::repository::{InMemoryRepository, UserDataRepository};

fn service(backend: Arc<ScriptedBackend>, repo: Arc<InMemoryRepository>) -> PlanService {
    PlanService::new(fixed_clock(), backend, repo)
}

fn update(step: usize, sub: Option<usize>, status: StepStatus) -> ProgressUpdate {
    ProgressUpdate {
        skill_name: "Guitar".into(),
        step_index: step,
        substep_index: sub,
        status,
    }
}

#[tokio::test]
async fn generated_plan_is_stored_untouched() {
    let backend = ScriptedBackend::new();
    backend.push_text(&format!("```json\n{GUITAR_PLAN}\n```"), false);
    let repo = Arc::new(InMemoryRepository::new());
    let plans = service(backend.clone(), repo.clone());
    let user = UserId::default();

    let plan = plans.generate_plan(&user, "  guitar ").await.unwrap();
    assert_eq!(plan.skill_name, "Guitar");
    assert_eq!(plan.steps.len(), 3);
    assert_eq!(plan.overall_progress, 0);
    assert!(plan.steps.iter().all(|s| s.status == StepStatus::NotStarted && s.progress == 0));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.ends_with("Topic: guitar"));
    assert_eq!(requests[0].max_tokens, 2500);

    let stored = repo.load(&user).await.unwrap();
    assert_eq!(stored.skills, vec![plan]);
}

#[tokio::test]
async fn truncated_plan_is_repaired_when_padding_suffices() {
    let backend = ScriptedBackend::new();
    backend.push_text(
        r#"{"skill_name":"Go","description":"Stones","steps":[{"title":"Liberties","sub_steps":[{"title":"Count""#,
        true,
    );
    let plans = service(backend, Arc::new(InMemoryRepository::new()));

    // Padding closes brackets before braces, so a cut inside a nested
    // object cannot be repaired.
    let err = plans.generate_plan(&UserId::default(), "go").await.unwrap_err();
    assert!(matches!(
        err,
        PlanServiceError::Generation(GenerationError::Parse { .. })
    ));

    let backend = ScriptedBackend::new();
    backend.push_text(r#"{"skill_name":"Go","description":"Stones","steps":[{"title":"Liberties"}"#, true);
    let plans = service(backend, Arc::new(InMemoryRepository::new()));
    let plan = plans.generate_plan(&UserId::default(), "go").await.unwrap();
    assert_eq!(plan.steps[0].title, "Liberties");
}

#[tokio::test]
async fn regenerating_a_skill_replaces_it() {
    let backend = ScriptedBackend::new();
    backend.push_text(GUITAR_PLAN, false);
    backend.push_text(
        r#"{"skill_name":"Guitar","description":"Second take","steps":[]}"#,
        false,
    );
    let repo = Arc::new(InMemoryRepository::new());
    let plans = service(backend, repo.clone());
    let user = UserId::default();

    plans.generate_plan(&user, "guitar").await.unwrap();
    plans.generate_plan(&user, "guitar").await.unwrap();

    let stored = plans.list_plans(&user).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description, "Second take");
}

#[tokio::test]
async fn generation_failures_are_values() {
    let backend = ScriptedBackend::new();
    backend.push_error(ApiError::Disabled);
    backend.push_text("   ", false);
    backend.push_text("I cannot help with that.", false);
    backend.push_text(r#"{"error": "quota exceeded"}"#, false);
    let repo = Arc::new(InMemoryRepository::new());
    let plans = service(backend, repo.clone());
    let user = UserId::default();

    let err = plans.generate_plan(&user, "x").await.unwrap_err();
    assert!(matches!(err, PlanServiceError::Generation(GenerationError::Api(_))));

    let err = plans.generate_plan(&user, "x").await.unwrap_err();
    assert!(matches!(err, PlanServiceError::Generation(GenerationError::EmptyResponse)));

    let err = plans.generate_plan(&user, "x").await.unwrap_err();
    match err {
        PlanServiceError::Generation(gen_err) => {
            assert_eq!(gen_err.raw_response(), Some("I cannot help with that."));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = plans.generate_plan(&user, "x").await.unwrap_err();
    assert!(matches!(
        err,
        PlanServiceError::Generation(GenerationError::UnexpectedShape(_))
    ));

    let err = plans.generate_plan(&user, "   ").await.unwrap_err();
    assert!(matches!(err, PlanServiceError::EmptyTopic));

    assert!(repo.load(&user).await.unwrap().skills.is_empty());
}

#[tokio::test]
async fn progress_updates_flow_through_storage() {
    let backend = ScriptedBackend::new();
    backend.push_text(GUITAR_PLAN, false);
    let repo = Arc::new(InMemoryRepository::new());
    let plans = service(backend, repo.clone());
    let user = UserId::default();
    plans.generate_plan(&user, "guitar").await.unwrap();

    let report = plans
        .update_progress(&user, &update(0, Some(0), StepStatus::Completed))
        .await
        .unwrap();
    // The step takes the substep's status: one of three steps completed.
    assert_eq!(report.step_progress, 25);
    assert_eq!(report.overall_progress, 33);
    plans
        .update_progress(&user, &update(0, Some(1), StepStatus::Completed))
        .await
        .unwrap();
    let report = plans
        .update_progress(&user, &update(0, Some(2), StepStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(report.step_progress, 62);
    // One of three steps in progress.
    assert_eq!(report.overall_progress, 16);

    let report = plans
        .update_progress(&user, &update(1, None, StepStatus::Completed))
        .await
        .unwrap();
    assert_eq!(report.step_progress, 100);
    assert_eq!(report.overall_progress, 50);

    let stored = plans.get_plan(&user, "Guitar").await.unwrap().unwrap();
    assert_eq!(stored.steps[0].progress, 62);
    assert_eq!(stored.steps[0].status, StepStatus::InProgress);
    assert_eq!(stored.overall_progress, 50);
}

#[tokio::test]
async fn unknown_targets_are_not_found() {
    let backend = ScriptedBackend::new();
    backend.push_text(GUITAR_PLAN, false);
    let plans = service(backend, Arc::new(InMemoryRepository::new()));
    let user = UserId::default();
    plans.generate_plan(&user, "guitar").await.unwrap();

    let err = plans
        .update_progress(&user, &update(9, None, StepStatus::Completed))
        .await
        .unwrap_err();
    assert!(matches!(err, PlanServiceError::StepNotFound));

    let mut missing = update(0, None, StepStatus::Completed);
    missing.skill_name = "Violin".into();
    let err = plans.update_progress(&user, &missing).await.unwrap_err();
    assert!(matches!(err, PlanServiceError::PlanNotFound));

    assert!(plans.step_exists(&user, "Guitar", 2).await.unwrap());
    assert!(!plans.step_exists(&user, "Guitar", 3).await.unwrap());
    assert!(!plans.step_exists(&user, "Violin", 0).await.unwrap());
}

#[tokio::test]
async fn step_pages_know_their_neighbours() {
    let backend = ScriptedBackend::new();
    backend.push_text(GUITAR_PLAN, false);
    let plans = service(backend, Arc::new(InMemoryRepository::new()));
    let user = UserId::default();
    plans.generate_plan(&user, "guitar").await.unwrap();

    let first = plans.step_page(&user, "Guitar", 0).await.unwrap();
    assert_eq!((first.prev_index, first.next_index), (None, Some(1)));
    assert_eq!(first.step().title, "Hold the guitar");

    let last = plans.step_page(&user, "Guitar", 2).await.unwrap();
    assert_eq!((last.prev_index, last.next_index), (Some(1), None));

    let err = plans.step_page(&user, "Guitar", 3).await.unwrap_err();
    assert!(matches!(err, PlanServiceError::StepNotFound));
}

#[tokio::test]
async fn completing_a_plan_forces_everything_done() {
    let backend = ScriptedBackend::new();
    backend.push_text(GUITAR_PLAN, false);
    let plans = service(backend, Arc::new(InMemoryRepository::new()));
    let user = UserId::default();
    plans.generate_plan(&user, "guitar").await.unwrap();

    let plan = plans.complete_plan(&user, "Guitar").await.unwrap();
    assert_eq!(plan.overall_progress, 100);
    assert!(plan.steps.iter().all(|s| s.status == StepStatus::Completed && s.progress == 100));
    assert!(
        plan.steps
            .iter()
            .flat_map(|s| &s.sub_steps)
            .all(|s| s.status == StepStatus::Completed)
    );

    let stored = plans.get_plan(&user, "Guitar").await.unwrap().unwrap();
    assert_eq!(stored, plan);
}
