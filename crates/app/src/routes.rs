use axum::body::Bytes;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use learn_core::model::{QuestionSet, StepStatus};
use serde::Deserialize;
use serde_json::json;
use services::{AppServices, PlanServiceError, ProgressUpdate};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};
use ui::LearnVm;
use ui::vm::{CongratulationsVm, HomeVm, SkillVm, StepVm, generate_href, skill_href};

use crate::user::CurrentUser;

#[derive(Clone)]
pub struct AppState {
    services: AppServices,
}

impl AppState {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/learn", get(learn_form).post(learn_submit))
        .route("/generate-plan/:skill", get(generate_plan))
        .route("/skill/:skill_id", get(view_skill))
        .route("/step/:skill_id/:step_index", get(view_step))
        .route("/check-step/:skill_id/:step_index", get(check_step))
        .route("/update-progress", post(update_progress))
        .route("/get-mcqs/:skill_id/:step_index", get(get_questions))
        .route("/congratulations/:skill_id", get(congratulations))
        .route(ui::assets::STYLE_PATH, get(style_css))
        .route(ui::assets::STEP_SCRIPT_PATH, get(step_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//
// ─── PAGES ─────────────────────────────────────────────────────────────────────
//

async fn home(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Response {
    let streak = match state.services.streaks().record_visit(&user).await {
        Ok(streak) => streak,
        Err(err) => {
            warn!(%user, error = %err, "could not record visit");
            0
        }
    };

    match state.services.plans().list_plans(&user).await {
        Ok(plans) => Html(ui::render_home(HomeVm::new(&plans, streak))).into_response(),
        Err(err) => plan_error_page(&err),
    }
}

async fn learn_form() -> Html<String> {
    Html(ui::render_learn(LearnVm::default()))
}

#[derive(Debug, Deserialize)]
struct LearnForm {
    #[serde(default)]
    skill: String,
}

async fn learn_submit(Form(form): Form<LearnForm>) -> Response {
    let topic = form.skill.trim();
    if topic.is_empty() {
        let vm = LearnVm {
            notice: Some("Please enter a skill to learn.".to_string()),
        };
        return Html(ui::render_learn(vm)).into_response();
    }
    Redirect::to(&generate_href(topic)).into_response()
}

async fn generate_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill): Path<String>,
) -> Response {
    match state.services.plans().generate_plan(&user, &skill).await {
        Ok(plan) => Redirect::to(&skill_href(&plan.skill_name)).into_response(),
        Err(err) => plan_error_page(&err),
    }
}

async fn view_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill_id): Path<String>,
) -> Response {
    match state.services.plans().get_plan(&user, &skill_id).await {
        Ok(Some(plan)) => Html(ui::render_skill(SkillVm::from(&plan))).into_response(),
        Ok(None) => plan_error_page(&PlanServiceError::PlanNotFound),
        Err(err) => plan_error_page(&err),
    }
}

async fn view_step(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((skill_id, step_index)): Path<(String, String)>,
) -> Response {
    let Some(step_index) = parse_index(&step_index) else {
        return plan_error_page(&PlanServiceError::StepNotFound);
    };
    match state
        .services
        .plans()
        .step_page(&user, &skill_id, step_index)
        .await
    {
        Ok(page) => Html(ui::render_step(StepVm::from(&page))).into_response(),
        Err(err) => plan_error_page(&err),
    }
}

async fn congratulations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill_id): Path<String>,
) -> Response {
    match state.services.plans().complete_plan(&user, &skill_id).await {
        Ok(plan) => {
            Html(ui::render_congratulations(CongratulationsVm::from(&plan))).into_response()
        }
        Err(err) => plan_error_page(&err),
    }
}

fn plan_error_page(err: &PlanServiceError) -> Response {
    let (status, message, detail) = match err {
        PlanServiceError::EmptyTopic => (StatusCode::BAD_REQUEST, err.to_string(), None),
        PlanServiceError::PlanNotFound | PlanServiceError::StepNotFound => {
            (StatusCode::NOT_FOUND, err.to_string(), None)
        }
        PlanServiceError::Generation(gen_err) => {
            warn!(error = %gen_err, "plan generation failed");
            (
                StatusCode::BAD_GATEWAY,
                format!("Could not generate a learning plan: {gen_err}"),
                gen_err.raw_response(),
            )
        }
        _ => {
            error!(error = %err, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
        }
    };
    (status, Html(ui::render_error(&message, detail))).into_response()
}

//
// ─── JSON ENDPOINTS ────────────────────────────────────────────────────────────
//

async fn check_step(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((skill_id, step_index)): Path<(String, String)>,
) -> Json<serde_json::Value> {
    let exists = match parse_index(&step_index) {
        Some(index) => state
            .services
            .plans()
            .step_exists(&user, &skill_id, index)
            .await
            .unwrap_or_else(|err| {
                warn!(%user, error = %err, "step lookup failed");
                false
            }),
        None => false,
    };
    Json(json!({ "exists": exists }))
}

/// Indexes arrive as numbers or numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(u64),
    Text(String),
}

impl RawIndex {
    fn resolve(&self) -> Option<usize> {
        match self {
            RawIndex::Number(value) => usize::try_from(*value).ok(),
            RawIndex::Text(text) => parse_index(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProgressPayload {
    skill_id: String,
    step_index: RawIndex,
    #[serde(default)]
    substep_index: Option<RawIndex>,
    status: StepStatus,
}

impl ProgressPayload {
    fn into_update(self) -> Option<ProgressUpdate> {
        let step_index = self.step_index.resolve()?;
        let substep_index = match &self.substep_index {
            Some(raw) => Some(raw.resolve()?),
            None => None,
        };
        Some(ProgressUpdate {
            skill_name: self.skill_id,
            step_index,
            substep_index,
            status: self.status,
        })
    }
}

async fn update_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Response {
    let update = serde_json::from_slice::<ProgressPayload>(&body)
        .ok()
        .and_then(ProgressPayload::into_update);
    let Some(update) = update else {
        return progress_error(StatusCode::BAD_REQUEST, "Invalid progress update");
    };

    match state.services.plans().update_progress(&user, &update).await {
        Ok(report) => Json(json!({
            "success": true,
            "step_progress": report.step_progress,
            "overall_progress": report.overall_progress,
        }))
        .into_response(),
        Err(PlanServiceError::PlanNotFound | PlanServiceError::StepNotFound) => {
            progress_error(StatusCode::NOT_FOUND, "Invalid skill or step index")
        }
        Err(err) => {
            error!(%user, error = %err, "progress update failed");
            progress_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not save progress")
        }
    }
}

fn progress_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn get_questions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((skill_id, step_index)): Path<(String, String)>,
) -> Json<QuestionSet> {
    let Some(step_index) = parse_index(&step_index) else {
        return Json(QuestionSet::empty());
    };
    match state
        .services
        .quizzes()
        .questions_for_step(&user, &skill_id, step_index)
        .await
    {
        Ok(set) => Json(set),
        Err(err) => {
            warn!(%user, error = %err, "question lookup failed");
            Json(QuestionSet::empty())
        }
    }
}

//
// ─── ASSETS ────────────────────────────────────────────────────────────────────
//

async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        ui::assets::STYLE_CSS,
    )
}

async fn step_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ui::assets::STEP_JS,
    )
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}
