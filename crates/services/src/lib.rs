#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod error;
pub mod plan_service;
pub mod quiz;
pub mod streak_service;

pub use learn_core::Clock;

pub use ai::{Completion, CompletionBackend, CompletionConfig, CompletionRequest, HttpCompletionClient};
pub use app_services::AppServices;
pub use error::{
    ApiError, GenerationError, NormalizeError, PlanServiceError, QuizServiceError,
    StreakServiceError,
};
pub use plan_service::{PlanService, ProgressUpdate, StepPage};
pub use quiz::QuizService;
pub use streak_service::StreakService;
