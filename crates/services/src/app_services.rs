use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::ai::CompletionBackend;
use crate::plan_service::PlanService;
use crate::quiz::QuizService;
use crate::streak_service::StreakService;

/// Assembles the app-facing services over one storage backend and one
/// completion backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    plans: Arc<PlanService>,
    quizzes: Arc<QuizService>,
    streaks: Arc<StreakService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage, completions: Arc<dyn CompletionBackend>) -> Self {
        let plans = Arc::new(PlanService::new(
            clock,
            Arc::clone(&completions),
            Arc::clone(&storage.users),
        ));
        let quizzes = Arc::new(QuizService::new(
            Arc::clone(&completions),
            Arc::clone(&storage.users),
        ));
        let streaks = Arc::new(StreakService::new(clock, Arc::clone(&storage.users)));

        Self {
            clock,
            plans,
            quizzes,
            streaks,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn plans(&self) -> Arc<PlanService> {
        Arc::clone(&self.plans)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn streaks(&self) -> Arc<StreakService> {
        Arc::clone(&self.streaks)
    }
}
