mod ids;
mod plan;
mod quiz;
mod user_data;

pub use ids::{DEFAULT_USER_ID, UserId, UserIdError};
pub use plan::{LearningPlan, Step, StepStatus, SubStep};
pub use quiz::{Question, QuestionSet};
pub use user_data::UserData;
