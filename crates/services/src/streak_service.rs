use std::sync::Arc;

use learn_core::model::UserId;
use learn_core::streak;
use storage::repository::UserDataRepository;

use crate::Clock;
use crate::error::StreakServiceError;

/// Tracks consecutive days of activity per user.
#[derive(Clone)]
pub struct StreakService {
    clock: Clock,
    users: Arc<dyn UserDataRepository>,
}

impl StreakService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserDataRepository>) -> Self {
        Self { clock, users }
    }

    /// Record a visit today and return the current streak length.
    ///
    /// # Errors
    ///
    /// Returns `StreakServiceError::Storage` if repository access fails.
    pub async fn record_visit(&self, user: &UserId) -> Result<usize, StreakServiceError> {
        let mut data = self.users.load(user).await?;
        let today = self.clock.today();
        if data.last_active == Some(today) {
            return Ok(data.streak_len());
        }

        let streak = streak::record_activity(&mut data, today);
        self.users.save(user, &data).await?;
        Ok(streak)
    }
}
