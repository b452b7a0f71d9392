use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use tracing::warn;

use crate::repository::{StorageError, UserDataRepository};
use learn_core::model::{LearningPlan, UserData, UserId};

use super::SqliteRepository;

fn encode<T: serde::Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|err| StorageError::Serialization(err.to_string()))
}

#[async_trait]
impl UserDataRepository for SqliteRepository {
    async fn load(&self, user: &UserId) -> Result<UserData, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT skill_name, body
            FROM learning_plans
            WHERE user_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let mut skills = Vec::with_capacity(rows.len());
        for row in rows {
            let skill_name: String = row
                .try_get("skill_name")
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            let body: String = row
                .try_get("body")
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            match serde_json::from_str::<LearningPlan>(&body) {
                Ok(plan) => skills.push(plan),
                Err(err) => {
                    warn!(user = %user, skill = %skill_name, error = %err, "skipping corrupt plan row");
                }
            }
        }

        let activity = sqlx::query(
            r"
            SELECT streaks, last_active
            FROM user_activity
            WHERE user_id = ?1
            ",
        )
        .bind(user.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let (streaks, last_active) = match activity {
            Some(row) => {
                let streaks: String = row
                    .try_get("streaks")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let last_active: Option<NaiveDate> = row
                    .try_get("last_active")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let streaks = serde_json::from_str(&streaks).unwrap_or_else(|err| {
                    warn!(user = %user, error = %err, "corrupt streak list, starting empty");
                    Vec::new()
                });
                (streaks, last_active)
            }
            None => (Vec::new(), None),
        };

        Ok(UserData {
            skills,
            streaks,
            last_active,
        })
    }

    async fn save(&self, user: &UserId, data: &UserData) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM learning_plans WHERE user_id = ?1")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        for (position, plan) in data.skills.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            sqlx::query(
                r"
                INSERT INTO learning_plans (user_id, skill_name, position, body)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(user_id, skill_name) DO UPDATE SET
                    position = excluded.position,
                    body = excluded.body
                ",
            )
            .bind(user.as_str())
            .bind(&plan.skill_name)
            .bind(position)
            .bind(encode(plan)?)
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        }

        sqlx::query(
            r"
            INSERT INTO user_activity (user_id, streaks, last_active)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                streaks = excluded.streaks,
                last_active = excluded.last_active
            ",
        )
        .bind(user.as_str())
        .bind(encode(&data.streaks)?)
        .bind(data.last_active)
        .execute(&mut *tx)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn save_plan(&self, user: &UserId, plan: &LearningPlan) -> Result<(), StorageError> {
        // New plans go to the end; an existing plan keeps its position.
        sqlx::query(
            r"
            INSERT INTO learning_plans (user_id, skill_name, position, body)
            VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM learning_plans WHERE user_id = ?1),
                ?3
            )
            ON CONFLICT(user_id, skill_name) DO UPDATE SET
                body = excluded.body
            ",
        )
        .bind(user.as_str())
        .bind(&plan.skill_name)
        .bind(encode(plan)?)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
