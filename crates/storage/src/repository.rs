use async_trait::async_trait;
use learn_core::model::{LearningPlan, UserData, UserId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json_file::JsonFileRepository;
use crate::sqlite::{SqliteInitError, SqliteRepository};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository contract for the per-user document.
///
/// `load` never fails on a missing document: a user with nothing stored yet
/// starts from `UserData::default()`.
#[async_trait]
pub trait UserDataRepository: Send + Sync {
    /// Read the whole document for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn load(&self, user: &UserId) -> Result<UserData, StorageError>;

    /// Replace the whole document for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn save(&self, user: &UserId, data: &UserData) -> Result<(), StorageError>;

    /// Insert or replace a single plan, keyed by `(user, skill_name)`.
    ///
    /// The default reads the document, upserts the plan and writes it back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if reading or writing fails.
    async fn save_plan(&self, user: &UserId, plan: &LearningPlan) -> Result<(), StorageError> {
        let mut data = self.load(user).await?;
        data.upsert_plan(plan.clone());
        self.save(user, &data).await
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<Mutex<HashMap<UserId, UserData>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserDataRepository for InMemoryRepository {
    async fn load(&self, user: &UserId) -> Result<UserData, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: &UserId, data: &UserData) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(user.clone(), data.clone());
        Ok(())
    }

    async fn save_plan(&self, user: &UserId, plan: &LearningPlan) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry(user.clone())
            .or_default()
            .upsert_plan(plan.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserDataRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserDataRepository> = Arc::new(InMemoryRepository::new());
        Self { users }
    }

    /// Build a `Storage` that keeps one JSON file per user under `dir`.
    #[must_use]
    pub fn json_dir(dir: impl Into<PathBuf>) -> Self {
        let users: Arc<dyn UserDataRepository> = Arc::new(JsonFileRepository::new(dir));
        Self { users }
    }

    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let users: Arc<dyn UserDataRepository> = Arc::new(repo);
        Ok(Self { users })
    }
}
