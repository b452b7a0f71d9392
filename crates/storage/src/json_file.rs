//! One JSON document per user, read and written whole.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use learn_core::model::{UserData, UserId};
use tokio::sync::Mutex;
use tracing::warn;

use crate::repository::{StorageError, UserDataRepository};

#[derive(Debug)]
pub struct JsonFileRepository {
    dir: PathBuf,
    // Serializes writers within this process; other processes still race.
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the document for `user`.
    #[must_use]
    pub fn path_for(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{user}_data.json"))
    }
}

#[async_trait]
impl UserDataRepository for JsonFileRepository {
    async fn load(&self, user: &UserId) -> Result<UserData, StorageError> {
        let path = self.path_for(user);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(UserData::default()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(data) => Ok(data),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupt user data, starting empty");
                Ok(UserData::default())
            }
        }
    }

    async fn save(&self, user: &UserId, data: &UserData) -> Result<(), StorageError> {
        let body = serde_json::to_vec(data)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write beside the target and rename so readers never see half a file.
        let path = self.path_for(user);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
