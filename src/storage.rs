use crate::errors::AppError;
use crate::models::Activity;
use crate::store::ActivityState;
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub const STORAGE_KEY: &str = "activities";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// String key-value store kept as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.read_entries().await.remove(key)
    }

    pub async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut entries = self.read_entries().await;
        entries.insert(key.to_string(), value);
        let payload = serde_json::to_vec_pretty(&entries)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }

    async fn read_entries(&self) -> BTreeMap<String, String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        }
    }
}

/// Reads the stored activity list. Anything missing or unreadable counts as
/// no activities.
pub async fn load_activities(store: &KeyValueFile) -> Vec<Activity> {
    let Some(raw) = store.get_item(STORAGE_KEY).await else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(activities) => activities,
        Err(err) => {
            error!("failed to parse stored activities: {err}");
            Vec::new()
        }
    }
}

pub async fn persist_activities(store: &KeyValueFile, activities: &[Activity]) -> Result<(), AppError> {
    let payload = serde_json::to_string(activities)?;
    store.set_item(STORAGE_KEY, payload).await?;
    debug!(count = activities.len(), "persisted activities");
    Ok(())
}

pub async fn load_initial_state(store: &KeyValueFile) -> ActivityState {
    ActivityState::hydrated(load_activities(store).await)
}
