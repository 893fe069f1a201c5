use crate::errors::AppError;
use crate::models::ActivityForm;
use crate::storage::{persist_activities, KeyValueFile};
use crate::store::{transition, ActivityAction, ActivityState};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Owner of the single activity store, shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: KeyValueFile,
    pub store: Arc<Mutex<ActivityState>>,
}

impl AppState {
    pub fn new(storage: KeyValueFile, state: ActivityState) -> Self {
        Self {
            storage,
            store: Arc::new(Mutex::new(state)),
        }
    }

    /// Applies `action` and mirrors the activity list to storage when it may
    /// have changed. A failed write is logged and otherwise ignored.
    pub async fn dispatch(&self, action: ActivityAction) -> ActivityState {
        let mut store = self.store.lock().await;
        self.apply(&mut store, action).await
    }

    /// Validates a create/edit form and saves it. The id is resolved under the
    /// same lock as the save: an edit keeps the edited record's id, anything
    /// else gets a fresh one.
    pub async fn save_form(
        &self,
        form: ActivityForm,
        today: NaiveDate,
    ) -> Result<ActivityState, AppError> {
        let mut store = self.store.lock().await;
        let id = match store.active_activity() {
            Some(active) => active.id.clone(),
            None => Uuid::new_v4().to_string(),
        };
        let activity = form.validate(id, today)?;
        info!(id = %activity.id, category = activity.category.name(), "saving activity");

        Ok(self
            .apply(&mut store, ActivityAction::SaveActivity { new_activity: activity })
            .await)
    }

    async fn apply(&self, store: &mut ActivityState, action: ActivityAction) -> ActivityState {
        let kind = action.kind();
        let persist = action.touches_activities();

        let current = std::mem::take(store);
        *store = transition(current, action);
        debug!(action = kind, count = store.activities.len(), "applied action");

        if persist {
            if let Err(err) = persist_activities(&self.storage, &store.activities).await {
                error!("failed to persist activities: {err}");
            }
        }

        store.clone()
    }

    pub async fn snapshot(&self) -> ActivityState {
        self.store.lock().await.clone()
    }
}
