//! Activity store: the list of logged activities plus the id of the one
//! currently open for editing.
//!
//! All changes go through [`transition`], which is pure. Whoever owns the
//! state (see [`crate::state::AppState`]) is responsible for side effects
//! such as persisting the list afterwards.

use crate::models::Activity;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityState {
    pub activities: Vec<Activity>,
    /// Empty when no activity is being edited. Not checked against
    /// `activities`, so it may dangle after a delete.
    pub active_id: String,
}

impl ActivityState {
    pub fn hydrated(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            active_id: String::new(),
        }
    }

    /// The activity being edited, if `active_id` is set and still present.
    pub fn active_activity(&self) -> Option<&Activity> {
        if self.active_id.is_empty() {
            return None;
        }
        self.activities
            .iter()
            .find(|activity| activity.id == self.active_id)
    }
}

/// A store action. On the wire: `{"type": "<tag>", "payload": {...}}`.
/// Tags the store does not know map to `Unknown` whatever their payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    SaveActivity { new_activity: Activity },
    SetActiveId { id: String },
    DeleteActivity { id: String },
    RestartApp,
    Unknown,
}

#[derive(Deserialize)]
struct TaggedAction {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavePayload {
    new_activity: Activity,
}

#[derive(Deserialize)]
struct IdPayload {
    id: String,
}

impl<'de> Deserialize<'de> for ActivityAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let TaggedAction { tag, payload } = TaggedAction::deserialize(deserializer)?;
        let action = match tag.as_str() {
            "save-activity" => {
                let SavePayload { new_activity } =
                    serde_json::from_value(payload).map_err(D::Error::custom)?;
                ActivityAction::SaveActivity { new_activity }
            }
            "set-activeId" | "set-active-id" => {
                let IdPayload { id } = serde_json::from_value(payload).map_err(D::Error::custom)?;
                ActivityAction::SetActiveId { id }
            }
            "delete-activity" => {
                let IdPayload { id } = serde_json::from_value(payload).map_err(D::Error::custom)?;
                ActivityAction::DeleteActivity { id }
            }
            // "restar-app" is the historical spelling.
            "restart-app" | "restar-app" => ActivityAction::RestartApp,
            _ => ActivityAction::Unknown,
        };
        Ok(action)
    }
}

impl ActivityAction {
    /// Whether applying this action may change the activity list.
    pub fn touches_activities(&self) -> bool {
        matches!(
            self,
            ActivityAction::SaveActivity { .. }
                | ActivityAction::DeleteActivity { .. }
                | ActivityAction::RestartApp
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ActivityAction::SaveActivity { .. } => "save-activity",
            ActivityAction::SetActiveId { .. } => "set-activeId",
            ActivityAction::DeleteActivity { .. } => "delete-activity",
            ActivityAction::RestartApp => "restart-app",
            ActivityAction::Unknown => "unknown",
        }
    }
}

pub fn transition(state: ActivityState, action: ActivityAction) -> ActivityState {
    match action {
        ActivityAction::SaveActivity { new_activity } => {
            let mut activities = state.activities;
            if state.active_id.is_empty() {
                activities.push(new_activity);
            } else if let Some(slot) = activities
                .iter_mut()
                .find(|activity| activity.id == state.active_id)
            {
                *slot = new_activity;
            }
            ActivityState {
                activities,
                active_id: String::new(),
            }
        }
        ActivityAction::SetActiveId { id } => ActivityState {
            active_id: id,
            ..state
        },
        ActivityAction::DeleteActivity { id } => {
            let mut activities = state.activities;
            activities.retain(|activity| activity.id != id);
            ActivityState {
                activities,
                active_id: state.active_id,
            }
        }
        ActivityAction::RestartApp => ActivityState::default(),
        ActivityAction::Unknown => state,
    }
}

/// Case-insensitive name filter. A blank query matches everything.
pub fn search<'a>(activities: &'a [Activity], query: &str) -> Vec<&'a Activity> {
    let needle = query.trim().to_lowercase();
    activities
        .iter()
        .filter(|activity| activity.name.to_lowercase().contains(&needle))
        .collect()
}
