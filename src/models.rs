use crate::catalog::Category;
use crate::errors::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single logged food or exercise entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub calories: u32,
    /// ISO calendar date, e.g. `2024-01-01`.
    pub date: String,
}

/// Create/edit form payload, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityForm {
    pub category: u8,
    pub name: String,
    pub calories: i64,
    #[serde(default)]
    pub date: Option<String>,
}

impl ActivityForm {
    /// Turns the form into an `Activity` carrying `id`. A missing or blank
    /// date falls back to `today`.
    pub fn validate(self, id: String, today: NaiveDate) -> Result<Activity, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("name must not be empty"));
        }

        if self.calories <= 0 {
            return Err(AppError::bad_request("calories must be greater than 0"));
        }
        let calories = u32::try_from(self.calories)
            .map_err(|_| AppError::bad_request("calories is too large"))?;

        let category = Category::try_from(self.category)
            .map_err(|err| AppError::bad_request(err.to_string()))?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?,
        };

        Ok(Activity {
            id,
            category,
            name: name.to_string(),
            calories,
            date: date.format(DATE_FORMAT).to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerResponse {
    pub food_calories: u64,
    pub exercise_calories: u64,
    pub net_balance: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    pub activities: Vec<Activity>,
    pub active_id: String,
    pub tracker: TrackerResponse,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
}

/// Chart input: one dataset per category, aligned to `labels`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}
