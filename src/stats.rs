use crate::catalog::Category;
use crate::models::{Activity, ChartData, ChartDataset, TrackerResponse};
use std::collections::BTreeSet;

pub fn category_total(activities: &[Activity], category: Category) -> u64 {
    activities
        .iter()
        .filter(|activity| activity.category == category)
        .map(|activity| u64::from(activity.calories))
        .sum()
}

/// Food calories minus exercise calories.
pub fn net_balance(activities: &[Activity]) -> i64 {
    category_total(activities, Category::Food) as i64
        - category_total(activities, Category::Exercise) as i64
}

pub fn tracker(activities: &[Activity]) -> TrackerResponse {
    TrackerResponse {
        food_calories: category_total(activities, Category::Food),
        exercise_calories: category_total(activities, Category::Exercise),
        net_balance: net_balance(activities),
    }
}

/// Per-date calorie sums, one dataset per category, aligned to the sorted
/// distinct dates. ISO dates sort chronologically as strings.
pub fn build_series(activities: &[Activity]) -> ChartData {
    let labels: Vec<String> = activities
        .iter()
        .map(|activity| activity.date.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let datasets = Category::ALL
        .into_iter()
        .map(|category| ChartDataset {
            label: format!("Calories ({})", category.name()),
            data: labels
                .iter()
                .map(|date| {
                    activities
                        .iter()
                        .filter(|activity| activity.category == category && &activity.date == date)
                        .map(|activity| u64::from(activity.calories))
                        .sum()
                })
                .collect(),
        })
        .collect();

    ChartData { labels, datasets }
}
