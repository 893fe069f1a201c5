use crate::catalog::{CategoryEntry, CATEGORIES};
use crate::errors::AppError;
use crate::models::{Activity, ActivityForm, ChartData, SearchQuery, StateResponse};
use crate::state::AppState;
use crate::stats::{build_series, tracker};
use crate::store::{search, ActivityAction, ActivityState};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.snapshot().await;
    Html(render_index(&tracker(&store.activities)))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(to_response(state.snapshot().await))
}

pub async fn get_categories() -> Json<Vec<CategoryEntry>> {
    Json(CATEGORIES.to_vec())
}

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Activity>> {
    let store = state.snapshot().await;
    let hits: Vec<Activity> = search(&store.activities, &query.q)
        .into_iter()
        .cloned()
        .collect();
    Json(hits)
}

pub async fn save_activity(
    State(state): State<AppState>,
    Json(form): Json<ActivityForm>,
) -> Result<Json<StateResponse>, AppError> {
    let store = state.save_form(form, Local::now().date_naive()).await?;
    Ok(Json(to_response(store)))
}

pub async fn get_editing(State(state): State<AppState>) -> Json<Option<Activity>> {
    Json(state.snapshot().await.active_activity().cloned())
}

pub async fn edit_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<StateResponse> {
    let store = state.dispatch(ActivityAction::SetActiveId { id }).await;
    Json(to_response(store))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<StateResponse> {
    info!(%id, "deleting activity");
    let store = state.dispatch(ActivityAction::DeleteActivity { id }).await;
    Json(to_response(store))
}

pub async fn restart(State(state): State<AppState>) -> Json<StateResponse> {
    info!("restarting app");
    let store = state.dispatch(ActivityAction::RestartApp).await;
    Json(to_response(store))
}

/// Applies a raw tagged action, e.g. `{"type":"delete-activity","payload":{"id":"x"}}`.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(action): Json<ActivityAction>,
) -> Json<StateResponse> {
    let store = state.dispatch(action).await;
    Json(to_response(store))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<ChartData> {
    let store = state.snapshot().await;
    Json(build_series(&store.activities))
}

fn to_response(store: ActivityState) -> StateResponse {
    StateResponse {
        tracker: tracker(&store.activities),
        activities: store.activities,
        active_id: store.active_id,
    }
}
