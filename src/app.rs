use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/categories", get(handlers::get_categories))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::save_activity),
        )
        .route("/api/activities/:id", delete(handlers::delete_activity))
        .route("/api/activities/:id/edit", post(handlers::edit_activity))
        .route("/api/edit", get(handlers::get_editing))
        .route("/api/restart", post(handlers::restart))
        .route("/api/dispatch", post(handlers::dispatch))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
