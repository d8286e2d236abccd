use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route(
            "/api/activities/:id",
            put(handlers::update_activity).delete(handlers::delete_activity),
        )
        .route("/api/activities/:id/today", post(handlers::record_today))
        .route("/api/activities/:id/toggle", post(handlers::toggle_today))
        .route("/api/activities/:id/notes", post(handlers::save_notes))
        .route("/api/today", get(handlers::get_today))
        .route("/api/streaks", get(handlers::get_streaks))
        .route("/api/history", get(handlers::get_history))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/theme", get(handlers::get_theme).post(handlers::set_theme))
        .with_state(state)
}
