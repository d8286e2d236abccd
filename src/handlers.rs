use crate::clock::date_key;
use crate::errors::AppError;
use crate::models::{
    Activity, ActivityForm, ActivityHistory, ActivityId, DayRecord, NotesRequest, RecordRequest,
    StatsResponse, StreakSummary, TodayResponse,
};
use crate::state::AppState;
use crate::stats::{build_stats_at, history, streak_summaries, today_entries};
use crate::theme::{ThemeSetting, load_theme, save_theme};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let theme = load_theme(store.storage());
    Html(render_index(&date_key(store.today()), theme))
}

pub async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    let mut store = state.store.lock().await;
    store.refresh_streaks();
    Json(store.activities().to_vec())
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(form): Json<ActivityForm>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let mut store = state.store.lock().await;
    let activity = store.create(&form.name, form.kind, form.policy, form.goal)?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    Json(form): Json<ActivityForm>,
) -> Result<Json<Activity>, AppError> {
    let mut store = state.store.lock().await;
    let activity = store.update(id, &form.name, form.kind, form.policy, form.goal)?;
    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Seeds and persists a default record for every activity missing one today,
/// so viewing the page alone starts a `CountIfNotDone` streak day.
pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.ensure_today()?;
    let today = store.today();
    Ok(Json(TodayResponse {
        date: date_key(today),
        entries: today_entries(today, store.activities()),
    }))
}

pub async fn record_today(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<DayRecord>, AppError> {
    let mut store = state.store.lock().await;
    let record = store.record_today(id, payload.value, &payload.notes)?;
    Ok(Json(record))
}

pub async fn toggle_today(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    Json(payload): Json<NotesRequest>,
) -> Result<Json<DayRecord>, AppError> {
    let mut store = state.store.lock().await;
    let record = store.toggle_today(id, &payload.notes)?;
    Ok(Json(record))
}

pub async fn save_notes(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    Json(payload): Json<NotesRequest>,
) -> Result<Json<DayRecord>, AppError> {
    let mut store = state.store.lock().await;
    let record = store.set_today_notes(id, &payload.notes)?;
    Ok(Json(record))
}

pub async fn get_streaks(State(state): State<AppState>) -> Json<Vec<StreakSummary>> {
    let mut store = state.store.lock().await;
    store.refresh_streaks();
    Json(streak_summaries(store.activities()))
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<ActivityHistory>> {
    let store = state.store.lock().await;
    Json(history(store.activities()))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.lock().await;
    Json(build_stats_at(store.today(), store.activities()))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeSetting> {
    let store = state.store.lock().await;
    Json(ThemeSetting {
        theme: load_theme(store.storage()),
    })
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(setting): Json<ThemeSetting>,
) -> Result<Json<ThemeSetting>, AppError> {
    let mut store = state.store.lock().await;
    save_theme(store.storage_mut(), setting.theme)?;
    Ok(Json(setting))
}
