use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::info;

use slackline_types::api::{ActivityQuery, MessageResponse};

use crate::error::ApiError;
use crate::state::AppState;

const MAX_ACTIVITY: usize = 50;

pub async fn list_channels(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let channels = state.apply(|store| store.list_channels().to_vec())?;
    Ok(Json(channels))
}

pub async fn get_session(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let session = state.apply(|store| store.session().clone())?;
    Ok(Json(session))
}

/// Stand-in for the OAuth round trip: flips the session back to connected.
pub async fn connect(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    set_connected(state, true)
}

pub async fn disconnect(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    set_connected(state, false)
}

fn set_connected(state: AppState, connected: bool) -> Result<impl IntoResponse, ApiError> {
    let session = state.apply(|store| {
        store.set_connection_state(connected);
        store.session().clone()
    })?;
    info!(
        "Workspace {} is now {}",
        session.workspace_name,
        if connected { "connected" } else { "disconnected" }
    );
    Ok(Json(session))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.apply(|store| store.stats())?;
    Ok(Json(stats))
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.min(MAX_ACTIVITY);
    let recent = state.apply(|store| store.recent_activity(limit))?;
    Ok(Json(
        recent
            .into_iter()
            .map(MessageResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
