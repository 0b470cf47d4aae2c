use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use slackline_store::{MessageStore, Result as StoreResult};
use slackline_types::api::{MessageResponse, SelectAllRequest, SelectionRequest, ViewResponse};
use slackline_types::models::MessageFilter;

use crate::error::ApiError;
use crate::state::AppState;

fn snapshot(store: &MessageStore) -> ViewResponse {
    ViewResponse {
        filter: store.view_filter().clone(),
        messages: store
            .visible_messages()
            .into_iter()
            .map(MessageResponse::from)
            .collect(),
        selected: store.selection(),
    }
}

pub async fn get_view(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let view = state.apply(|store| snapshot(store))?;
    Ok(Json(view))
}

pub async fn set_filter(
    State(state): State<AppState>,
    Json(filter): Json<MessageFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.apply(|store| {
        store.set_view_filter(filter);
        snapshot(store)
    })?;
    Ok(Json(view))
}

/// Check or uncheck rows. Checking fails with 404 and leaves the selection
/// untouched if any id is not visible.
pub async fn set_selection(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.with_store(|store| {
        if req.selected {
            store.select_many(&req.ids)?;
        } else {
            req.ids.iter().for_each(|id| store.deselect(id));
        }
        StoreResult::Ok(snapshot(store))
    })?;
    Ok(Json(view))
}

pub async fn select_all(
    State(state): State<AppState>,
    Json(req): Json<SelectAllRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.apply(|store| {
        if req.selected {
            store.select_all_visible();
        } else {
            store.clear_selection();
        }
        snapshot(store)
    })?;
    Ok(Json(view))
}

pub async fn cancel_selected(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.apply(|store| store.cancel_selected())?;
    Ok(Json(outcome))
}

pub async fn delete_selected(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.apply(|store| store.delete_selected())?;
    Ok(Json(outcome))
}
