use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use slackline_types::api::{
    BulkRequest, CreateMessageRequest, MessageResponse, UpdateMessageRequest,
};
use slackline_types::models::{MessageFilter, Status};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /messages` query string. Empty values mean "any".
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub search: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
}

impl MessageQuery {
    pub fn into_filter(self) -> Result<MessageFilter, ApiError> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Status>().map_err(|message| ApiError {
                status: StatusCode::BAD_REQUEST,
                message,
            })?),
        };
        Ok(MessageFilter {
            search: self.search,
            channel: self.channel,
            status,
        }
        .normalized())
    }
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.into_filter()?;
    let messages = state.apply(|store| store.query_messages(&filter))?;
    Ok(Json(
        messages
            .into_iter()
            .map(MessageResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.with_store(|store| store.get_message(&message_id).cloned())?;
    Ok(Json(MessageResponse::from(message)))
}

pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.with_store(|store| {
        store.create_message(&req.channel_id, &req.body, req.scheduled_at)
    })?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

pub async fn preview_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let preview = state.with_store(|store| {
        store.preview_message(&req.channel_id, &req.body, req.scheduled_at)
    })?;
    Ok(Json(preview))
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.with_store(|store| {
        store.update_message(&message_id, &req.body, req.scheduled_at)
    })?;
    Ok(Json(MessageResponse::from(message)))
}

pub async fn cancel_message(
    state: State<AppState>,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, path, Status::Cancelled).await
}

pub async fn send_message(
    state: State<AppState>,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, path, Status::Sent).await
}

async fn transition(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    to: Status,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.with_store(|store| store.transition_status(&message_id, to))?;
    Ok(Json(MessageResponse::from(message)))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.with_store(|store| store.delete_message(&message_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_cancel(
    State(state): State<AppState>,
    Json(req): Json<BulkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.apply(|store| store.bulk_transition(&req.ids, Status::Cancelled))?;
    Ok(Json(outcome))
}

pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(req): Json<BulkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.apply(|store| store.bulk_delete(&req.ids))?;
    Ok(Json(outcome))
}
