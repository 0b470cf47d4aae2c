use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MessageFilter, ScheduledMessage};

// -- Messages --

/// Compose form payload. Omitting `scheduled_at` sends immediately.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub channel_id: String,
    pub body: String,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMessageRequest {
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(flatten)]
    pub message: ScheduledMessage,
    pub editable: bool,
}

impl From<ScheduledMessage> for MessageResponse {
    fn from(message: ScheduledMessage) -> Self {
        let editable = message.is_editable();
        Self { message, editable }
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(default = "default_activity_limit")]
    pub limit: usize,
}

fn default_activity_limit() -> usize {
    3
}

// -- View --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionRequest {
    pub ids: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectAllRequest {
    pub selected: bool,
}

/// Scheduled-message table: current filter, the rows it yields, and the
/// checked row ids.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub filter: MessageFilter,
    pub messages: Vec<MessageResponse>,
    pub selected: Vec<String>,
}
