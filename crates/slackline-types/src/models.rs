use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub visibility: Visibility,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visibility,
        }
    }

    /// Snapshot of this channel as carried by a message.
    pub fn to_ref(&self) -> ChannelRef {
        ChannelRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: String,
    pub name: String,
}

/// Lifecycle of a scheduled message. `Sent` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Sent,
    Cancelled,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Sent => "sent",
            Status::Cancelled => "cancelled",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "sent" => Ok(Status::Sent),
            "cancelled" => Ok(Status::Cancelled),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub id: String,
    pub channel: ChannelRef,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

impl ScheduledMessage {
    /// Only pending messages may be edited, sent or cancelled.
    pub fn is_editable(&self) -> bool {
        self.status == Status::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub name: String,
    pub email: String,
    pub workspace_name: String,
    pub connected: bool,
    pub permissions: BTreeSet<String>,
    pub token_expiry: DateTime<Utc>,
}

/// Dashboard counters.
///
/// `total_scheduled` is a lifetime counter: it is bumped whenever a message
/// with a schedule is created and never decremented. Everything else is
/// derived from the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_scheduled: u64,
    pub current_pending: usize,
    pub sent_today: usize,
    pub active_channels: usize,
}

/// Table filter. Every field that is set must match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageFilter {
    pub search: Option<String>,
    pub channel: Option<String>,
    #[serde(deserialize_with = "status_or_all")]
    pub status: Option<Status>,
}

/// `""` means "all statuses", same as a missing value.
fn status_or_all<'de, D>(deserializer: D) -> Result<Option<Status>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl MessageFilter {
    /// Drop empty search/channel values; the UI uses "" for "all".
    pub fn normalized(mut self) -> Self {
        self.search = self.search.filter(|s| !s.trim().is_empty());
        self.channel = self.channel.filter(|s| !s.is_empty());
        self
    }

    pub fn matches(&self, message: &ScheduledMessage) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = message.body.to_lowercase().contains(&term)
                || message.channel.name.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(channel) = &self.channel {
            if &message.channel.name != channel {
                return false;
            }
        }
        if let Some(status) = self.status {
            if message.status != status {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterBudget {
    Normal,
    Warning,
    Critical,
}

impl CharacterBudget {
    pub const WARNING_ABOVE: usize = 3800;
    pub const CRITICAL_ABOVE: usize = 3900;

    pub fn for_length(chars: usize) -> Self {
        if chars > Self::CRITICAL_ABOVE {
            CharacterBudget::Critical
        } else if chars > Self::WARNING_ABOVE {
            CharacterBudget::Warning
        } else {
            CharacterBudget::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Delivery {
    Immediate,
    Scheduled { at: DateTime<Utc> },
}

/// What a message would look like if submitted now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePreview {
    pub channel_name: String,
    pub body: String,
    pub delivery: Delivery,
    pub character_count: usize,
    pub budget: CharacterBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkDeleteOutcome {
    pub deleted_count: usize,
}
