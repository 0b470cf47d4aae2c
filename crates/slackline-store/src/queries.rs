use chrono::{DateTime, Utc};
use slackline_types::models::{
    CharacterBudget, Channel, Delivery, MessageFilter, MessagePreview, ScheduledMessage, Stats,
    Status, UserSession,
};

use crate::{MessageStore, Result, StoreError, validated_body};

impl MessageStore {
    // -- Channels --

    pub fn list_channels(&self) -> &[Channel] {
        &self.channels
    }

    // -- Messages --

    /// Messages matching `filter`, latest `scheduled_at` first.
    pub fn query_messages(&self, filter: &MessageFilter) -> Vec<ScheduledMessage> {
        let mut found: Vec<ScheduledMessage> = self
            .messages
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        found
    }

    pub fn get_message(&self, id: &str) -> Result<&ScheduledMessage> {
        self.messages
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Most recently created messages, newest first.
    pub fn recent_activity(&self, limit: usize) -> Vec<ScheduledMessage> {
        let mut recent: Vec<ScheduledMessage> = self.messages.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        recent
    }

    /// Validate a compose form without creating anything.
    pub fn preview_message(
        &self,
        channel_id: &str,
        body: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<MessagePreview> {
        let channel = self
            .channel(channel_id)
            .ok_or_else(|| StoreError::Validation(format!("unknown channel: {}", channel_id)))?;
        validated_body(body)?;

        let character_count = body.chars().count();
        Ok(MessagePreview {
            channel_name: channel.name.clone(),
            body: body.to_string(),
            delivery: match scheduled_at {
                Some(at) => Delivery::Scheduled { at },
                None => Delivery::Immediate,
            },
            character_count,
            budget: CharacterBudget::for_length(character_count),
        })
    }

    // -- Session --

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    // -- Stats --

    pub fn stats(&self) -> Stats {
        self.stats_at(Utc::now())
    }

    /// Dashboard counters with "today" taken as the UTC calendar day of `now`.
    pub fn stats_at(&self, now: DateTime<Utc>) -> Stats {
        let today = now.date_naive();
        let current_pending = self
            .messages
            .iter()
            .filter(|m| m.status == Status::Pending)
            .count();
        let sent_today = self
            .messages
            .iter()
            .filter(|m| m.status == Status::Sent && m.created_at.date_naive() == today)
            .count();

        Stats {
            total_scheduled: self.total_scheduled,
            current_pending,
            sent_today,
            active_channels: self.channels.len(),
        }
    }
}
