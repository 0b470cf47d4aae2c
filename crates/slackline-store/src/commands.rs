use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use slackline_types::models::{BulkDeleteOutcome, BulkOutcome, ScheduledMessage, Status};
use tracing::debug;

use crate::{MessageStore, Result, StoreError, validated_body};

impl MessageStore {
    // -- Messages --

    /// Create a message. Without `scheduled_at` it is sent right away;
    /// otherwise it is queued as pending.
    pub fn create_message(
        &mut self,
        channel_id: &str,
        body: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<ScheduledMessage> {
        self.create_message_at(channel_id, body, scheduled_at, Utc::now())
    }

    pub(crate) fn create_message_at(
        &mut self,
        channel_id: &str,
        body: &str,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<ScheduledMessage> {
        let channel = self
            .channel(channel_id)
            .ok_or_else(|| StoreError::Validation(format!("unknown channel: {}", channel_id)))?
            .to_ref();
        let body = validated_body(body)?;
        let id = self.next_message_id()?;

        let (status, scheduled_at) = match scheduled_at {
            Some(at) => (Status::Pending, at),
            None => (Status::Sent, now),
        };

        let message = ScheduledMessage {
            id,
            channel,
            body,
            scheduled_at,
            status,
            created_at: now,
            author: self.session.name.clone(),
        };

        if status == Status::Pending {
            self.total_scheduled += 1;
        }
        debug!(
            "Created {} message {} for #{}",
            status, message.id, message.channel.name
        );

        self.messages.push(message.clone());
        self.prune_selection();
        Ok(message)
    }

    /// Replace body and schedule of a pending message.
    pub fn update_message(
        &mut self,
        id: &str,
        body: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledMessage> {
        let message = self.message_mut(id)?;
        if !message.is_editable() {
            return Err(StoreError::InvalidState {
                id: id.to_string(),
                status: message.status,
                action: "edit",
            });
        }
        let body = validated_body(body)?;

        message.body = body;
        message.scheduled_at = scheduled_at;
        let updated = message.clone();

        debug!("Updated message {}", id);
        self.prune_selection();
        Ok(updated)
    }

    /// Move a pending message to `sent` or `cancelled`.
    pub fn transition_status(&mut self, id: &str, to: Status) -> Result<ScheduledMessage> {
        let message = self.message_mut(id)?;
        let action = match to {
            Status::Sent => "send",
            Status::Cancelled => "cancel",
            Status::Pending => "reopen",
        };
        if message.status.is_terminal() || to == Status::Pending {
            return Err(StoreError::InvalidState {
                id: id.to_string(),
                status: message.status,
                action,
            });
        }

        message.status = to;
        let updated = message.clone();

        debug!("Message {} is now {}", id, to);
        self.prune_selection();
        Ok(updated)
    }

    /// Remove a message whatever its status.
    pub fn delete_message(&mut self, id: &str) -> Result<()> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.messages.remove(idx);

        debug!("Deleted message {}", id);
        self.prune_selection();
        Ok(())
    }

    /// Apply `transition_status` to every id. Ids that are missing or no
    /// longer pending are skipped; the batch itself never fails.
    pub fn bulk_transition<I, S>(&mut self, ids: I, to: Status) -> BulkOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();

        let mut outcome = BulkOutcome::default();
        for id in &ids {
            match self.transition_status(id, to) {
                Ok(_) => outcome.succeeded += 1,
                Err(e) => {
                    debug!("Bulk {}: skipping {}", to, e);
                    outcome.skipped += 1;
                }
            }
        }
        outcome
    }

    /// Remove every listed message that exists. Missing ids are not counted.
    pub fn bulk_delete<I, S>(&mut self, ids: I) -> BulkDeleteOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();

        let before = self.messages.len();
        self.messages.retain(|m| !ids.contains(&m.id));
        let deleted_count = before - self.messages.len();

        debug!("Bulk delete removed {} of {} requested", deleted_count, ids.len());
        self.prune_selection();
        BulkDeleteOutcome { deleted_count }
    }

    // -- Session --

    pub fn set_connection_state(&mut self, connected: bool) {
        self.session.connected = connected;
        debug!(
            "Workspace {} {}",
            self.session.workspace_name,
            if connected { "connected" } else { "disconnected" }
        );
    }
}
