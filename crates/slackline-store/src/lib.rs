pub mod commands;
pub mod error;
pub mod fixture;
pub mod queries;
pub mod view;

use std::collections::BTreeSet;

use slackline_types::models::{Channel, MessageFilter, ScheduledMessage, UserSession};
use tracing::info;

pub use error::{Result, StoreError};

const ID_PREFIX: &str = "msg_";

/// In-memory owner of the workspace: channels, scheduled messages, the
/// signed-in session and the message table's filter/selection.
///
/// All operations are synchronous. Callers that share a store across threads
/// wrap it in a lock; a single call is always applied as a whole.
#[derive(Debug)]
pub struct MessageStore {
    channels: Vec<Channel>,
    messages: Vec<ScheduledMessage>,
    session: UserSession,
    next_id: u64,
    total_scheduled: u64,
    view: ViewState,
}

#[derive(Debug, Default)]
struct ViewState {
    filter: MessageFilter,
    selection: BTreeSet<String>,
}

impl MessageStore {
    pub fn new(channels: Vec<Channel>, session: UserSession) -> Self {
        info!(
            "Message store ready with {} channels for workspace {}",
            channels.len(),
            session.workspace_name
        );
        Self {
            channels,
            messages: Vec::new(),
            session,
            next_id: 1,
            total_scheduled: 0,
            view: ViewState::default(),
        }
    }

    /// The demo workspace with its seeded messages.
    pub fn with_fixture() -> Result<Self> {
        fixture::load(true)
    }

    /// Insert a pre-built message, e.g. from a fixture.
    ///
    /// Every seeded message counts towards the lifetime scheduled total,
    /// whatever its status: seeded rows always carry a schedule, so a seed
    /// that is already `sent` or `cancelled` was once scheduled. Ids of the
    /// form `msg_<n>` push the id counter past `n`; an `n` with no successor
    /// is rejected.
    pub fn seed_message(&mut self, message: ScheduledMessage) -> Result<()> {
        if self.channel(&message.channel.id).is_none() {
            return Err(StoreError::Validation(format!(
                "unknown channel: {}",
                message.channel.id
            )));
        }
        if self.position(&message.id).is_some() {
            return Err(StoreError::Validation(format!(
                "duplicate message id: {}",
                message.id
            )));
        }

        if let Some(n) = message
            .id
            .strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
        {
            let after = n.checked_add(1).ok_or_else(|| {
                StoreError::Validation(format!("message id out of range: {}", message.id))
            })?;
            self.next_id = self.next_id.max(after);
        }

        self.total_scheduled += 1;
        self.messages.push(message);
        Ok(())
    }

    fn next_message_id(&mut self) -> Result<String> {
        let id = format!("{}{:03}", ID_PREFIX, self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Validation("message ids exhausted".to_string()))?;
        Ok(id)
    }

    fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    fn message_mut(&mut self, id: &str) -> Result<&mut ScheduledMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Trim the body and reject it if nothing is left.
fn validated_body(body: &str) -> Result<String> {
    let body = body.trim();
    if body.is_empty() {
        return Err(StoreError::Validation("message body is empty".into()));
    }
    Ok(body.to_string())
}


#[cfg(test)]
mod tests {
    use super::test_support::{store, ts};
    use super::*;
    use slackline_types::models::Status;

    fn seeded(id: &str, channel_id: &str) -> ScheduledMessage {
        ScheduledMessage {
            id: id.into(),
            channel: slackline_types::models::ChannelRef {
                id: channel_id.into(),
                name: "general".into(),
            },
            body: "seeded".into(),
            scheduled_at: ts("2025-08-11T14:00:00Z"),
            status: Status::Pending,
            created_at: ts("2025-08-10T09:00:00Z"),
            author: "Someone".into(),
        }
    }

    #[test]
    fn seeding_advances_id_counter() {
        let mut store = store();
        store.seed_message(seeded("msg_041", "C1")).unwrap();

        let created = store.create_message("C1", "hello", None).unwrap();
        assert_eq!(created.id, "msg_042");
    }

    #[test]
    fn seeding_rejects_duplicates_and_unknown_channels() {
        let mut store = store();
        store.seed_message(seeded("msg_001", "C1")).unwrap();

        let err = store.seed_message(seeded("msg_001", "C1")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store.seed_message(seeded("msg_002", "C9")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn seeding_rejects_id_at_counter_limit() {
        let mut store = store();
        let last = format!("msg_{}", u64::MAX);
        let err = store.seed_message(seeded(&last, "C1")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.get_message(&last).is_err());
        assert_eq!(store.stats().total_scheduled, 0);

        let created = store.create_message("C1", "hello", None).unwrap();
        assert_eq!(created.id, "msg_001");
    }

    #[test]
    fn creating_past_the_last_id_fails_cleanly() {
        let mut store = store();
        store.seed_message(seeded(&format!("msg_{}", u64::MAX - 2), "C1")).unwrap();

        let last = store.create_message("C1", "last", None).unwrap();
        assert_eq!(last.id, format!("msg_{}", u64::MAX - 1));

        let err = store.create_message("C1", "one too many", None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.query_messages(&Default::default()).len(), 2);
    }

    #[test]
    fn seeded_messages_count_as_scheduled_whatever_their_status() {
        let mut store = store();
        store.seed_message(seeded("msg_001", "C1")).unwrap();
        store
            .seed_message(ScheduledMessage { status: Status::Sent, ..seeded("msg_002", "C1") })
            .unwrap();
        store
            .seed_message(ScheduledMessage { status: Status::Cancelled, ..seeded("msg_003", "C1") })
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_scheduled, 3);
        assert_eq!(stats.current_pending, 1);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = store();
        let first = store.create_message("C1", "one", None).unwrap();
        store.delete_message(&first.id).unwrap();

        let second = store.create_message("C1", "two", None).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn body_is_trimmed() {
        assert_eq!(validated_body("  hi \n").unwrap(), "hi");
        assert!(validated_body(" \t ").is_err());
    }
}
