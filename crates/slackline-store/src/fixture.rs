use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use slackline_types::models::{Channel, ScheduledMessage, Status, UserSession, Visibility};
use tracing::info;

use crate::{MessageStore, Result, StoreError};

const CHANNELS: &[(&str, &str, Visibility)] = &[
    ("C1234567890", "general", Visibility::Public),
    ("C2345678901", "random", Visibility::Public),
    ("C3456789012", "dev-team", Visibility::Private),
    ("C4567890123", "marketing", Visibility::Public),
    ("C5678901234", "support", Visibility::Public),
];

struct SeedMessage {
    id: &'static str,
    channel_id: &'static str,
    body: &'static str,
    scheduled_at: &'static str,
    status: Status,
    created_at: &'static str,
    author: &'static str,
}

const MESSAGES: &[SeedMessage] = &[
    SeedMessage {
        id: "msg_001",
        channel_id: "C1234567890",
        body: "Don't forget about the team meeting tomorrow at 2 PM! We'll be discussing Q1 goals and project updates.",
        scheduled_at: "2025-08-11T14:00:00Z",
        status: Status::Pending,
        created_at: "2025-08-10T09:15:00Z",
        author: "John Doe",
    },
    SeedMessage {
        id: "msg_002",
        channel_id: "C3456789012",
        body: "Weekly deployment is scheduled for tonight. Please ensure all PRs are merged by 5 PM.",
        scheduled_at: "2025-08-10T22:00:00Z",
        status: Status::Sent,
        created_at: "2025-08-10T08:30:00Z",
        author: "Sarah Smith",
    },
    SeedMessage {
        id: "msg_003",
        channel_id: "C4567890123",
        body: "Campaign launch reminder: All assets should be uploaded to the shared drive by Monday morning.",
        scheduled_at: "2025-08-12T09:00:00Z",
        status: Status::Pending,
        created_at: "2025-08-09T16:45:00Z",
        author: "Mike Johnson",
    },
    SeedMessage {
        id: "msg_004",
        channel_id: "C5678901234",
        body: "Weekend on-call rotation starts Friday. Check the schedule and be prepared for any critical issues.",
        scheduled_at: "2025-08-15T18:00:00Z",
        status: Status::Pending,
        created_at: "2025-08-10T11:20:00Z",
        author: "Lisa Chen",
    },
];

const PERMISSIONS: &[&str] = &["channels:read", "chat:write", "chat:write.public"];

/// Build the demo workspace. With `seed_messages` false the channels and
/// session are loaded but the message table starts empty.
pub fn load(seed_messages: bool) -> Result<MessageStore> {
    let channels = CHANNELS
        .iter()
        .map(|&(id, name, visibility)| Channel::new(id, name, visibility))
        .collect();

    let session = UserSession {
        name: "Demo User".into(),
        email: "demo@company.com".into(),
        workspace_name: "Company Workspace".into(),
        connected: true,
        permissions: PERMISSIONS.iter().map(|p| p.to_string()).collect::<BTreeSet<_>>(),
        token_expiry: timestamp("2025-08-17T10:49:00Z")?,
    };

    let mut store = MessageStore::new(channels, session);
    if !seed_messages {
        return Ok(store);
    }

    for seed in MESSAGES {
        let channel = store
            .channel(seed.channel_id)
            .ok_or_else(|| StoreError::Validation(format!("unknown channel: {}", seed.channel_id)))?
            .to_ref();
        store.seed_message(ScheduledMessage {
            id: seed.id.to_string(),
            channel,
            body: seed.body.to_string(),
            scheduled_at: timestamp(seed.scheduled_at)?,
            status: seed.status,
            created_at: timestamp(seed.created_at)?,
            author: seed.author.to_string(),
        })?;
    }

    info!("Seeded {} demo messages", MESSAGES.len());
    Ok(store)
}

fn timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| StoreError::Validation(format!("bad timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slackline_types::models::MessageFilter;

    #[test]
    fn demo_workspace_loads() {
        let store = MessageStore::with_fixture().unwrap();
        assert_eq!(store.list_channels().len(), 5);
        assert_eq!(store.list_channels()[2].visibility, Visibility::Private);
        assert_eq!(store.query_messages(&MessageFilter::default()).len(), 4);
        assert_eq!(store.session().name, "Demo User");
        assert!(store.session().permissions.contains("chat:write.public"));

        let stats = store.stats();
        assert_eq!(stats.total_scheduled, 4);
        assert_eq!(stats.current_pending, 3);
        assert_eq!(stats.active_channels, 5);
    }

    #[test]
    fn generated_ids_follow_seeded_ones() {
        let mut store = MessageStore::with_fixture().unwrap();
        let msg = store.create_message("C2345678901", "hi", None).unwrap();
        assert_eq!(msg.id, "msg_005");
    }

    #[test]
    fn meeting_search_hits_seeded_message() {
        let store = MessageStore::with_fixture().unwrap();
        let filter = MessageFilter { search: Some("MEETING".into()), ..Default::default() };
        let found = store.query_messages(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "msg_001");
    }

    #[test]
    fn empty_fixture_has_no_messages() {
        let store = load(false).unwrap();
        assert_eq!(store.list_channels().len(), 5);
        assert!(store.query_messages(&MessageFilter::default()).is_empty());
    }
}
