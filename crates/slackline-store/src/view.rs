//! Filter and checkbox selection of the scheduled-message table.
//!
//! The selection only ever holds ids that the current filter shows. Changing
//! the filter or running a bulk action over the selection clears it, and every
//! mutation drops ids that fell out of view.

use slackline_types::models::{
    BulkDeleteOutcome, BulkOutcome, MessageFilter, ScheduledMessage, Status,
};
use tracing::debug;

use crate::{MessageStore, Result, StoreError};

impl MessageStore {
    pub fn view_filter(&self) -> &MessageFilter {
        &self.view.filter
    }

    /// Replace the table filter. Clears the selection.
    pub fn set_view_filter(&mut self, filter: MessageFilter) {
        self.view.filter = filter.normalized();
        self.view.selection.clear();
    }

    pub fn visible_messages(&self) -> Vec<ScheduledMessage> {
        self.query_messages(&self.view.filter)
    }

    /// Selected ids in ascending order.
    pub fn selection(&self) -> Vec<String> {
        self.view.selection.iter().cloned().collect()
    }

    /// Check a row. The id must be visible under the current filter.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.is_visible(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.view.selection.insert(id.to_string());
        Ok(())
    }

    /// Check several rows at once. Either every id is visible and all of them
    /// get selected, or the first hidden id is reported and nothing changes.
    pub fn select_many<I, S>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        if let Some(hidden) = ids.iter().find(|id| !self.is_visible(id)) {
            return Err(StoreError::NotFound(hidden.clone()));
        }
        self.view.selection.extend(ids);
        Ok(())
    }

    pub fn deselect(&mut self, id: &str) {
        self.view.selection.remove(id);
    }

    pub fn select_all_visible(&mut self) {
        let visible: Vec<String> = self
            .messages
            .iter()
            .filter(|m| self.view.filter.matches(m))
            .map(|m| m.id.clone())
            .collect();
        self.view.selection.extend(visible);
    }

    pub fn clear_selection(&mut self) {
        self.view.selection.clear();
    }

    /// Cancel every selected pending message, then clear the selection.
    pub fn cancel_selected(&mut self) -> BulkOutcome {
        let ids = std::mem::take(&mut self.view.selection);
        let outcome = self.bulk_transition(&ids, Status::Cancelled);
        self.view.selection.clear();
        debug!(
            "Cancelled {} selected messages, skipped {}",
            outcome.succeeded, outcome.skipped
        );
        outcome
    }

    /// Delete every selected message, then clear the selection.
    pub fn delete_selected(&mut self) -> BulkDeleteOutcome {
        let ids = std::mem::take(&mut self.view.selection);
        let outcome = self.bulk_delete(&ids);
        self.view.selection.clear();
        outcome
    }

    fn is_visible(&self, id: &str) -> bool {
        self.messages
            .iter()
            .any(|m| m.id == id && self.view.filter.matches(m))
    }

    /// Drop selected ids that no longer exist or no longer match the filter.
    pub(crate) fn prune_selection(&mut self) {
        if self.view.selection.is_empty() {
            return;
        }
        let filter = &self.view.filter;
        let messages = &self.messages;
        self.view.selection.retain(|id| {
            messages
                .iter()
                .any(|m| &m.id == id && filter.matches(m))
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::StoreError;
    use crate::test_support::{store, ts};
    use slackline_types::models::{MessageFilter, Status};

    fn pending_filter() -> MessageFilter {
        MessageFilter { status: Some(Status::Pending), ..Default::default() }
    }

    #[test]
    fn filter_change_clears_selection() {
        let mut store = store();
        let msg = store.create_message("C1", "hello", None).unwrap();
        store.select(&msg.id).unwrap();
        assert_eq!(store.selection(), vec![msg.id.clone()]);

        store.set_view_filter(MessageFilter { search: Some("hello".into()), ..Default::default() });
        assert!(store.selection().is_empty());
    }

    #[test]
    fn cannot_select_hidden_rows() {
        let mut store = store();
        let sent = store.create_message("C1", "sent", None).unwrap();
        store.set_view_filter(pending_filter());

        assert_eq!(store.select(&sent.id).unwrap_err(), StoreError::NotFound(sent.id.clone()));
        assert_eq!(
            store.select("msg_404").unwrap_err(),
            StoreError::NotFound("msg_404".into())
        );
    }

    #[test]
    fn select_many_is_all_or_nothing() {
        let mut store = store();
        let a = store.create_message("C1", "a", Some(ts("2025-08-11T14:00:00Z"))).unwrap();
        let b = store.create_message("C1", "b", Some(ts("2025-08-12T14:00:00Z"))).unwrap();
        let sent = store.create_message("C1", "sent", None).unwrap();
        store.set_view_filter(pending_filter());

        let err = store.select_many([&a.id, &sent.id, &b.id]).unwrap_err();
        assert_eq!(err, StoreError::NotFound(sent.id.clone()));
        assert!(store.selection().is_empty());

        store.select_many([&b.id, &a.id]).unwrap();
        assert_eq!(store.selection(), vec![a.id, b.id]);
    }

    #[test]
    fn select_all_only_takes_visible_rows() {
        let mut store = store();
        let a = store.create_message("C1", "a", Some(ts("2025-08-11T14:00:00Z"))).unwrap();
        let b = store.create_message("C2", "b", Some(ts("2025-08-12T14:00:00Z"))).unwrap();
        store.create_message("C1", "c", None).unwrap();

        store.set_view_filter(pending_filter());
        store.select_all_visible();
        assert_eq!(store.selection(), vec![a.id.clone(), b.id.clone()]);

        store.deselect(&a.id);
        assert_eq!(store.selection(), vec![b.id]);

        store.clear_selection();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn cancelled_rows_fall_out_of_pending_selection() {
        let mut store = store();
        let a = store.create_message("C1", "a", Some(ts("2025-08-11T14:00:00Z"))).unwrap();
        let b = store.create_message("C1", "b", Some(ts("2025-08-12T14:00:00Z"))).unwrap();
        store.set_view_filter(pending_filter());
        store.select_all_visible();

        store.transition_status(&a.id, Status::Cancelled).unwrap();
        assert_eq!(store.selection(), vec![b.id.clone()]);
        assert_eq!(store.visible_messages().len(), 1);

        store.delete_message(&b.id).unwrap();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn bulk_actions_on_selection_clear_it() {
        let mut store = store();
        let a = store.create_message("C1", "a", Some(ts("2025-08-11T14:00:00Z"))).unwrap();
        let b = store.create_message("C1", "b", None).unwrap();
        store.select_all_visible();

        let outcome = store.cancel_selected();
        assert_eq!((outcome.succeeded, outcome.skipped), (1, 1));
        assert!(store.selection().is_empty());
        assert_eq!(store.get_message(&a.id).unwrap().status, Status::Cancelled);

        store.select(&a.id).unwrap();
        store.select(&b.id).unwrap();
        let outcome = store.delete_selected();
        assert_eq!(outcome.deleted_count, 2);
        assert!(store.selection().is_empty());
        assert!(store.visible_messages().is_empty());
    }
}
