use crate::{ContentId, PlanId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One entry in a user's watch history. Repeats are allowed; the sequence is
/// append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEvent {
    pub content_id: ContentId,
    pub watched_at: DateTime<Utc>,
}

/// An account: identity, subscription state, watchlist, and watch history.
///
/// The plan reference is mutated only through `CatalogService`, which owns
/// the subscription guards; `set_plan` is deliberately crate-private.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    id: crate::UserId,
    name: String,
    email: String,
    active: bool,
    plan: Option<PlanId>,
    watchlist: Vec<ContentId>,
    history: Vec<WatchEvent>,
}

impl User {
    pub fn new(id: crate::UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            active: true,
            plan: None,
            watchlist: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> crate::UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn plan(&self) -> Option<PlanId> {
        self.plan
    }

    /// Insertion-ordered watchlist, read-only.
    pub fn watchlist(&self) -> &[ContentId] {
        &self.watchlist
    }

    /// Append-only watch history, read-only.
    pub fn history(&self) -> &[WatchEvent] {
        &self.history
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Idempotent: a content id already on the list is left where it is.
    pub fn add_to_watchlist(&mut self, content_id: ContentId) {
        if self.watchlist.contains(&content_id) {
            trace!("user {}: content {} already on watchlist", self.id, content_id);
            return;
        }
        self.watchlist.push(content_id);
    }

    /// No-op when the id is absent.
    pub fn remove_from_watchlist(&mut self, content_id: ContentId) {
        self.watchlist.retain(|id| *id != content_id);
    }

    /// Unconditionally appends; repeat watches are part of the record.
    pub fn record_watch(&mut self, content_id: ContentId) {
        self.history.push(WatchEvent {
            content_id,
            watched_at: Utc::now(),
        });
    }

    pub(crate) fn set_plan(&mut self, plan: Option<PlanId>) {
        self.plan = plan;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_is_idempotent_and_ordered() {
        let mut user = User::new(1, "Alice", "alice@example.com");
        user.add_to_watchlist(10);
        user.add_to_watchlist(20);
        user.add_to_watchlist(10);
        assert_eq!(user.watchlist(), &[10, 20]);
    }

    #[test]
    fn test_remove_from_watchlist_absent_is_noop() {
        let mut user = User::new(1, "Alice", "alice@example.com");
        user.add_to_watchlist(10);
        user.remove_from_watchlist(99);
        assert_eq!(user.watchlist(), &[10]);
        user.remove_from_watchlist(10);
        assert!(user.watchlist().is_empty());
    }

    #[test]
    fn test_history_allows_repeats() {
        let mut user = User::new(1, "Alice", "alice@example.com");
        user.record_watch(10);
        user.record_watch(10);
        user.record_watch(20);
        let ids: Vec<_> = user.history().iter().map(|e| e.content_id).collect();
        assert_eq!(ids, vec![10, 10, 20]);
    }

    #[test]
    fn test_activation_toggles() {
        let mut user = User::new(1, "Alice", "alice@example.com");
        assert!(user.is_active());
        user.deactivate();
        assert!(!user.is_active());
        user.activate();
        assert!(user.is_active());
    }
}
