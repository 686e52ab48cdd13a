//! Bounded per-user conversation history.
//!
//! Caller-owned store, passed by reference into the chat endpoint.
//! Three bounds keep it from growing without limit: a turn cap per
//! user, a user cap across the store, and an idle TTL per user.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One exchange half in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

struct UserHistory {
    turns: VecDeque<Turn>,
    last_seen: DateTime<Utc>,
}

/// In-memory history keyed by user id
pub struct HistoryStore {
    users: HashMap<String, UserHistory>,
    max_turns: usize,
    max_users: usize,
    ttl: Duration,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(20, 256, Duration::minutes(30))
    }
}

impl HistoryStore {
    pub fn new(max_turns: usize, max_users: usize, ttl: Duration) -> Self {
        Self {
            users: HashMap::new(),
            max_turns,
            max_users,
            ttl,
        }
    }

    /// Record a turn for a user at the current time
    pub fn record(&mut self, user: &str, turn: Turn) {
        self.record_at(user, turn, Utc::now());
    }

    /// Record a turn at an explicit instant.
    ///
    /// Expired users are swept first; if the store is still over its
    /// user cap after the insert, the longest-idle user is evicted.
    pub fn record_at(&mut self, user: &str, turn: Turn, now: DateTime<Utc>) {
        self.sweep_expired(now);

        let entry = self.users.entry(user.to_string()).or_insert_with(|| UserHistory {
            turns: VecDeque::new(),
            last_seen: now,
        });
        entry.last_seen = now;
        entry.turns.push_back(turn);
        while entry.turns.len() > self.max_turns {
            entry.turns.pop_front();
        }

        while self.users.len() > self.max_users {
            let Some(stalest) = self
                .users
                .iter()
                .min_by_key(|(_, h)| h.last_seen)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            debug!(user = %stalest, "evicting longest-idle conversation");
            self.users.remove(&stalest);
        }
    }

    /// Recent turns for a user, oldest first
    pub fn recent(&self, user: &str) -> Vec<Turn> {
        self.recent_at(user, Utc::now())
    }

    /// Recent turns at an explicit instant; expired history reads empty
    pub fn recent_at(&self, user: &str, now: DateTime<Utc>) -> Vec<Turn> {
        match self.users.get(user) {
            Some(h) if now - h.last_seen <= self.ttl => h.turns.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn sweep_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.users.retain(|_, h| now - h.last_seen <= ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_records_in_order() {
        let mut store = HistoryStore::default();
        store.record_at("u1", Turn::user("hi"), t0());
        store.record_at("u1", Turn::assistant("hello"), t0());

        let turns = store.recent_at("u1", t0());
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[1].content, "hello");
    }

    #[test]
    fn test_turn_cap_drops_oldest() {
        let mut store = HistoryStore::new(3, 256, Duration::minutes(30));
        for i in 0..5 {
            store.record_at("u1", Turn::user(format!("m{i}")), t0());
        }

        let turns = store.recent_at("u1", t0());
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "m2");
        assert_eq!(turns[2].content, "m4");
    }

    #[test]
    fn test_ttl_expires_idle_history() {
        let mut store = HistoryStore::default();
        store.record_at("u1", Turn::user("hi"), t0());

        let later = t0() + Duration::minutes(31);
        assert!(store.recent_at("u1", later).is_empty());

        // A fresh write after expiry starts over.
        store.record_at("u1", Turn::user("back"), later);
        let turns = store.recent_at("u1", later);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "back");
    }

    #[test]
    fn test_user_cap_evicts_longest_idle() {
        let mut store = HistoryStore::new(20, 2, Duration::minutes(30));
        store.record_at("a", Turn::user("1"), t0());
        store.record_at("b", Turn::user("2"), t0() + Duration::seconds(1));
        store.record_at("c", Turn::user("3"), t0() + Duration::seconds(2));

        assert_eq!(store.len(), 2);
        assert!(store.recent_at("a", t0() + Duration::seconds(2)).is_empty());
        assert!(!store.recent_at("c", t0() + Duration::seconds(2)).is_empty());
    }

    #[test]
    fn test_unknown_user_reads_empty() {
        let store = HistoryStore::default();
        assert!(store.recent_at("nobody", t0()).is_empty());
        assert!(store.is_empty());
    }
}
