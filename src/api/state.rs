//! Shared state behind the HTTP API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::config::EngineConfig;
use crate::engine::ActivityTracker;
use crate::models::WorkItemCounts;

/// One user session: its activity tracker and the counts it last evaluated.
#[derive(Debug)]
pub struct Session {
    pub tracker: ActivityTracker,
    last_counts: Mutex<WorkItemCounts>,
    last_seen: Mutex<DateTime<Utc>>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            tracker: ActivityTracker::new(now),
            last_counts: Mutex::new(WorkItemCounts::default()),
            last_seen: Mutex::new(now),
        }
    }

    /// Mark the session as used at `now`. Any request counts, not only
    /// recorded activity.
    pub fn touch(&self, now: DateTime<Utc>) {
        let mut last_seen = self.last_seen.lock().expect("session lock poisoned");
        if now > *last_seen {
            *last_seen = now;
        }
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        *self.last_seen.lock().expect("session lock poisoned")
    }

    pub fn last_counts(&self) -> WorkItemCounts {
        *self.last_counts.lock().expect("session lock poisoned")
    }

    pub fn set_last_counts(&self, counts: WorkItemCounts) {
        *self.last_counts.lock().expect("session lock poisoned") = counts;
    }
}

/// In-memory registry of live sessions.
///
/// A session starts on first use and lives until it is ended explicitly or
/// swept by [`SessionRegistry::cleanup`] after going unused; nothing here is
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, Arc<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a session, starting it as active at `now` if it does not exist.
    pub fn get_or_start(&self, id: &str, now: DateTime<Utc>) -> Arc<Session> {
        let mut sessions = self.sessions.lock().expect("session registry lock poisoned");
        let session = sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session = id, "Starting session");
                Arc::new(Session::new(now))
            })
            .clone();
        session.touch(now);
        session
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        let sessions = self.sessions.lock().expect("session registry lock poisoned");
        sessions.get(id).cloned()
    }

    /// End a session. Returns `false` if it was not live.
    pub fn end(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock().expect("session registry lock poisoned");
        sessions.remove(id).is_some()
    }

    /// Drop sessions not used for longer than `max_idle`. Returns how many
    /// were removed.
    pub fn cleanup(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().expect("session registry lock poisoned");
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen() <= max_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "Expired idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub config: Arc<EngineConfig>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
        }
    }
}
