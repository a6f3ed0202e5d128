use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use tracing::instrument;

use scout_core::history::{HistoryEntry, Speaker};
use scout_core::ids::SessionId;

use crate::error::StoreError;

/// Summary view of one session.
#[derive(Clone, Debug, Serialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub created_at: String,
    pub entry_count: usize,
}

struct SessionLog {
    created_at: String,
    entries: Vec<HistoryEntry>,
}

impl SessionLog {
    fn new() -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            entries: Vec::new(),
        }
    }
}

/// In-memory session history store. Entries are append-only and ordered;
/// nothing survives process exit. Each session has a single logical writer
/// (the submit handler), so a per-entry dashmap shard is all the locking
/// needed.
#[derive(Default)]
pub struct SessionRepo {
    sessions: DashMap<SessionId, SessionLog>,
}

impl SessionRepo {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a fresh session.
    #[instrument(skip(self))]
    pub fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id.clone(), SessionLog::new());
        id
    }

    /// Resolve the session to write to: reuse the given id (creating its
    /// log if this process has not seen it), or mint a new one.
    pub fn get_or_create(&self, id: Option<&SessionId>) -> SessionId {
        match id {
            Some(id) => {
                self.sessions
                    .entry(id.clone())
                    .or_insert_with(SessionLog::new);
                id.clone()
            }
            None => self.create(),
        }
    }

    /// Append one turn. O(1), never fails, never reorders; creates the
    /// session log on first touch.
    #[instrument(skip(self, text), fields(session_id = %id, speaker = %speaker))]
    pub fn append(&self, id: &SessionId, speaker: Speaker, text: &str) {
        self.sessions
            .entry(id.clone())
            .or_insert_with(SessionLog::new)
            .entries
            .push(HistoryEntry::new(speaker, text));
    }

    /// All entries for a session, in insertion order.
    pub fn history(&self, id: &SessionId) -> Result<Vec<HistoryEntry>, StoreError> {
        self.sessions
            .get(id)
            .map(|log| log.entries.clone())
            .ok_or_else(|| StoreError::NotFound(format!("session {id}")))
    }

    /// All sessions, newest first.
    pub fn list(&self) -> Vec<SessionInfo> {
        let mut infos: Vec<SessionInfo> = self
            .sessions
            .iter()
            .map(|entry| SessionInfo {
                id: entry.key().clone(),
                created_at: entry.value().created_at.clone(),
                entry_count: entry.value().entries.len(),
            })
            .collect();
        infos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        infos
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
