//! HTTP session management for the MCP transport
//!
//! Stateful sessions identified by a UUID in the `Mcp-Session-Id` header,
//! with an idle timeout and a concurrent session cap. Both limits come from
//! [`HttpConfig`](crate::config::HttpConfig) instead of being hard-coded.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Session metadata
#[derive(Debug, Clone)]
pub struct HttpSession {
    /// Unique session identifier (UUID v4)
    pub session_id: Uuid,

    /// Client metadata (User-Agent etc.)
    pub client_metadata: HashMap<String, String>,

    /// Session creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp (updated on each request)
    pub last_activity: DateTime<Utc>,

    /// Session expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl HttpSession {
    fn new(client_metadata: HashMap<String, String>, timeout: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            client_metadata,
            created_at: now,
            last_activity: now,
            expires_at: now + timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Updates the activity timestamp and extends the expiration.
    fn touch(&mut self, timeout: Duration) {
        let now = Utc::now();
        self.last_activity = now;
        self.expires_at = now + timeout;
    }
}

/// Thread-safe session store
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, HttpSession>>>,
    max_sessions: usize,
    timeout: Duration,
}

impl SessionStore {
    /// Creates a store capped at `max_sessions` with the given idle timeout.
    pub fn new(max_sessions: usize, timeout_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            timeout: Duration::minutes(timeout_minutes),
        }
    }

    /// Creates and stores a new session.
    ///
    /// Fails with `SessionLimitExceeded` when the store is at capacity.
    pub fn create_session(
        &self,
        client_metadata: HashMap<String, String>,
    ) -> Result<Uuid, SessionError> {
        let mut sessions = self.write_lock();

        if sessions.len() >= self.max_sessions {
            return Err(SessionError::SessionLimitExceeded(self.max_sessions));
        }

        let session = HttpSession::new(client_metadata, self.timeout);
        let session_id = session.session_id;
        sessions.insert(session_id, session);

        Ok(session_id)
    }

    /// Validates a session and refreshes its expiration.
    ///
    /// An expired session is removed and reported as `SessionExpired`; an
    /// unknown id is `SessionNotFound`.
    pub fn validate_session(&self, session_id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.write_lock();

        match sessions.get_mut(&session_id) {
            Some(session) => {
                if session.is_expired() {
                    sessions.remove(&session_id);
                    Err(SessionError::SessionExpired(session_id))
                } else {
                    session.touch(self.timeout);
                    Ok(())
                }
            }
            None => Err(SessionError::SessionNotFound(session_id)),
        }
    }

    /// Returns session metadata, if present.
    pub fn get_session(&self, session_id: Uuid) -> Option<HttpSession> {
        self.read_lock().get(&session_id).cloned()
    }

    /// Removes expired sessions and returns how many were dropped.
    pub fn cleanup_expired_sessions(&self) -> usize {
        let mut sessions = self.write_lock();
        let now = Utc::now();

        let expired_ids: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, session)| session.expires_at < now)
            .map(|(id, _)| *id)
            .collect();

        for id in &expired_ids {
            sessions.remove(id);
        }

        expired_ids.len()
    }

    /// Current number of live sessions.
    pub fn session_count(&self) -> usize {
        self.read_lock().len()
    }

    // A poisoned lock only means another handler panicked; the session map
    // itself is still consistent.
    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, HttpSession>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, HttpSession>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Session-related errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session expired: {0}")]
    SessionExpired(Uuid),

    #[error("Session limit exceeded: maximum {0} concurrent sessions")]
    SessionLimitExceeded(usize),

    #[error("Invalid session ID format")]
    InvalidSessionId,
}
