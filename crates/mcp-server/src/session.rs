//! Session management (spec §3.5): transparent per-connection state,
//! created on `initialize` and torn down when the transport closes.
//! Grounded on the teacher's `SessionContext`/`SessionManager` shape but
//! carries only the in-memory store — the teacher's pluggable SQLite /
//! Postgres / DynamoDB backends are dropped (see DESIGN.md).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// A server→client notification queued for delivery over whatever
/// transport owns this session (SSE stream, stdio writer).
#[derive(Debug, Clone)]
pub struct SessionNotification {
    pub method: String,
    pub params: Value,
}

struct SessionState {
    values: HashMap<String, Value>,
    created_at: Instant,
    last_seen: Instant,
    initialized: bool,
}

/// Handle to one live session. Cloning is cheap — it shares the
/// underlying state through the manager.
#[derive(Clone)]
pub struct SessionContext {
    pub session_id: String,
    manager: Arc<SessionManager>,
}

impl SessionContext {
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.manager.get_state(&self.session_id, key).await
    }

    pub async fn set(&self, key: &str, value: Value) {
        self.manager.set_state(&self.session_id, key, value).await
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.manager.remove_state(&self.session_id, key).await
    }

    pub async fn is_initialized(&self) -> bool {
        self.manager.is_initialized(&self.session_id).await
    }

    pub async fn mark_initialized(&self) {
        self.manager.mark_initialized(&self.session_id).await
    }

    /// Queue a notification on this session's broadcast channel; the
    /// owning transport is responsible for draining it.
    pub fn notify(&self, method: impl Into<String>, params: Value) {
        let _ = self.manager.sender.send(SessionEvent {
            session_id: self.session_id.clone(),
            notification: SessionNotification { method: method.into(), params },
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.manager.sender.subscribe()
    }
}

#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub session_id: String,
    pub notification: SessionNotification,
}

/// In-memory session table shared by every transport a running server
/// exposes (stdio has exactly one implicit session; HTTP stateful mode
/// keys sessions by `Mcp-Session-Id`).
pub struct SessionManager {
    sessions: RwLock<HashMap<String, SessionState>>,
    timeout: Duration,
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new() -> Arc<Self> {
        Self::with_timeout(Duration::from_secs(30 * 60))
    }

    pub fn with_timeout(timeout: Duration) -> Arc<Self> {
        let (sender, _) = broadcast::channel(256);
        Arc::new(Self { sessions: RwLock::new(HashMap::new()), timeout, sender })
    }

    /// Creates a new session and returns a [`SessionContext`] bound to
    /// it — the "initialize" half of the MCP lifecycle (spec §3.2).
    pub async fn create(self: &Arc<Self>) -> SessionContext {
        let session_id = Uuid::new_v4().to_string();
        let now = Instant::now();
        self.sessions.write().await.insert(
            session_id.clone(),
            SessionState { values: HashMap::new(), created_at: now, last_seen: now, initialized: false },
        );
        SessionContext { session_id, manager: Arc::clone(self) }
    }

    pub async fn get(self: &Arc<Self>, session_id: &str) -> Option<SessionContext> {
        let exists = self.sessions.read().await.contains_key(session_id);
        if exists {
            self.touch(session_id).await;
            Some(SessionContext { session_id: session_id.to_string(), manager: Arc::clone(self) })
        } else {
            None
        }
    }

    pub async fn close(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Drops every session whose `last_seen` is older than the
    /// configured timeout. Intended to be run periodically by the
    /// owning transport (spec §3.5 "sessions are reclaimed after an
    /// idle timeout").
    pub async fn sweep_expired(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, state| state.last_seen.elapsed() < self.timeout);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn touch(&self, session_id: &str) {
        if let Some(state) = self.sessions.write().await.get_mut(session_id) {
            state.last_seen = Instant::now();
        }
    }

    async fn get_state(&self, session_id: &str, key: &str) -> Option<Value> {
        self.sessions.read().await.get(session_id).and_then(|s| s.values.get(key).cloned())
    }

    async fn set_state(&self, session_id: &str, key: &str, value: Value) {
        if let Some(state) = self.sessions.write().await.get_mut(session_id) {
            state.values.insert(key.to_string(), value);
        }
    }

    async fn remove_state(&self, session_id: &str, key: &str) -> Option<Value> {
        self.sessions.write().await.get_mut(session_id).and_then(|s| s.values.remove(key))
    }

    async fn is_initialized(&self, session_id: &str) -> bool {
        self.sessions.read().await.get(session_id).map(|s| s.initialized).unwrap_or(false)
    }

    async fn mark_initialized(&self, session_id: &str) {
        if let Some(state) = self.sessions.write().await.get_mut(session_id) {
            state.initialized = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_session_starts_uninitialized() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        assert!(!session.is_initialized().await);
        session.mark_initialized().await;
        assert!(session.is_initialized().await);
    }

    #[tokio::test]
    async fn state_round_trips_through_context() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        session.set("count", serde_json::json!(1)).await;
        assert_eq!(session.get("count").await, Some(serde_json::json!(1)));
        session.remove("count").await;
        assert_eq!(session.get("count").await, None);
    }

    #[tokio::test]
    async fn closing_a_session_drops_it_from_the_table() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        assert_eq!(manager.session_count().await, 1);
        manager.close(&session.session_id).await;
        assert_eq!(manager.session_count().await, 0);
    }
}
