//! Session Registry
//!
//! 在线会话表：user id -> 当前 socket 连接。心跳和任何入站事件都会刷新
//! `last_seen`，后台扫描清除超时会话，断线重连时新 socket 直接顶替旧的。

use dashmap::DashMap;
use saffron_shared::now_millis;
use serde::Deserialize;
use socketioxide::socket::Sid;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Connection role, from the `role` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    #[default]
    Customer,
    Admin,
}

impl SessionRole {
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::Customer,
        }
    }
}

/// One live socket session
#[derive(Debug, Clone)]
pub struct Session {
    pub socket_id: Sid,
    pub role: SessionRole,
    /// Epoch millis of the last heartbeat or inbound event
    pub last_seen: i64,
}

/// Online-session table keyed by user id
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<i64, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection; a reconnect replaces the previous socket id
    pub fn register(&self, user_id: i64, socket_id: Sid, role: SessionRole) {
        self.sessions.insert(
            user_id,
            Session {
                socket_id,
                role,
                last_seen: now_millis(),
            },
        );
        debug!(user_id, ?role, "relay session registered");
    }

    /// Refresh `last_seen` (heartbeat or any inbound event)
    pub fn touch(&self, user_id: i64) {
        if let Some(mut session) = self.sessions.get_mut(&user_id) {
            session.last_seen = now_millis();
        }
    }

    /// Refresh `last_seen` for the session owning `socket_id`
    pub fn touch_socket(&self, socket_id: Sid) {
        if let Some(mut entry) = self
            .sessions
            .iter_mut()
            .find(|entry| entry.value().socket_id == socket_id)
        {
            entry.value_mut().last_seen = now_millis();
        }
    }

    /// Drop the session owning `socket_id`.
    ///
    /// Matching by socket id keeps a reconnect safe: the disconnect of the
    /// old socket must not remove the session the new socket registered.
    pub fn remove_socket(&self, socket_id: Sid) -> Option<i64> {
        let user_id = self
            .sessions
            .iter()
            .find(|entry| entry.value().socket_id == socket_id)
            .map(|entry| *entry.key())?;
        self.sessions.remove(&user_id);
        debug!(user_id, "relay session removed");
        Some(user_id)
    }

    pub fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions.get(&user_id).map(|s| s.value().clone())
    }

    pub fn is_online(&self, user_id: i64) -> bool {
        self.sessions.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove sessions idle longer than `ttl`, returning the evicted ids
    pub fn evict_idle(&self, ttl: Duration) -> Vec<i64> {
        let cutoff = now_millis() - ttl.as_millis() as i64;
        let stale: Vec<i64> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().last_seen < cutoff)
            .map(|entry| *entry.key())
            .collect();
        for user_id in &stale {
            self.sessions.remove(user_id);
            debug!(user_id, "relay session evicted (idle)");
        }
        stale
    }

    /// Background sweep at half the TTL interval, until `shutdown` fires
    pub fn spawn_sweeper(&self, ttl: Duration, shutdown: CancellationToken) {
        let registry = self.clone();
        let period = (ttl / 2).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let evicted = registry.evict_idle(ttl);
                        if !evicted.is_empty() {
                            tracing::info!(count = evicted.len(), "evicted idle relay sessions");
                        }
                    }
                    _ = shutdown.cancelled() => {
                        tracing::debug!("relay sweeper stopped");
                        return;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let registry = SessionRegistry::new();
        let sid = Sid::new();
        registry.register(7, sid, SessionRole::Customer);

        assert!(registry.is_online(7));
        let session = registry.get(7).unwrap();
        assert_eq!(session.socket_id, sid);
        assert_eq!(session.role, SessionRole::Customer);
    }

    #[test]
    fn reconnect_replaces_socket_id() {
        let registry = SessionRegistry::new();
        let old = Sid::new();
        let new = Sid::new();
        registry.register(7, old, SessionRole::Customer);
        registry.register(7, new, SessionRole::Admin);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(7).unwrap().socket_id, new);

        // The old socket's disconnect must not tear down the new session
        assert_eq!(registry.remove_socket(old), None);
        assert!(registry.is_online(7));
        assert_eq!(registry.remove_socket(new), Some(7));
        assert!(!registry.is_online(7));
    }

    #[test]
    fn heartbeat_defers_eviction() {
        let registry = SessionRegistry::new();
        registry.register(1, Sid::new(), SessionRole::Customer);
        registry.register(2, Sid::new(), SessionRole::Customer);

        // Age the first session past any cutoff
        registry
            .sessions
            .get_mut(&1)
            .map(|mut s| s.last_seen -= 10_000);
        registry.touch(2);

        let evicted = registry.evict_idle(Duration::from_secs(5));
        assert_eq!(evicted, vec![1]);
        assert!(!registry.is_online(1));
        assert!(registry.is_online(2));
    }

    #[test]
    fn role_parsing_defaults_to_customer() {
        assert_eq!(SessionRole::parse("admin"), SessionRole::Admin);
        assert_eq!(SessionRole::parse("customer"), SessionRole::Customer);
        assert_eq!(SessionRole::parse("whatever"), SessionRole::Customer);
    }
}
