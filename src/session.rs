//! Session registry for the presentation layer.
//!
//! Interactive flows (guessing games, paged browses) hold per-channel
//! state. That state lives in an explicit registry object with an
//! injected TTL and a create/get/close/expire lifecycle, so instances
//! can be constructed per deployment and exercised in tests — never a
//! module-level mutable map.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session is already active in {0}")]
    AlreadyActive(String),
}

struct Entry<S> {
    state: S,
    touched: Instant,
}

pub struct SessionRegistry<S> {
    inner: RwLock<HashMap<String, Entry<S>>>,
    ttl: Duration,
}

impl<S: Clone + Send + Sync> SessionRegistry<S> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Open a session in the given channel. Refuses while one is
    /// already active there.
    pub async fn create(&self, channel: &str, state: S) -> Result<(), SessionError> {
        let mut sessions = self.inner.write().await;
        if sessions.contains_key(channel) {
            return Err(SessionError::AlreadyActive(channel.to_string()));
        }
        sessions.insert(
            channel.to_string(),
            Entry {
                state,
                touched: Instant::now(),
            },
        );
        Ok(())
    }

    /// Current state for a channel. Touching a session keeps it alive.
    pub async fn get(&self, channel: &str) -> Option<S> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(channel)?;
        entry.touched = Instant::now();
        Some(entry.state.clone())
    }

    /// Apply a mutation to a live session. Returns false when no
    /// session is active in the channel.
    pub async fn update(&self, channel: &str, f: impl FnOnce(&mut S)) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(channel) {
            Some(entry) => {
                f(&mut entry.state);
                entry.touched = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Close a session, returning its final state.
    pub async fn close(&self, channel: &str) -> Option<S> {
        self.inner.write().await.remove(channel).map(|e| e.state)
    }

    /// Drop every session idle past the TTL. Returns how many expired.
    pub async fn expire_stale(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() < self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_close_roundtrip() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        registry.create("chan-1", 41u32).await.unwrap();
        assert_eq!(registry.get("chan-1").await, Some(41));

        assert!(registry.update("chan-1", |s| *s += 1).await);
        assert_eq!(registry.close("chan-1").await, Some(42));
        assert_eq!(registry.get("chan-1").await, None);
    }

    #[tokio::test]
    async fn duplicate_create_is_refused() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        registry.create("chan-1", ()).await.unwrap();
        assert!(matches!(
            registry.create("chan-1", ()).await,
            Err(SessionError::AlreadyActive(_))
        ));
        // Other channels are unaffected.
        registry.create("chan-2", ()).await.unwrap();
    }

    #[tokio::test]
    async fn zero_ttl_expires_everything() {
        let registry = SessionRegistry::new(Duration::ZERO);
        registry.create("chan-1", ()).await.unwrap();
        registry.create("chan-2", ()).await.unwrap();
        assert_eq!(registry.expire_stale().await, 2);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn update_on_missing_session_is_false() {
        let registry: SessionRegistry<u32> = SessionRegistry::new(Duration::from_secs(60));
        assert!(!registry.update("nowhere", |_| {}).await);
    }
}
