use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};

use fridgechef_core::{
    application::FridgeChefService,
    domain::{ingredient::entities::IngredientCatalog, session::SessionState},
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FridgeChefService,
    pub catalog: Arc<IngredientCatalog>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FridgeChefService, catalog: IngredientCatalog) -> Self {
        let idle_ttl = TimeDelta::seconds(args.server.session_idle_ttl_secs as i64);

        Self {
            args,
            service,
            catalog: Arc::new(catalog),
            sessions: SessionStore::new(idle_ttl),
        }
    }
}

/// In-memory session states keyed by id.
///
/// A session untouched for longer than `idle_ttl` is treated as gone. Idle
/// sessions are swept whenever a new one is created. Locks are never held
/// across collaborator calls.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    idle_ttl: TimeDelta,
}

impl SessionStore {
    pub fn new(idle_ttl: TimeDelta) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    fn is_idle(&self, session: &SessionState, now: DateTime<Utc>) -> bool {
        session.updated_at() + self.idle_ttl <= now
    }

    pub async fn create(&self) -> SessionState {
        self.evict_idle().await;

        let session = SessionState::new();
        self.inner
            .write()
            .await
            .insert(session.id(), session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionState> {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .get(&id)
            .filter(|session| !self.is_idle(session, now))
            .cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Runs `f` on the session under the write lock. An idle session is
    /// dropped instead.
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut sessions = self.inner.write().await;
        if sessions
            .get(&id)
            .is_some_and(|session| self.is_idle(session, Utc::now()))
        {
            sessions.remove(&id);
            debug!(session_id = %id, "Dropped idle session");
            return None;
        }

        sessions.get_mut(&id).map(f)
    }

    /// Removes every idle session and returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_idle(session, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use fridgechef_core::domain::ingredient::entities::Ingredient;

    use super::*;

    #[tokio::test]
    async fn test_session_store_lifecycle() {
        let store = SessionStore::new(TimeDelta::minutes(30));
        let session = store.create().await;

        let selected = store
            .update(session.id(), |s| s.toggle(Ingredient::parse("egg").unwrap()))
            .await;
        assert_eq!(selected, Some(true));
        assert_eq!(store.get(session.id()).await.unwrap().selected().len(), 1);

        assert!(store.remove(session.id()).await);
        assert!(!store.remove(session.id()).await);
        assert_eq!(store.len().await, 0);
        assert!(store.update(session.id(), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let store = SessionStore::new(TimeDelta::zero());
        let first = store.create().await;

        assert!(store.get(first.id()).await.is_none());

        let second = store.create().await;
        assert_eq!(store.len().await, 1);
        assert!(store.update(second.id(), |_| ()).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_active_sessions_survive_sweep() {
        let store = SessionStore::new(TimeDelta::minutes(30));
        let session = store.create().await;

        assert_eq!(store.evict_idle().await, 0);
        assert!(store.get(session.id()).await.is_some());
    }
}
