//! In-memory session registry. Sessions do not survive a restart.
//!
//! Each session sits behind its own async mutex, held for the whole of a request
//! (including the generation call), so requests for one session run one at a time
//! while other sessions are unaffected.
//!
//! Sessions idle for longer than the configured TTL are dropped, either lazily on
//! lookup or by the background sweeper. A session a request is still holding is
//! never dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::wizard::session::WizardSession;

pub type SessionHandle = Arc<Mutex<WizardSession>>;

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant, idle_ttl: Duration) -> bool {
        Arc::strong_count(&self.handle) == 1 && now.duration_since(self.last_seen) >= idle_ttl
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Registers a fresh session at step 1.
    pub async fn create(&self) -> SessionHandle {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(WizardSession::new(id)));
        let entry = Entry {
            handle: Arc::clone(&handle),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        handle
    }

    /// Looks up a session and marks it as seen. Expired sessions are removed and not returned.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        if sessions.get(&id)?.is_expired(now, self.idle_ttl) {
            sessions.remove(&id);
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.last_seen = now;
        Some(Arc::clone(&entry.handle))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let now = Instant::now();
        sessions.retain(|_, entry| !entry.is_expired(now, self.idle_ttl));
        before - sessions.len()
    }

    /// Runs `evict_idle` every `period` until the runtime shuts down.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle().await;
                if evicted > 0 {
                    info!(
                        "Evicted {evicted} idle sessions ({} remain)",
                        store.len().await
                    );
                }
            }
        })
    }
}
