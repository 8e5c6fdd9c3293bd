//! Per-player session table for hosting several games in one process.
//!
//! Pulls and fusions are check-then-act, so each session sits behind its own
//! mutex and callers hold it for the whole operation.

use super::logic::GameSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SharedSession>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under a fresh id.
    pub fn insert(&self, session: GameSession) -> Uuid {
        let id = Uuid::new_v4();
        lock(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        lock(&self.sessions).get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> Option<SharedSession> {
        lock(&self.sessions).remove(id)
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<Uuid> {
        lock(&self.sessions).keys().copied().collect()
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<T>(&self, id: &Uuid, f: impl FnOnce(&mut GameSession) -> T) -> Option<T> {
        let session = self.get(id)?;
        let mut guard = lock(&session);
        Some(f(&mut guard))
    }

    /// Advance every session's timers. Returns total passive gems credited.
    pub fn tick_all(&self, now_ms: i64) -> u64 {
        let sessions: Vec<SharedSession> = lock(&self.sessions).values().cloned().collect();
        sessions
            .iter()
            .map(|session| lock(session).tick(now_ms))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::clock::ManualClock;
    use crate::presenter::NullPresenter;
    use crate::pull::PullCount;
    use std::thread;

    fn new_session(seed: u64) -> GameSession {
        GameSession::new(
            &GameConfig::seeded(seed),
            Box::new(ManualClock::new(0)),
            Box::new(NullPresenter),
        )
    }

    #[test]
    fn test_insert_get_remove() {
        let registry = SessionRegistry::new();
        let id = registry.insert(new_session(1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.with_session(&id, |s| s.gems()), Some(8000));
        assert!(registry.remove(&id).is_some());
        assert!(registry.is_empty());
        assert!(registry.with_session(&id, |s| s.gems()).is_none());
    }

    #[test]
    fn test_concurrent_pulls_never_overspend() {
        let registry = Arc::new(SessionRegistry::new());
        let mut config = GameConfig::seeded(3);
        config.starting_gems = 500;
        let id = registry.insert(GameSession::new(
            &config,
            Box::new(ManualClock::new(0)),
            Box::new(NullPresenter),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .with_session(&id, |s| {
                            let pulled = s.pull(PullCount::Single).is_ok();
                            if pulled {
                                s.dismiss_drawn().ok();
                            }
                            pulled
                        })
                        .unwrap_or(false)
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|pulled| *pulled)
            .count();
        assert_eq!(successes, 5);

        let (gems, pulls) = registry
            .with_session(&id, |s| (s.gems(), s.lifetime_stats().total_pulls))
            .unwrap();
        assert_eq!(gems, 0);
        assert_eq!(pulls, 5);
    }

    #[test]
    fn test_tick_all_advances_every_session() {
        let registry = SessionRegistry::new();
        registry.insert(new_session(1));
        registry.insert(new_session(2));
        assert_eq!(registry.tick_all(60_000), 100);
    }
}
