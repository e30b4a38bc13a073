use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::info;
use turbodeck_core::{
    Boss, Content, EventBus, GameConfig, GameSession, RngState, SessionError,
};

const SESSION_ID_LEN: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
}

/// One lock per session: requests against the same id are serialised,
/// different sessions proceed in parallel.
pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Debug, Default, Clone, Copy)]
pub struct NewSession {
    pub boss: Option<Boss>,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub struct SessionDirectory {
    config: Arc<GameConfig>,
    content: Arc<Content>,
    sessions: Mutex<HashMap<String, SharedSession>>,
    rng: Mutex<StdRng>,
}

impl SessionDirectory {
    pub fn new(config: Arc<GameConfig>, content: Arc<Content>) -> Self {
        Self::with_rng(config, content, StdRng::from_entropy())
    }

    pub fn with_seed(config: Arc<GameConfig>, content: Arc<Content>, seed: u64) -> Self {
        Self::with_rng(config, content, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Arc<GameConfig>, content: Arc<Content>, rng: StdRng) -> Self {
        Self {
            config,
            content,
            sessions: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Create, deal and register a new session.
    pub fn create(
        &self,
        options: NewSession,
        events: &mut EventBus,
    ) -> Result<(String, SharedSession), SessionError> {
        let mut sessions = lock(&self.sessions);
        let (id, seed) = {
            let mut rng = lock(&self.rng);
            let mut id = new_session_id(&mut rng);
            while sessions.contains_key(&id) {
                id = new_session_id(&mut rng);
            }
            let seed = options.seed.unwrap_or_else(|| rng.gen());
            (id, seed)
        };
        let mut session = GameSession::new(
            id.clone(),
            Arc::clone(&self.config),
            Arc::clone(&self.content),
            RngState::from_seed(seed),
        )
        .with_boss(options.boss);
        session.start(events)?;
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id.clone(), Arc::clone(&shared));
        info!(session = %id, seed, boss = ?options.boss, "session created");
        Ok((id, shared))
    }

    pub fn get(&self, id: &str) -> Result<SharedSession, DirectoryError> {
        lock(&self.sessions)
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::SessionNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A panicked request leaves the data it held intact; keep serving it.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn new_session_id(rng: &mut StdRng) -> String {
    (0..SESSION_ID_LEN)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SessionDirectory {
        SessionDirectory::with_seed(
            Arc::new(GameConfig::standard()),
            Arc::new(Content::standard()),
            7,
        )
    }

    #[test]
    fn created_sessions_can_be_found() {
        let directory = directory();
        let mut events = EventBus::default();
        let (id, _) = directory
            .create(NewSession::default(), &mut events)
            .expect("create");
        assert_eq!(id.len(), SESSION_ID_LEN);
        let session = directory.get(&id).expect("get");
        assert_eq!(lock(&session).hand.len(), 8);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let directory = directory();
        assert_eq!(
            directory.get("nope").unwrap_err(),
            DirectoryError::SessionNotFound("nope".to_string())
        );
    }

    #[test]
    fn same_seed_deals_same_hand() {
        let directory = directory();
        let mut events = EventBus::default();
        let options = NewSession {
            boss: Some(Boss::FrozenGround),
            seed: Some(99),
        };
        let (_, first) = directory.create(options, &mut events).expect("first");
        let (_, second) = directory.create(options, &mut events).expect("second");
        let first = lock(&first);
        let second = lock(&second);
        assert_eq!(first.hand, second.hand);
        assert_eq!(first.state.boss, Some(Boss::FrozenGround));
        assert_ne!(first.id, second.id);
    }
}
