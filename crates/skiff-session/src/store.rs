use crate::session::Session;
use skiff_core::types::Turn;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// Process-wide map from session token to history.
///
/// The outer lock is held only long enough to look up or insert the
/// per-session entry; each session serializes its own operations on its
/// own mutex, so requests for distinct tokens never contend.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh opaque session token: 16 random bytes, hex-encoded.
    pub fn new_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Look up a session, creating an empty one for unknown tokens.
    pub fn get_or_create(&self, token: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.inner.read().unwrap().get(token) {
            return session.clone();
        }
        let mut map = self.inner.write().unwrap();
        map.entry(token.to_string())
            .or_insert_with(|| {
                tracing::debug!(token, "creating session");
                Arc::new(Mutex::new(Session::new(token)))
            })
            .clone()
    }

    pub fn get(&self, token: &str) -> Option<Arc<Mutex<Session>>> {
        self.inner.read().unwrap().get(token).cloned()
    }

    /// Append one turn to the session's history, creating the session if
    /// needed. Eviction keeps the history at or under the cap.
    pub fn append(&self, token: &str, turn: Turn) {
        let session = self.get_or_create(token);
        session.lock().unwrap().push(turn);
    }

    /// The chronologically last `2 * exchange_limit` turns for the
    /// session, oldest first. Empty for unknown tokens; never mutates.
    pub fn recent(&self, token: &str, exchange_limit: usize) -> Vec<Turn> {
        match self.get(token) {
            Some(session) => session.lock().unwrap().recent(exchange_limit).to_vec(),
            None => Vec::new(),
        }
    }

    /// Empty the session's history. No-op for unknown tokens.
    pub fn clear(&self, token: &str) {
        if let Some(session) = self.get(token) {
            session.lock().unwrap().clear();
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.inner.read().unwrap().contains_key(token)
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap().len()
    }
}
