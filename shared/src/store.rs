use std::collections::HashMap;

use crate::error::MapError;
use crate::state::GameState;

/// Synchronous string key/value storage (browser local storage or a stand-in).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), MapError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        (**self).set(key, value)
    }
}

/// Process-local store. Used when browser storage is unavailable, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Read the game state under `key`, falling back to defaults.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> GameState {
    match store.get(key) {
        Some(json) => GameState::from_json_lenient(&json),
        None => GameState::default(),
    }
}

pub fn save_state<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    state: &GameState,
) -> Result<(), MapError> {
    let json = state.to_json()?;
    store.set(key, &json)
}
