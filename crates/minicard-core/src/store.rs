//! Snapshot state store
//!
//! Owns the single [`AppState`] and the key-value slot it is persisted to.
//! Every change goes through [`StateStore::mutate`], which persists the whole
//! snapshot before returning, so the write points of the application are
//! exactly the call sites of `mutate`, `replace` and `reset`.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::AppState;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized application state
pub const STATE_KEY: &str = "appState";

pub struct StateStore<S: KeyValueStore> {
    state: AppState,
    storage: S,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Load the persisted snapshot, falling back to the seed state.
    ///
    /// A missing, unreadable or unparsable snapshot never fails the load.
    pub fn load(storage: S) -> Self {
        let state = match storage.get(STATE_KEY) {
            Ok(Some(raw)) => match AppState::from_json(&raw) {
                Ok(state) => {
                    info!(notes = state.notes.len(), "Loaded persisted state");
                    state
                }
                Err(error) => {
                    warn!("Persisted state is malformed, using seed state: {error}");
                    AppState::seed()
                }
            },
            Ok(None) => {
                info!("No persisted state, using seed state");
                AppState::seed()
            }
            Err(error) => {
                warn!("Failed to read persisted state, using seed state: {error}");
                AppState::seed()
            }
        };
        Self { state, storage }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the whole snapshot in a single slot write
    pub fn persist(&mut self) -> Result<()> {
        let serialized = self.state.to_json()?;
        self.storage.set(STATE_KEY, &serialized)?;
        debug!(bytes = serialized.len(), "Persisted state");
        Ok(())
    }

    /// Apply `change` to the state, then persist
    pub fn mutate<R>(&mut self, change: impl FnOnce(&mut AppState) -> R) -> Result<R> {
        let outcome = change(&mut self.state);
        self.persist()?;
        Ok(outcome)
    }

    /// Replace the state wholesale, then persist
    pub fn replace(&mut self, state: AppState) -> Result<()> {
        self.state = state;
        self.persist()
    }

    /// Clear storage and continue with the empty state
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.state = AppState::empty();
        info!("State reset");
        Ok(())
    }

    pub fn into_parts(self) -> (AppState, S) {
        (self.state, self.storage)
    }
}
