use std::sync::{Arc, Mutex};

use slackline_store::{MessageStore, StoreError};
use tracing::error;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    store: Mutex<MessageStore>,
}

impl AppStateInner {
    pub fn new(store: MessageStore) -> AppState {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }

    /// Run one store operation under the lock.
    pub fn with_store<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut MessageStore) -> Result<T, StoreError>,
    {
        let mut store = self.store.lock().map_err(|e| {
            error!("Store lock poisoned: {}", e);
            ApiError::internal()
        })?;
        f(&mut *store).map_err(ApiError::from)
    }

    /// Like `with_store` for operations that cannot fail.
    pub fn apply<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut MessageStore) -> T,
    {
        self.with_store(|store| Ok(f(store)))
    }
}
