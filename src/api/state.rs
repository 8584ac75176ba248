//! Application state for the evaluation engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::Store;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// entity store and the scoring configuration it carries.
#[derive(Clone)]
pub struct AppState {
    /// The shared entity store.
    store: Arc<Store>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
